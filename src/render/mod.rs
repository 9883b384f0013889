mod frame;
mod null_renderer;
mod primitives;

pub use frame::{RenderFrame, StackDrawCommand};
pub use null_renderer::NullRenderer;
pub use primitives::{
    BarStackPrimitive, Color, FillPattern, LinePrimitive, RectPrimitive, RoundedCorners,
    TextHAlign, TextPrimitive,
};

use crate::core::PixelRect;
use crate::error::ChartResult;

/// Stateless draw calls the bar core issues during a paint pass.
///
/// Primitives are borrowed only for the duration of the call.
pub trait ChartCanvas {
    fn draw_rect(&mut self, rect: &RectPrimitive);

    /// Draws the segments of one bar stack in order, clipped to `clip_bounds`
    /// when given.
    fn draw_rect_stack(&mut self, stack: &BarStackPrimitive, clip_bounds: Option<PixelRect>);

    fn draw_line(&mut self, line: &LinePrimitive);

    fn draw_text(&mut self, text: &TextPrimitive);
}

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from bar layout and animation logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
