use crate::bars::{BarKind, BarRenderer, FilledBars};
use crate::core::{BarSeries, DomainAxis, MeasureAxis, Viewport};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::render_coordinator::RenderCoordinator;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `BarChartEngine` owns the current series, the domain/measure axes and a
/// bar renderer, and replays each painted frame through the backend `R`.
pub struct BarChartEngine<R: Renderer, K: BarKind = FilledBars> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) bars: BarRenderer<K>,
    pub(super) series: Vec<BarSeries>,
    pub(super) domain_axis: Option<Box<dyn DomainAxis>>,
    pub(super) measure_axis: Option<Box<dyn MeasureAxis>>,
    pub(super) frame: RenderFrame,
}

impl<R: Renderer, K: BarKind> BarChartEngine<R, K> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn series(&self) -> &[BarSeries] {
        &self.series
    }

    #[must_use]
    pub fn bar_renderer(&self) -> &BarRenderer<K> {
        &self.bars
    }

    /// Frame recorded by the last `render` call.
    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Paints the bars at animation `progress` and hands the frame to the
    /// backend. Progress 1 finishes the current transition.
    pub fn render(&mut self, progress: f64) -> ChartResult<()> {
        RenderCoordinator::render(self, progress)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        progress: f64,
    ) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        RenderCoordinator::render_on_cairo_context(self, context, progress)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
