use tracing::trace;

use crate::bars::BarKind;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::BarChartEngine;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer, K: BarKind>(
        engine: &mut BarChartEngine<R, K>,
        progress: f64,
    ) -> ChartResult<()> {
        Self::paint(engine, progress);
        engine.renderer.render(&engine.frame)
    }

    #[cfg(feature = "cairo-backend")]
    pub(super) fn render_on_cairo_context<R: Renderer + CairoContextRenderer, K: BarKind>(
        engine: &mut BarChartEngine<R, K>,
        context: &cairo::Context,
        progress: f64,
    ) -> ChartResult<()> {
        Self::paint(engine, progress);
        engine
            .renderer
            .render_on_cairo_context(context, &engine.frame)
    }

    fn paint<R: Renderer, K: BarKind>(engine: &mut BarChartEngine<R, K>, progress: f64) {
        engine.frame.clear();
        engine.bars.paint(&mut engine.frame, progress);
        trace!(
            progress,
            stacks = engine.frame.stacks.len(),
            lines = engine.frame.lines.len(),
            "paint bar frame"
        );
    }
}
