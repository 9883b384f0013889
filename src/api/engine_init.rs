use tracing::debug;

use crate::bars::{BarKind, BarRenderer};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::{BarChartEngine, BarChartEngineConfig};

impl<R: Renderer, K: BarKind + Default> BarChartEngine<R, K> {
    /// Creates an engine with no series and no axes.
    pub fn new(renderer: R, config: BarChartEngineConfig) -> ChartResult<Self> {
        Self::with_kind(renderer, config, K::default())
    }
}

impl<R: Renderer, K: BarKind> BarChartEngine<R, K> {
    pub fn with_kind(renderer: R, config: BarChartEngineConfig, kind: K) -> ChartResult<Self> {
        config.validate()?;
        let mut bars = BarRenderer::with_kind(config.bars, kind)?;
        bars.set_draw_bounds(Some(config.viewport.bounds()));
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            "init bar chart engine"
        );
        Ok(Self {
            renderer,
            viewport: config.viewport,
            bars,
            series: Vec::new(),
            domain_axis: None,
            measure_axis: None,
            frame: RenderFrame::new(config.viewport),
        })
    }
}
