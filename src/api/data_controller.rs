use tracing::{debug, trace};

use crate::bars::BarKind;
use crate::core::{BarSeries, DomainAxis, MeasureAxis};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::BarChartEngine;

impl<R: Renderer, K: BarKind> BarChartEngine<R, K> {
    /// Replaces every bar series and starts a transition towards it.
    ///
    /// On error the previous series stay in place and no element changes.
    pub fn set_series(&mut self, series: Vec<BarSeries>) -> ChartResult<()> {
        debug!(count = series.len(), "set bar series");
        let previous = std::mem::replace(&mut self.series, series);
        self.synchronize().inspect_err(|_| {
            self.series = previous;
        })
    }

    /// Replaces both axes and starts a transition towards the new layout.
    pub fn set_axes(
        &mut self,
        domain_axis: impl DomainAxis + 'static,
        measure_axis: impl MeasureAxis + 'static,
    ) -> ChartResult<()> {
        let previous_domain = self.domain_axis.replace(Box::new(domain_axis));
        let previous_measure = self.measure_axis.replace(Box::new(measure_axis));
        self.synchronize().inspect_err(|_| {
            self.domain_axis = previous_domain;
            self.measure_axis = previous_measure;
        })
    }

    /// Preprocesses the series and reconciles bar elements. A no-op until both
    /// axes are set.
    fn synchronize(&mut self) -> ChartResult<()> {
        let (Some(domain_axis), Some(measure_axis)) =
            (self.domain_axis.as_deref(), self.measure_axis.as_deref())
        else {
            trace!("axes not set; skipping bar synchronization");
            return Ok(());
        };
        let prepared = self.bars.preprocess(&self.series)?;
        self.bars.update(&prepared, domain_axis, measure_axis);
        Ok(())
    }
}
