use crate::bars::{BarKind, DatumMatch};
use crate::core::PixelPoint;
use crate::render::Renderer;

use super::BarChartEngine;

impl<R: Renderer, K: BarKind> BarChartEngine<R, K> {
    /// Data under or nearest to `point`, nearest-first.
    ///
    /// `by_domain` ranks by domain-axis distance before measure distance;
    /// otherwise by straight-line distance to each bar.
    #[must_use]
    pub fn nearest(&self, point: PixelPoint, by_domain: bool) -> Vec<DatumMatch> {
        let Some(domain_axis) = self.domain_axis.as_deref() else {
            return Vec::new();
        };
        self.bars.nearest(domain_axis, point, by_domain, None)
    }
}
