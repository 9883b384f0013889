use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear mapping from a numeric domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is the usual
/// setup for vertical measure axes where larger values sit higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to pixel space. Returns `None` for non-finite input.
    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Some(self.range_start + normalized * (self.range_end - self.range_start))
    }

    /// Maps a pixel coordinate back to the domain. Returns `None` for a
    /// non-finite pixel or a zero-length range.
    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> Option<f64> {
        let range_span = self.range_end - self.range_start;
        if !pixel.is_finite() || range_span == 0.0 {
            return None;
        }
        let normalized = (pixel - self.range_start) / range_span;
        Some(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn inverted_range_maps_larger_values_higher() {
        let scale = LinearScale::new(0.0, 100.0, 500.0, 0.0).expect("scale");
        assert_eq!(scale.domain_to_pixel(0.0), Some(500.0));
        assert_eq!(scale.domain_to_pixel(100.0), Some(0.0));
        assert_eq!(scale.domain_to_pixel(25.0), Some(375.0));
    }

    #[test]
    fn pixel_round_trip_is_stable() {
        let scale = LinearScale::new(-10.0, 10.0, 0.0, 400.0).expect("scale");
        let px = scale.domain_to_pixel(3.25).expect("to pixel");
        let back = scale.pixel_to_domain(px).expect("to domain");
        assert!((back - 3.25).abs() <= 1e-9);
    }

    #[test]
    fn zero_span_domain_is_rejected() {
        let err = LinearScale::new(5.0, 5.0, 0.0, 100.0).expect_err("must fail");
        assert!(format!("{err}").contains("scale domain"));
    }
}
