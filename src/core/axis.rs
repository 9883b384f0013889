//! Axis capabilities consumed by the bar core.
//!
//! Tick generation and axis drawing live elsewhere; the bar core only needs
//! value-to-pixel mapping, the per-slot band width, and (for ordinal axes) the
//! reverse lookup from a pixel to the slot it falls into.

use indexmap::IndexSet;

use crate::core::{DomainValue, LinearScale};
use crate::error::{ChartError, ChartResult};

pub trait DomainAxis {
    /// Pixel position of the center of `value`'s slot.
    fn pixel_position(&self, value: &DomainValue) -> Option<f64>;

    /// Pixel width allotted to one domain slot.
    fn range_band(&self) -> f64;

    /// Domain value whose slot contains `pixel`. Continuous axes return `None`.
    fn domain_for_pixel(&self, pixel: f64) -> Option<DomainValue>;

    fn is_ordinal(&self) -> bool;
}

pub trait MeasureAxis {
    fn pixel_position(&self, value: f64) -> Option<f64>;
}

impl MeasureAxis for LinearScale {
    fn pixel_position(&self, value: f64) -> Option<f64> {
        self.domain_to_pixel(value)
    }
}

/// Band scale over category strings.
///
/// Slots are laid out from `range_start` towards `range_end`; passing a
/// reversed range mirrors the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalAxis {
    categories: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    band_padding_ratio: f64,
}

impl OrdinalAxis {
    pub fn new<I, S>(categories: I, range_start: f64, range_end: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: IndexSet<String> = categories.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(ChartError::InvalidData(
                "ordinal axis requires at least one category".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "ordinal axis range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            categories,
            range_start,
            range_end,
            band_padding_ratio: 0.0,
        })
    }

    /// Sets the share of each step left empty around the band, in `[0, 1)`.
    pub fn with_band_padding_ratio(mut self, ratio: f64) -> ChartResult<Self> {
        if !ratio.is_finite() || !(0.0..1.0).contains(&ratio) {
            return Err(ChartError::InvalidData(
                "band padding ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        self.band_padding_ratio = ratio;
        Ok(self)
    }

    #[must_use]
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    fn step(&self) -> f64 {
        (self.range_end - self.range_start) / self.categories.len() as f64
    }
}

impl DomainAxis for OrdinalAxis {
    fn pixel_position(&self, value: &DomainValue) -> Option<f64> {
        let index = self.categories.get_index_of(value.as_category()?)?;
        Some(self.range_start + self.step() * (index as f64 + 0.5))
    }

    fn range_band(&self) -> f64 {
        self.step().abs() * (1.0 - self.band_padding_ratio)
    }

    fn domain_for_pixel(&self, pixel: f64) -> Option<DomainValue> {
        if !pixel.is_finite() {
            return None;
        }
        let slot = (pixel - self.range_start) / self.step();
        if slot < 0.0 || slot >= self.categories.len() as f64 {
            return None;
        }
        self.categories
            .get_index(slot.floor() as usize)
            .map(|category| DomainValue::Category(category.clone()))
    }

    fn is_ordinal(&self) -> bool {
        true
    }
}

/// Continuous (numeric or time) domain axis with an explicit band width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDomainAxis {
    scale: LinearScale,
    range_band: f64,
}

impl LinearDomainAxis {
    pub fn new(scale: LinearScale, range_band: f64) -> ChartResult<Self> {
        if !range_band.is_finite() || range_band < 0.0 {
            return Err(ChartError::InvalidData(
                "range band must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self { scale, range_band })
    }

    #[must_use]
    pub fn scale(self) -> LinearScale {
        self.scale
    }
}

impl DomainAxis for LinearDomainAxis {
    fn pixel_position(&self, value: &DomainValue) -> Option<f64> {
        self.scale.domain_to_pixel(value.as_numeric()?)
    }

    fn range_band(&self) -> f64 {
        self.range_band
    }

    fn domain_for_pixel(&self, _pixel: f64) -> Option<DomainValue> {
        None
    }

    fn is_ordinal(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainAxis, LinearDomainAxis, OrdinalAxis};
    use crate::core::{DomainValue, LinearScale};

    #[test]
    fn ordinal_axis_centers_categories_in_slots() {
        let axis = OrdinalAxis::new(["a", "b", "c"], 0.0, 300.0).expect("axis");
        assert_eq!(axis.pixel_position(&DomainValue::from("a")), Some(50.0));
        assert_eq!(axis.pixel_position(&DomainValue::from("c")), Some(250.0));
        assert_eq!(axis.range_band(), 100.0);
        assert_eq!(axis.pixel_position(&DomainValue::from("z")), None);
    }

    #[test]
    fn ordinal_axis_maps_pixels_back_to_slots() {
        let axis = OrdinalAxis::new(["a", "b", "c"], 0.0, 300.0).expect("axis");
        assert_eq!(axis.domain_for_pixel(120.0), Some(DomainValue::from("b")));
        assert_eq!(axis.domain_for_pixel(-1.0), None);
        assert_eq!(axis.domain_for_pixel(300.0), None);
    }

    #[test]
    fn reversed_ordinal_axis_mirrors_positions() {
        let axis = OrdinalAxis::new(["a", "b"], 200.0, 0.0).expect("axis");
        assert_eq!(axis.pixel_position(&DomainValue::from("a")), Some(150.0));
        assert_eq!(axis.domain_for_pixel(160.0), Some(DomainValue::from("a")));
        assert_eq!(axis.range_band(), 100.0);
    }

    #[test]
    fn band_padding_shrinks_range_band() {
        let axis = OrdinalAxis::new(["a", "b"], 0.0, 200.0)
            .expect("axis")
            .with_band_padding_ratio(0.25)
            .expect("padding");
        assert_eq!(axis.range_band(), 75.0);
    }

    #[test]
    fn linear_domain_axis_ignores_categories() {
        let scale = LinearScale::new(0.0, 10.0, 0.0, 100.0).expect("scale");
        let axis = LinearDomainAxis::new(scale, 8.0).expect("axis");
        assert_eq!(axis.pixel_position(&DomainValue::from(5.0)), Some(50.0));
        assert_eq!(axis.pixel_position(&DomainValue::from("x")), None);
        assert!(!axis.is_ordinal());
    }
}
