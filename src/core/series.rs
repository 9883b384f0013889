use rust_decimal::Decimal;

use crate::core::DomainValue;
use crate::core::primitives::decimal_to_f64;
use crate::error::ChartResult;
use crate::render::{Color, FillPattern};

/// One datum of a bar series, addressed by its index in [`BarSeries::data`].
///
/// Every optional accessor falls back to a neutral default downstream: a
/// missing measure draws nothing, missing styling uses renderer defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub domain: DomainValue,
    pub measure: Option<f64>,
    /// Error-bar bounds. Bar geometry ignores them; they are carried for
    /// decorators drawn over the bars.
    pub measure_lower_bound: Option<f64>,
    pub measure_upper_bound: Option<f64>,
    pub measure_offset: Option<f64>,
    pub color: Option<Color>,
    pub fill_color: Option<Color>,
    pub fill_pattern: Option<FillPattern>,
    pub stroke_width_px: Option<f64>,
    pub dash_pattern: Option<Vec<f64>>,
    /// Text for bar label decorators; not used by bar geometry.
    pub label: Option<String>,
}

impl BarDatum {
    #[must_use]
    pub fn new(domain: impl Into<DomainValue>, measure: Option<f64>) -> Self {
        Self {
            domain: domain.into(),
            measure,
            measure_lower_bound: None,
            measure_upper_bound: None,
            measure_offset: None,
            color: None,
            fill_color: None,
            fill_pattern: None,
            stroke_width_px: None,
            dash_pattern: None,
            label: None,
        }
    }

    pub fn from_decimal_measure(domain: impl Into<DomainValue>, measure: Decimal) -> ChartResult<Self> {
        Ok(Self::new(domain, Some(decimal_to_f64(measure, "measure")?)))
    }

    #[must_use]
    pub fn with_measure_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.measure_lower_bound = Some(lower);
        self.measure_upper_bound = Some(upper);
        self
    }

    #[must_use]
    pub fn with_measure_offset(mut self, offset: f64) -> Self {
        self.measure_offset = Some(offset);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_fill_pattern(mut self, pattern: FillPattern) -> Self {
        self.fill_pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn with_stroke_width_px(mut self, stroke_width_px: f64) -> Self {
        self.stroke_width_px = Some(stroke_width_px);
        self
    }

    #[must_use]
    pub fn with_dash_pattern(mut self, dash_pattern: Vec<f64>) -> Self {
        self.dash_pattern = Some(dash_pattern);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered, externally owned series fed to a bar renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub id: String,
    /// Stack selector in grouped-stacked mode.
    pub category: Option<String>,
    /// Series-wide stroke color used when a datum has none.
    pub color: Option<Color>,
    /// Overlay series are drawn but never reported by hit testing.
    pub overlay: bool,
    pub data: Vec<BarDatum>,
}

impl BarSeries {
    #[must_use]
    pub fn new(id: impl Into<String>, data: Vec<BarDatum>) -> Self {
        Self {
            id: id.into(),
            category: None,
            color: None,
            overlay: false,
            data,
        }
    }

    /// Builds a series from `(domain, measure)` pairs.
    #[must_use]
    pub fn from_measures<I, D>(id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (D, Option<f64>)>,
        D: Into<DomainValue>,
    {
        let data = values
            .into_iter()
            .map(|(domain, measure)| BarDatum::new(domain, measure))
            .collect();
        Self::new(id, data)
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn domain(&self, index: usize) -> Option<&DomainValue> {
        self.data.get(index).map(|datum| &datum.domain)
    }

    #[must_use]
    pub fn measure(&self, index: usize) -> Option<f64> {
        self.data.get(index).and_then(|datum| datum.measure)
    }

    /// Color for a datum: its own, then the series color.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<Color> {
        self.data
            .get(index)
            .and_then(|datum| datum.color)
            .or(self.color)
    }

    /// Fill color for a datum: its own fill, then its stroke color.
    #[must_use]
    pub fn fill_color(&self, index: usize) -> Option<Color> {
        self.data
            .get(index)
            .and_then(|datum| datum.fill_color)
            .or_else(|| self.color(index))
    }
}
