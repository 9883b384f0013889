use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::FillPattern;

/// How multiple series share one domain slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarGroupingType {
    /// Series sit side by side.
    #[default]
    Grouped,
    /// Series are concatenated into one stack.
    Stacked,
    /// Series sharing a category form a stack; stacks sit side by side.
    GroupedStacked,
}

impl BarGroupingType {
    #[must_use]
    pub fn is_grouped(self) -> bool {
        matches!(self, Self::Grouped | Self::GroupedStacked)
    }

    #[must_use]
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Stacked | Self::GroupedStacked)
    }
}

/// Direction bars grow in. `Vertical` puts the domain on x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarOrientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CornerStrategy {
    #[default]
    None,
    Constant { radius_px: f64 },
}

impl CornerStrategy {
    /// Corner radius for a stack whose widest segment is `max_bar_width_px`.
    #[must_use]
    pub fn radius(self, max_bar_width_px: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Constant { radius_px } => radius_px.min(max_bar_width_px.max(0.0) * 0.5),
        }
    }
}

/// Extra options used only by target-line renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetLineConfig {
    /// Extension applied past each end of an inner line's domain span.
    #[serde(default)]
    pub overdraw_px: f64,
    /// Extension for the outer end of the first and last group, when set.
    #[serde(default)]
    pub overdraw_outer_px: Option<f64>,
    #[serde(default = "default_round_end_caps")]
    pub round_end_caps: bool,
}

impl Default for TargetLineConfig {
    fn default() -> Self {
        Self {
            overdraw_px: 0.0,
            overdraw_outer_px: None,
            round_end_caps: default_round_end_caps(),
        }
    }
}

/// Bar renderer configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRendererConfig {
    #[serde(default)]
    pub grouping: BarGroupingType,
    #[serde(default)]
    pub orientation: BarOrientation,
    #[serde(default)]
    pub rtl: bool,
    #[serde(default)]
    pub weight_pattern: Option<Vec<u32>>,
    #[serde(default)]
    pub max_bar_width_px: Option<f64>,
    #[serde(default = "default_bar_group_inner_padding_px")]
    pub bar_group_inner_padding_px: f64,
    #[serde(default = "default_stacked_bar_padding_px")]
    pub stacked_bar_padding_px: f64,
    #[serde(default)]
    pub corner_strategy: CornerStrategy,
    #[serde(default)]
    pub fill_pattern: FillPattern,
    #[serde(default)]
    pub stroke_width_px: f64,
    #[serde(default)]
    pub dash_pattern: Option<Vec<f64>>,
    #[serde(default)]
    pub target_line: TargetLineConfig,
}

impl Default for BarRendererConfig {
    fn default() -> Self {
        Self {
            grouping: BarGroupingType::default(),
            orientation: BarOrientation::default(),
            rtl: false,
            weight_pattern: None,
            max_bar_width_px: None,
            bar_group_inner_padding_px: default_bar_group_inner_padding_px(),
            stacked_bar_padding_px: default_stacked_bar_padding_px(),
            corner_strategy: CornerStrategy::default(),
            fill_pattern: FillPattern::default(),
            stroke_width_px: 0.0,
            dash_pattern: None,
            target_line: TargetLineConfig::default(),
        }
    }
}

impl BarRendererConfig {
    #[must_use]
    pub fn new(grouping: BarGroupingType) -> Self {
        Self {
            grouping,
            ..Self::default()
        }
    }

    /// Defaults for target-line renderers (3px strokes).
    #[must_use]
    pub fn for_target_lines(grouping: BarGroupingType) -> Self {
        Self {
            grouping,
            stroke_width_px: DEFAULT_TARGET_LINE_STROKE_WIDTH_PX,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: BarOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    /// Sets explicit relative widths for bar groups, in group order.
    #[must_use]
    pub fn with_weight_pattern(mut self, pattern: Vec<u32>) -> Self {
        self.weight_pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn with_max_bar_width_px(mut self, max_bar_width_px: f64) -> Self {
        self.max_bar_width_px = Some(max_bar_width_px);
        self
    }

    #[must_use]
    pub fn with_bar_group_inner_padding_px(mut self, padding_px: f64) -> Self {
        self.bar_group_inner_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_stacked_bar_padding_px(mut self, padding_px: f64) -> Self {
        self.stacked_bar_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_corner_strategy(mut self, strategy: CornerStrategy) -> Self {
        self.corner_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_fill_pattern(mut self, pattern: FillPattern) -> Self {
        self.fill_pattern = pattern;
        self
    }

    #[must_use]
    pub fn with_stroke_width_px(mut self, stroke_width_px: f64) -> Self {
        self.stroke_width_px = stroke_width_px;
        self
    }

    #[must_use]
    pub fn with_dash_pattern(mut self, dash_pattern: Vec<f64>) -> Self {
        self.dash_pattern = Some(dash_pattern);
        self
    }

    #[must_use]
    pub fn with_target_line(mut self, target_line: TargetLineConfig) -> Self {
        self.target_line = target_line;
        self
    }

    #[must_use]
    pub fn renders_vertically(&self) -> bool {
        self.orientation == BarOrientation::Vertical
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("bar group inner padding", self.bar_group_inner_padding_px),
            ("stacked bar padding", self.stacked_bar_padding_px),
            ("stroke width", self.stroke_width_px),
            ("target line overdraw", self.target_line.overdraw_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if let Some(outer) = self.target_line.overdraw_outer_px {
            if !outer.is_finite() || outer < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "target line outer overdraw must be finite and >= 0".to_owned(),
                ));
            }
        }
        if let Some(max_width) = self.max_bar_width_px {
            if !max_width.is_finite() || max_width <= 0.0 {
                return Err(ChartError::InvalidConfig(
                    "max bar width must be finite and > 0".to_owned(),
                ));
            }
        }
        if let CornerStrategy::Constant { radius_px } = self.corner_strategy {
            if !radius_px.is_finite() || radius_px < 0.0 {
                return Err(ChartError::InvalidConfig(
                    "corner radius must be finite and >= 0".to_owned(),
                ));
            }
        }
        if self
            .weight_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_empty())
        {
            return Err(ChartError::InvalidConfig(
                "weight pattern must not be empty".to_owned(),
            ));
        }
        if self
            .dash_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.iter().any(|v| !v.is_finite() || *v <= 0.0))
        {
            return Err(ChartError::InvalidConfig(
                "dash pattern segments must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

const DEFAULT_TARGET_LINE_STROKE_WIDTH_PX: f64 = 3.0;

fn default_bar_group_inner_padding_px() -> f64 {
    2.0
}

fn default_stacked_bar_padding_px() -> f64 {
    1.0
}

fn default_round_end_caps() -> bool {
    true
}
