use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PixelPoint, PixelRect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillPattern {
    #[default]
    Solid,
    ForwardHatch,
}

fn validate_dash_pattern(dash_pattern: Option<&[f64]>) -> ChartResult<()> {
    if let Some(pattern) = dash_pattern {
        if pattern.iter().any(|segment| !segment.is_finite() || *segment <= 0.0) {
            return Err(ChartError::InvalidData(
                "dash pattern segments must be finite and > 0".to_owned(),
            ));
        }
    }
    Ok(())
}

fn validate_stroke_width(stroke_width_px: f64) -> ChartResult<()> {
    if !stroke_width_px.is_finite() || stroke_width_px < 0.0 {
        return Err(ChartError::InvalidData(
            "stroke width must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

/// Draw command for one filled/stroked rectangle in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub bounds: PixelRect,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width_px: f64,
    pub pattern: FillPattern,
    pub dash_pattern: Option<Vec<f64>>,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(bounds: PixelRect, fill: Option<Color>) -> Self {
        Self {
            bounds,
            fill,
            stroke: None,
            stroke_width_px: 0.0,
            pattern: FillPattern::Solid,
            dash_pattern: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.bounds.is_finite() {
            return Err(ChartError::InvalidData(
                "rect bounds must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width_px)?;
        validate_dash_pattern(self.dash_pattern.as_deref())?;
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Which corners of a bar stack's outline are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundedCorners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl RoundedCorners {
    #[must_use]
    pub fn any(self) -> bool {
        self.top_left || self.top_right || self.bottom_left || self.bottom_right
    }
}

/// Ordered segments of one bar stack sharing a common outline.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStackPrimitive {
    pub segments: Vec<RectPrimitive>,
    pub radius_px: f64,
    pub stacked_bar_padding_px: f64,
    pub rounded_corners: RoundedCorners,
    /// Rectangle covering every segment plus the padding between them.
    pub full_stack_rect: PixelRect,
}

impl BarStackPrimitive {
    /// Builds a stack; returns `None` for an empty segment list.
    #[must_use]
    pub fn new(
        segments: Vec<RectPrimitive>,
        radius_px: f64,
        stacked_bar_padding_px: f64,
        rounded_corners: RoundedCorners,
    ) -> Option<Self> {
        let first = segments.first()?.bounds;
        let mut left = first.left;
        let mut top = first.top;
        let mut right = first.right();
        let mut bottom = first.bottom();

        for segment in segments.iter().skip(1) {
            let bounds = segment.bounds;
            left = left.min(bounds.left - stacked_bar_padding_px);
            top = top.min(bounds.top - stacked_bar_padding_px);
            right = right.max(bounds.right() + stacked_bar_padding_px);
            bottom = bottom.max(bounds.bottom() + stacked_bar_padding_px);
        }

        Some(Self {
            segments,
            radius_px,
            stacked_bar_padding_px,
            rounded_corners,
            full_stack_rect: PixelRect::from_edges(left, top, right, bottom),
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.radius_px.is_finite() || self.radius_px < 0.0 {
            return Err(ChartError::InvalidData(
                "bar stack radius must be finite and >= 0".to_owned(),
            ));
        }
        for segment in &self.segments {
            segment.validate()?;
        }
        Ok(())
    }
}

/// Draw command for one polyline in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub points: SmallVec<[PixelPoint; 2]>,
    pub stroke: Color,
    pub stroke_width_px: f64,
    pub dash_pattern: Option<Vec<f64>>,
    pub round_end_caps: bool,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(points: &[PixelPoint], stroke: Color, stroke_width_px: f64) -> Self {
        Self {
            points: SmallVec::from_slice(points),
            stroke,
            stroke_width_px,
            dash_pattern: None,
            round_end_caps: false,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.len() < 2 {
            return Err(ChartError::InvalidData(
                "line requires at least two points".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width_px.is_finite() || self.stroke_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        validate_dash_pattern(self.dash_pattern.as_deref())?;
        self.stroke.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub rotation_radians: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_radians: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_radians: f64) -> Self {
        self.rotation_radians = rotation_radians;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_radians.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::{BarStackPrimitive, RectPrimitive, RoundedCorners};
    use crate::core::PixelRect;

    #[test]
    fn full_stack_rect_includes_padding_between_segments() {
        let segments = vec![
            RectPrimitive::new(PixelRect::new(10.0, 100.0, 20.0, 200.0), None),
            RectPrimitive::new(PixelRect::new(10.0, 0.0, 20.0, 99.0), None),
        ];
        let stack = BarStackPrimitive::new(segments, 0.0, 1.0, RoundedCorners::default())
            .expect("stack");
        assert_eq!(stack.full_stack_rect, PixelRect::new(9.0, -1.0, 22.0, 301.0));
    }

    #[test]
    fn empty_stack_is_rejected() {
        assert!(BarStackPrimitive::new(Vec::new(), 0.0, 1.0, RoundedCorners::default()).is_none());
    }
}
