//! Per-datum render elements and the style they animate with.

use std::fmt::Debug;

use smallvec::SmallVec;

use crate::bars::config::BarOrientation;
use crate::core::interpolate::{interpolate_points, interpolate_rect, lerp, lerp_optional_color};
use crate::core::primitives::round_px;
use crate::core::{PixelPoint, PixelRect};
use crate::render::{Color, FillPattern};

/// Styling and sign information carried by every bar element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub color: Option<Color>,
    pub fill_color: Option<Color>,
    pub fill_pattern: FillPattern,
    pub dash_pattern: Option<Vec<f64>>,
    pub stroke_width_px: f64,
    pub measure_is_null: bool,
    pub measure_is_negative: bool,
    /// Pixel position of measure zero; collapsed elements sit here.
    pub measure_axis_position: f64,
}

impl ElementStyle {
    /// Colors and stroke width interpolate; flags and patterns snap to the target.
    fn interpolate(&mut self, previous: &Self, target: &Self, progress: f64) {
        self.color = lerp_optional_color(previous.color, target.color, progress);
        self.fill_color = lerp_optional_color(previous.fill_color, target.fill_color, progress);
        self.stroke_width_px = lerp(previous.stroke_width_px, target.stroke_width_px, progress);
        self.fill_pattern = target.fill_pattern;
        self.dash_pattern.clone_from(&target.dash_pattern);
        self.measure_is_null = target.measure_is_null;
        self.measure_is_negative = target.measure_is_negative;
        self.measure_axis_position = target.measure_axis_position;
    }
}

/// Geometry snapshot that can be animated by [`crate::bars::AnimatedElement`].
pub trait BarRenderElement: Clone + Debug {
    fn style(&self) -> &ElementStyle;

    /// Sets `self` to the state between `previous` and `target` at `progress`.
    fn interpolate(&mut self, previous: &Self, target: &Self, progress: f64);

    /// Collapses the geometry onto the measure-axis zero line.
    fn collapse_to_measure_axis(&mut self, orientation: BarOrientation);

    /// Pixel bounds used for hit testing.
    fn bounds(&self) -> PixelRect;

    fn measure_is_null(&self) -> bool {
        self.style().measure_is_null
    }

    fn measure_is_negative(&self) -> bool {
        self.style().measure_is_negative
    }
}

/// One filled bar segment.
#[derive(Debug, Clone, PartialEq)]
pub struct BarElement {
    pub bounds: PixelRect,
    pub style: ElementStyle,
}

impl BarRenderElement for BarElement {
    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn interpolate(&mut self, previous: &Self, target: &Self, progress: f64) {
        self.bounds = interpolate_rect(previous.bounds, target.bounds, progress);
        self.style.interpolate(&previous.style, &target.style, progress);
    }

    fn collapse_to_measure_axis(&mut self, orientation: BarOrientation) {
        let axis = self.style.measure_axis_position;
        let bounds = self.bounds;
        self.bounds = match orientation {
            BarOrientation::Vertical => {
                PixelRect::new(round_px(bounds.left + bounds.width / 2.0), axis, 0.0, 0.0)
            }
            BarOrientation::Horizontal => {
                PixelRect::new(axis, round_px(bounds.top + bounds.height / 2.0), 0.0, 0.0)
            }
        };
    }

    fn bounds(&self) -> PixelRect {
        self.bounds
    }
}

/// One target line marker.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetLineElement {
    pub points: SmallVec<[PixelPoint; 2]>,
    pub round_end_caps: bool,
    pub style: ElementStyle,
}

impl BarRenderElement for TargetLineElement {
    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn interpolate(&mut self, previous: &Self, target: &Self, progress: f64) {
        interpolate_points(&mut self.points, &previous.points, &target.points, progress);
        self.round_end_caps = target.round_end_caps;
        self.style.interpolate(&previous.style, &target.style, progress);
    }

    fn collapse_to_measure_axis(&mut self, orientation: BarOrientation) {
        let axis = self.style.measure_axis_position;
        for point in &mut self.points {
            match orientation {
                BarOrientation::Vertical => point.y = axis,
                BarOrientation::Horizontal => point.x = axis,
            }
        }
    }

    fn bounds(&self) -> PixelRect {
        let Some(first) = self.points.first() else {
            return PixelRect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for point in &self.points[1..] {
            left = left.min(point.x);
            top = top.min(point.y);
            right = right.max(point.x);
            bottom = bottom.max(point.y);
        }
        PixelRect::from_edges(left, top, right, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::{BarElement, BarRenderElement, ElementStyle, TargetLineElement};
    use crate::bars::config::BarOrientation;
    use crate::core::{PixelPoint, PixelRect};
    use crate::render::{Color, FillPattern};
    use smallvec::smallvec;

    fn style(axis: f64) -> ElementStyle {
        ElementStyle {
            color: Some(Color::rgb(0.0, 0.0, 0.0)),
            fill_color: None,
            fill_pattern: FillPattern::Solid,
            dash_pattern: None,
            stroke_width_px: 0.0,
            measure_is_null: false,
            measure_is_negative: false,
            measure_axis_position: axis,
        }
    }

    #[test]
    fn bar_collapses_to_center_of_domain_span() {
        let mut bar = BarElement {
            bounds: PixelRect::new(10.0, 20.0, 30.0, 80.0),
            style: style(100.0),
        };
        bar.collapse_to_measure_axis(BarOrientation::Vertical);
        assert_eq!(bar.bounds, PixelRect::new(25.0, 100.0, 0.0, 0.0));
    }

    #[test]
    fn horizontal_target_line_collapses_measure_x() {
        let mut line = TargetLineElement {
            points: smallvec![PixelPoint::new(80.0, 10.0), PixelPoint::new(80.0, 40.0)],
            round_end_caps: true,
            style: style(5.0),
        };
        line.collapse_to_measure_axis(BarOrientation::Horizontal);
        assert_eq!(line.points[0], PixelPoint::new(5.0, 10.0));
        assert_eq!(line.points[1], PixelPoint::new(5.0, 40.0));
        assert_eq!(line.bounds(), PixelRect::new(5.0, 10.0, 0.0, 30.0));
    }

    #[test]
    fn style_snaps_flags_and_blends_stroke() {
        let previous = BarElement {
            bounds: PixelRect::new(0.0, 0.0, 10.0, 10.0),
            style: style(0.0),
        };
        let mut target = previous.clone();
        target.style.stroke_width_px = 4.0;
        target.style.measure_is_negative = true;
        let mut current = previous.clone();
        current.interpolate(&previous, &target, 0.5);
        assert_eq!(current.style.stroke_width_px, 2.0);
        assert!(current.style.measure_is_negative);
    }
}
