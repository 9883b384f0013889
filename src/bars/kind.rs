//! Capability interface implemented per bar variant, plus the two variants
//! drawn by the bar core: filled bars and target lines.

use smallvec::SmallVec;

use crate::bars::config::{BarOrientation, BarRendererConfig};
use crate::bars::element::{BarElement, BarRenderElement, ElementStyle, TargetLineElement};
use crate::bars::geometry::{
    BarGroupSlot, BarLayoutParams, TargetLineOverdraw, compute_bar_bounds,
    compute_target_line_points,
};
use crate::bars::preprocess::{DatumLayout, SeriesLayout};
use crate::core::primitives::round_px;
use crate::core::{BarSeries, DomainAxis, MeasureAxis, PixelRect};
use crate::render::{
    BarStackPrimitive, ChartCanvas, Color, LinePrimitive, RectPrimitive, RoundedCorners,
};

/// Fallback color for data with neither a datum nor a series color.
pub const DEFAULT_BAR_COLOR: Color = Color::rgb(0.26, 0.52, 0.96);

/// Everything needed to build one element for one datum.
#[derive(Clone, Copy)]
pub struct ElementContext<'a> {
    pub series: &'a BarSeries,
    pub layout: &'a SeriesLayout,
    pub datum_index: usize,
    pub datum_layout: DatumLayout,
    pub measure: Option<f64>,
    pub measure_offset: f64,
    pub domain_axis: &'a dyn DomainAxis,
    pub measure_axis: &'a dyn MeasureAxis,
    pub config: &'a BarRendererConfig,
}

impl<'a> ElementContext<'a> {
    /// The same datum with a zero measure at the axis, where new elements
    /// start growing from.
    #[must_use]
    pub fn collapsed(self) -> Self {
        Self {
            measure: Some(0.0),
            measure_offset: 0.0,
            ..self
        }
    }

    #[must_use]
    pub fn slot(&self) -> BarGroupSlot<'a> {
        BarGroupSlot::weighted(
            self.layout.group_index,
            self.layout.group_count,
            self.layout.group_weight,
            self.layout.previous_group_weight,
            &self.layout.all_group_weights,
        )
    }

    #[must_use]
    pub fn layout_params(&self) -> BarLayoutParams {
        BarLayoutParams {
            inner_padding_px: self.config.bar_group_inner_padding_px,
            max_bar_width_px: self.config.max_bar_width_px,
            orientation: self.config.orientation,
            rtl: self.config.rtl,
        }
    }

    /// Resolved style; `None` when the datum index is out of range or the
    /// measure axis cannot place zero.
    #[must_use]
    pub fn style(&self) -> Option<ElementStyle> {
        let datum = self.series.data.get(self.datum_index)?;
        Some(ElementStyle {
            color: self.series.color(self.datum_index),
            fill_color: self.series.fill_color(self.datum_index),
            fill_pattern: self.datum_layout.fill_pattern,
            dash_pattern: datum
                .dash_pattern
                .clone()
                .or_else(|| self.config.dash_pattern.clone()),
            stroke_width_px: self.datum_layout.stroke_width_px,
            measure_is_null: self.measure.is_none(),
            measure_is_negative: self.measure.is_some_and(|measure| measure < 0.0),
            measure_axis_position: round_px(self.measure_axis.pixel_position(0.0)?),
        })
    }
}

/// Per-variant behavior plugged into [`crate::bars::BarRenderer`].
pub trait BarKind {
    type Element: BarRenderElement;

    /// Builds the target element for a datum, or `None` when it cannot be placed.
    fn make_element(&self, ctx: &ElementContext<'_>) -> Option<Self::Element>;

    /// Draws the interpolated elements of one bar stack.
    fn paint_stack(
        &self,
        canvas: &mut dyn ChartCanvas,
        elements: &[Self::Element],
        config: &BarRendererConfig,
        draw_bounds: Option<PixelRect>,
    );
}

/// Filled rectangles stacked with padding and optional rounded corners.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilledBars;

impl BarKind for FilledBars {
    type Element = BarElement;

    fn make_element(&self, ctx: &ElementContext<'_>) -> Option<BarElement> {
        let datum = ctx.series.data.get(ctx.datum_index)?;
        let bounds = compute_bar_bounds(
            &datum.domain,
            ctx.domain_axis,
            ctx.measure,
            ctx.measure_offset,
            ctx.measure_axis,
            ctx.slot(),
            ctx.layout_params(),
        )?;
        Some(BarElement {
            bounds,
            style: ctx.style()?,
        })
    }

    fn paint_stack(
        &self,
        canvas: &mut dyn ChartCanvas,
        elements: &[BarElement],
        config: &BarRendererConfig,
        draw_bounds: Option<PixelRect>,
    ) {
        if elements.is_empty() {
            return;
        }
        let vertical = config.renders_vertically();
        let padding = config.stacked_bar_padding_px;
        // The segment touching the axis (vertical) or the outermost one
        // (horizontal) keeps its full size.
        let unmodified_index = if vertical { 0 } else { elements.len() - 1 };

        let mut measure_is_negative = false;
        let mut max_bar_width = 0.0_f64;
        let mut segments = Vec::with_capacity(elements.len());

        for (index, element) in elements.iter().enumerate() {
            measure_is_negative |= element.style.measure_is_negative;
            let mut bounds = element.bounds;

            if index != unmodified_index {
                let shift = if measure_is_negative { padding } else { 0.0 };
                bounds = if vertical {
                    PixelRect::new(
                        bounds.left,
                        (bounds.top + shift).max(0.0),
                        bounds.width,
                        bounds.height - padding,
                    )
                } else {
                    PixelRect::new(
                        (bounds.left + shift).max(0.0),
                        bounds.top,
                        bounds.width - padding,
                        bounds.height,
                    )
                };
            }

            if bounds.is_empty() {
                continue;
            }
            max_bar_width = max_bar_width.max(if vertical { bounds.width } else { bounds.height });
            segments.push(segment_primitive(bounds, &element.style));
        }

        let corners = rounded_corners(config.orientation, measure_is_negative, config.rtl);
        let radius = config.corner_strategy.radius(max_bar_width);
        let Some(stack) = BarStackPrimitive::new(segments, radius, padding, corners) else {
            return;
        };

        let clip = match draw_bounds {
            Some(draw_bounds) => match domain_axis_clip(stack.full_stack_rect, draw_bounds, vertical)
            {
                Some(clip) if clip.is_empty() => return,
                clip => clip,
            },
            None => None,
        };
        canvas.draw_rect_stack(&stack, clip);
    }
}

fn segment_primitive(bounds: PixelRect, style: &ElementStyle) -> RectPrimitive {
    let stroke_color = style.color.unwrap_or(DEFAULT_BAR_COLOR);
    let mut rect = RectPrimitive::new(bounds, Some(style.fill_color.unwrap_or(stroke_color)));
    if style.stroke_width_px > 0.0 {
        rect.stroke = Some(stroke_color);
        rect.stroke_width_px = style.stroke_width_px;
        rect.dash_pattern.clone_from(&style.dash_pattern);
    }
    rect.pattern = style.fill_pattern;
    rect
}

/// Corners on the end of the stack that points away from the axis.
fn rounded_corners(orientation: BarOrientation, negative: bool, rtl: bool) -> RoundedCorners {
    match orientation {
        BarOrientation::Vertical => RoundedCorners {
            top_left: !negative,
            top_right: !negative,
            bottom_left: negative,
            bottom_right: negative,
        },
        BarOrientation::Horizontal => {
            let right = negative == rtl;
            RoundedCorners {
                top_left: !right,
                top_right: right,
                bottom_left: !right,
                bottom_right: right,
            }
        }
    }
}

/// Clips a stack to the draw bounds along the domain axis only. `None` when
/// the stack already fits.
fn domain_axis_clip(stack: PixelRect, draw_bounds: PixelRect, vertical: bool) -> Option<PixelRect> {
    if vertical {
        if stack.left >= draw_bounds.left && stack.right() <= draw_bounds.right() {
            return None;
        }
        Some(PixelRect::from_edges(
            stack.left.max(draw_bounds.left),
            stack.top,
            stack.right().min(draw_bounds.right()),
            stack.bottom(),
        ))
    } else {
        if stack.top >= draw_bounds.top && stack.bottom() <= draw_bounds.bottom() {
            return None;
        }
        Some(PixelRect::from_edges(
            stack.left,
            stack.top.max(draw_bounds.top),
            stack.right(),
            stack.bottom().min(draw_bounds.bottom()),
        ))
    }
}

/// Short lines marking a target value across each bar's domain span.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetLines;

impl BarKind for TargetLines {
    type Element = TargetLineElement;

    fn make_element(&self, ctx: &ElementContext<'_>) -> Option<TargetLineElement> {
        let datum = ctx.series.data.get(ctx.datum_index)?;
        let target = &ctx.config.target_line;
        let points = compute_target_line_points(
            &datum.domain,
            ctx.domain_axis,
            ctx.measure,
            ctx.measure_offset,
            ctx.measure_axis,
            ctx.slot(),
            ctx.layout_params(),
            TargetLineOverdraw {
                overdraw_px: target.overdraw_px,
                overdraw_outer_px: target.overdraw_outer_px,
            },
        )?;
        Some(TargetLineElement {
            points: SmallVec::from_buf(points),
            round_end_caps: target.round_end_caps,
            style: ctx.style()?,
        })
    }

    fn paint_stack(
        &self,
        canvas: &mut dyn ChartCanvas,
        elements: &[TargetLineElement],
        _config: &BarRendererConfig,
        _draw_bounds: Option<PixelRect>,
    ) {
        for element in elements {
            if element.points.len() < 2 || element.style.stroke_width_px <= 0.0 {
                continue;
            }
            let mut line = LinePrimitive::new(
                &element.points,
                element.style.color.unwrap_or(DEFAULT_BAR_COLOR),
                element.style.stroke_width_px,
            );
            line.dash_pattern.clone_from(&element.style.dash_pattern);
            line.round_end_caps = element.round_end_caps;
            canvas.draw_line(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{domain_axis_clip, rounded_corners};
    use crate::bars::config::BarOrientation;
    use crate::core::PixelRect;

    #[test]
    fn horizontal_positive_rounds_right_side_unless_rtl() {
        let ltr = rounded_corners(BarOrientation::Horizontal, false, false);
        assert!(ltr.top_right && ltr.bottom_right && !ltr.top_left);
        let rtl = rounded_corners(BarOrientation::Horizontal, false, true);
        assert!(rtl.top_left && rtl.bottom_left && !rtl.top_right);
        let negative = rounded_corners(BarOrientation::Horizontal, true, false);
        assert!(negative.top_left && !negative.top_right);
    }

    #[test]
    fn clip_only_touches_domain_axis() {
        let draw = PixelRect::new(0.0, 0.0, 100.0, 100.0);
        let stack = PixelRect::new(90.0, -20.0, 20.0, 150.0);
        let clip = domain_axis_clip(stack, draw, true).expect("clip");
        assert_eq!(clip, PixelRect::new(90.0, -20.0, 10.0, 150.0));
        assert!(domain_axis_clip(PixelRect::new(10.0, -5.0, 5.0, 5.0), draw, true).is_none());
    }
}
