//! Pure bar geometry: maps a datum and its group slot to pixel space.
//!
//! Every intermediate width and position is rounded half away from zero so
//! adjacent grouped and stacked bars share edges without 1px seams.

use crate::bars::config::BarOrientation;
use crate::core::primitives::round_px;
use crate::core::{DomainAxis, DomainValue, MeasureAxis, PixelPoint, PixelRect};

/// Position of one bar inside its domain slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGroupSlot<'a> {
    pub index: usize,
    pub count: usize,
    /// Share of the slot for this group; `None` means uniform.
    pub weight: Option<f64>,
    pub previous_weight: f64,
    /// Full weight vector; scales this bar's width relative to the average.
    pub all_weights: Option<&'a [f64]>,
}

impl<'a> BarGroupSlot<'a> {
    /// Uniform slot with no explicit weights.
    #[must_use]
    pub fn uniform(index: usize, count: usize) -> Self {
        Self {
            index,
            count,
            weight: None,
            previous_weight: 0.0,
            all_weights: None,
        }
    }

    #[must_use]
    pub fn weighted(
        index: usize,
        count: usize,
        weight: f64,
        previous_weight: f64,
        all_weights: &'a [f64],
    ) -> Self {
        Self {
            index,
            count,
            weight: Some(weight),
            previous_weight,
            all_weights: Some(all_weights),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayoutParams {
    pub inner_padding_px: f64,
    pub max_bar_width_px: Option<f64>,
    pub orientation: BarOrientation,
    pub rtl: bool,
}

/// Overdraw applied to target lines past the ends of their domain span.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TargetLineOverdraw {
    pub overdraw_px: f64,
    pub overdraw_outer_px: Option<f64>,
}

/// Domain-axis span of one bar, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainSpan {
    pub start: f64,
    pub width: f64,
    /// Physical left-to-right group position.
    pub adjusted_index: usize,
}

/// Per-group width before the 1px floor and before any max width cap.
///
/// Values below one pixel mean the slot is too narrow for its groups.
#[must_use]
pub fn desired_bar_width(domain_width_px: f64, group_count: usize, inner_padding_px: f64) -> f64 {
    let count = group_count.max(1) as f64;
    let spacing_loss = inner_padding_px * (count - 1.0);
    round_px((domain_width_px.abs() - spacing_loss) / count)
}

/// Computes where a bar sits along the domain axis.
#[must_use]
pub fn compute_domain_span(
    domain_pixel: f64,
    domain_width_px: f64,
    slot: BarGroupSlot<'_>,
    params: BarLayoutParams,
) -> DomainSpan {
    let count = slot.count.max(1);
    let count_f = count as f64;
    let mut domain_width_px = domain_width_px.abs();

    let spacing_loss = params.inner_padding_px * (count_f - 1.0);
    let mut desired_width = round_px((domain_width_px - spacing_loss) / count_f);

    if let Some(max_width) = params.max_bar_width_px {
        desired_width = desired_width.min(max_width);
        domain_width_px = desired_width * count_f + spacing_loss;
    }

    let mut bar_width = desired_width;
    if let Some(weight) = slot.all_weights.and_then(|weights| weights.get(slot.index)) {
        bar_width = round_px(desired_width * count_f * weight);
    }
    let bar_width = bar_width.max(1.0);

    let adjusted_index = if params.rtl {
        count.saturating_sub(slot.index + 1)
    } else {
        slot.index
    };

    // Uniform weights: every physically preceding group has weight 1/count.
    let previous_weight = match slot.weight {
        Some(_) => slot.previous_weight,
        None => adjusted_index as f64 / count_f,
    };

    let previous_average_width = if adjusted_index > 0 {
        round_px((domain_width_px - spacing_loss) * previous_weight / adjusted_index as f64)
    } else {
        0.0
    };

    let start = round_px(
        domain_pixel - domain_width_px / 2.0
            + (previous_average_width + params.inner_padding_px) * adjusted_index as f64,
    );

    DomainSpan {
        start,
        width: bar_width,
        adjusted_index,
    }
}

/// Maps a measure and its stacked offset to rounded `(measure_start,
/// measure_end)` pixels. Negative measures extend from the offset towards
/// smaller values.
fn measure_extent(
    measure: Option<f64>,
    measure_offset: f64,
    measure_axis: &dyn MeasureAxis,
) -> Option<(f64, f64)> {
    let measure = measure.unwrap_or(0.0);
    let (from, to) = if measure < 0.0 {
        (measure + measure_offset, measure_offset)
    } else {
        (measure_offset, measure + measure_offset)
    };
    let start = round_px(measure_axis.pixel_position(from)?);
    let end = round_px(measure_axis.pixel_position(to)?);
    Some((start, end))
}

/// Rectangle for one filled bar, or `None` when an axis cannot place it.
#[must_use]
pub fn compute_bar_bounds(
    domain: &DomainValue,
    domain_axis: &dyn DomainAxis,
    measure: Option<f64>,
    measure_offset: f64,
    measure_axis: &dyn MeasureAxis,
    slot: BarGroupSlot<'_>,
    params: BarLayoutParams,
) -> Option<PixelRect> {
    let domain_pixel = domain_axis.pixel_position(domain)?;
    let span = compute_domain_span(domain_pixel, domain_axis.range_band(), slot, params);
    let (measure_start, measure_end) = measure_extent(measure, measure_offset, measure_axis)?;

    Some(match params.orientation {
        BarOrientation::Vertical => PixelRect::new(
            span.start,
            measure_end,
            span.width,
            measure_start - measure_end,
        ),
        BarOrientation::Horizontal => PixelRect::new(
            measure_start.min(measure_end),
            span.start,
            (measure_end - measure_start).abs(),
            span.width,
        ),
    })
}

/// End points of one target line, or `None` when an axis cannot place it.
///
/// The line sits at `measure + measure_offset` and spans the bar's domain
/// range extended by the overdraw; the physically first and last groups use
/// the outer overdraw on their outer side when one is configured.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn compute_target_line_points(
    domain: &DomainValue,
    domain_axis: &dyn DomainAxis,
    measure: Option<f64>,
    measure_offset: f64,
    measure_axis: &dyn MeasureAxis,
    slot: BarGroupSlot<'_>,
    params: BarLayoutParams,
    overdraw: TargetLineOverdraw,
) -> Option<[PixelPoint; 2]> {
    let domain_pixel = domain_axis.pixel_position(domain)?;
    let span = compute_domain_span(domain_pixel, domain_axis.range_band(), slot, params);
    let last_index = slot.count.max(1) - 1;

    let overdraw_start = match overdraw.overdraw_outer_px {
        Some(outer) if span.adjusted_index == 0 => outer,
        _ => overdraw.overdraw_px,
    };
    let overdraw_end = match overdraw.overdraw_outer_px {
        Some(outer) if span.adjusted_index == last_index => outer,
        _ => overdraw.overdraw_px,
    };

    let domain_start = span.start - overdraw_start;
    let domain_end = domain_start + span.width + overdraw_start + overdraw_end;
    let measure_px =
        round_px(measure_axis.pixel_position(measure.unwrap_or(0.0) + measure_offset)?);

    Some(match params.orientation {
        BarOrientation::Vertical => [
            PixelPoint::new(domain_start, measure_px),
            PixelPoint::new(domain_end, measure_px),
        ],
        BarOrientation::Horizontal => [
            PixelPoint::new(measure_px, domain_start),
            PixelPoint::new(measure_px, domain_end),
        ],
    })
}
