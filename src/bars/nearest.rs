use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::bars::animated::AnimatedElement;
use crate::bars::element::BarRenderElement;
use crate::core::primitives::round_px;
use crate::core::{DomainValue, PixelPoint, PixelRect};

/// One datum found by a nearest-datum query.
#[derive(Debug, Clone, PartialEq)]
pub struct DatumMatch {
    pub series_id: String,
    pub datum_index: usize,
    pub domain: DomainValue,
    pub bounds: PixelRect,
    pub domain_distance: f64,
    pub measure_distance: f64,
    /// Straight-line distance from the pointer to the closest point of `bounds`.
    pub relative_distance: f64,
}

/// Gap between `point` and the closed span `[lo, hi]`; 0 inside it.
#[must_use]
pub fn distance_to_span(point: f64, lo: f64, hi: f64) -> f64 {
    if point > hi {
        point - hi
    } else if point < lo {
        lo - point
    } else {
        0.0
    }
}

fn compare_matches(left: &DatumMatch, right: &DatumMatch, by_domain: bool) -> Ordering {
    if by_domain {
        (
            OrderedFloat(left.domain_distance),
            OrderedFloat(left.measure_distance),
        )
            .cmp(&(
                OrderedFloat(right.domain_distance),
                OrderedFloat(right.measure_distance),
            ))
    } else {
        OrderedFloat(left.relative_distance).cmp(&OrderedFloat(right.relative_distance))
    }
}

/// Orders matches nearest-first, by (domain, measure) distance or by relative
/// distance. The sort is stable, so equal matches keep their input order.
pub fn sort_datum_matches(matches: &mut [DatumMatch], by_domain: bool) {
    matches.sort_by(|left, right| compare_matches(left, right, by_domain));
}

/// Measures every live candidate against `point` and orders the matches.
///
/// With `nearest_domain_only`, matches are reduced to those sharing the
/// domain of the single nearest match.
pub(crate) fn locate<E: BarRenderElement>(
    candidates: Vec<&AnimatedElement<E>>,
    point: PixelPoint,
    vertical: bool,
    by_domain: bool,
    nearest_domain_only: bool,
) -> Vec<DatumMatch> {
    let pointer = PixelPoint::new(round_px(point.x), round_px(point.y));

    let mut matches: Vec<DatumMatch> = candidates
        .into_iter()
        .filter(|element| !element.is_animating_out() && !element.current().measure_is_null())
        .map(|element| {
            let bounds = element.current().bounds();
            let horizontal_distance = distance_to_span(pointer.x, bounds.left, bounds.right());
            let vertical_distance = distance_to_span(pointer.y, bounds.top, bounds.bottom());
            let (domain_distance, measure_distance) = if vertical {
                (horizontal_distance, vertical_distance)
            } else {
                (vertical_distance, horizontal_distance)
            };
            let binding = element.binding();
            DatumMatch {
                series_id: binding.series_id.clone(),
                datum_index: binding.datum_index,
                domain: binding.domain.clone(),
                bounds,
                domain_distance,
                measure_distance,
                relative_distance: pointer.distance_to(bounds.clamp_point(pointer)),
            }
        })
        .collect();

    if nearest_domain_only {
        let nearest_domain = matches
            .iter()
            .min_by(|left, right| compare_matches(left, right, by_domain))
            .map(|best| best.domain.clone());
        if let Some(domain) = nearest_domain {
            matches.retain(|candidate| candidate.domain == domain);
        }
    }

    sort_datum_matches(&mut matches, by_domain);
    matches
}
