//! Interpolation between two geometry snapshots.
//!
//! Progress is a scalar in `[0, 1]`; values outside are clamped. Rectangles
//! and points come out rounded to whole pixels so intermediate frames do not
//! open seams between adjacent bars.

use smallvec::{Array, SmallVec};

use crate::core::primitives::round_px;
use crate::core::{PixelPoint, PixelRect};
use crate::render::Color;

#[must_use]
pub fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress.clamp(0.0, 1.0)
}

/// Interpolates each edge independently and rounds the edges, so rectangles
/// that share an edge in both snapshots share it on every frame.
#[must_use]
pub fn interpolate_rect(previous: PixelRect, target: PixelRect, progress: f64) -> PixelRect {
    PixelRect::from_edges(
        round_px(lerp(previous.left, target.left, progress)),
        round_px(lerp(previous.top, target.top, progress)),
        round_px(lerp(previous.right(), target.right(), progress)),
        round_px(lerp(previous.bottom(), target.bottom(), progress)),
    )
}

#[must_use]
pub fn interpolate_point(previous: PixelPoint, target: PixelPoint, progress: f64) -> PixelPoint {
    PixelPoint::new(
        round_px(lerp(previous.x, target.x, progress)),
        round_px(lerp(previous.y, target.y, progress)),
    )
}

/// Interpolates a polyline towards `target`.
///
/// Target points with no counterpart in `previous` animate in from the last
/// matched target point's `y`; surplus points in `current` are dropped.
pub fn interpolate_points<A: Array<Item = PixelPoint>>(
    current: &mut SmallVec<A>,
    previous: &[PixelPoint],
    target: &[PixelPoint],
    progress: f64,
) {
    let mut last_point: Option<PixelPoint> = None;
    for (index, target_point) in target.iter().copied().enumerate() {
        let previous_point = match previous.get(index) {
            Some(point) => {
                last_point = Some(target_point);
                *point
            }
            None => PixelPoint::new(
                target_point.x,
                last_point.map_or(target_point.y, |point| point.y),
            ),
        };

        let point = interpolate_point(previous_point, target_point, progress);
        if let Some(slot) = current.get_mut(index) {
            *slot = point;
        } else {
            current.push(point);
        }
    }
    current.truncate(target.len());
}

#[must_use]
pub fn lerp_color(previous: Color, target: Color, progress: f64) -> Color {
    Color::rgba(
        lerp(previous.red, target.red, progress),
        lerp(previous.green, target.green, progress),
        lerp(previous.blue, target.blue, progress),
        lerp(previous.alpha, target.alpha, progress),
    )
}

/// Interpolates optional colors; a missing side snaps to the other.
#[must_use]
pub fn lerp_optional_color(
    previous: Option<Color>,
    target: Option<Color>,
    progress: f64,
) -> Option<Color> {
    match (previous, target) {
        (Some(previous), Some(target)) => Some(lerp_color(previous, target, progress)),
        (None, target) => target,
        (previous, None) => previous,
    }
}
