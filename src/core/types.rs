use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Full drawable area of this viewport in pixel space.
    #[must_use]
    pub fn bounds(self) -> PixelRect {
        PixelRect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle in pixel space.
///
/// Negative extents are clamped to zero on construction, so a rectangle
/// always has `right() >= left` and `bottom() >= top`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Returns `true` when the rectangle covers no pixels.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[must_use]
    pub fn contains_point(self, point: PixelPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Nearest point inside (or on the edge of) this rectangle.
    #[must_use]
    pub fn clamp_point(self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            point.x.clamp(self.left, self.right()),
            point.y.clamp(self.top, self.bottom()),
        )
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Value positioned along the domain axis.
///
/// Ordinal axes address `Category` values; continuous axes address `Numeric`
/// values (plain numbers or unix seconds for time domains).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainValue {
    Category(String),
    Numeric(f64),
}

impl DomainValue {
    #[must_use]
    pub fn category(value: impl Into<String>) -> Self {
        Self::Category(value.into())
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        Self::Numeric(datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(value) => Some(value),
            Self::Numeric(_) => None,
        }
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Category(_) => None,
            Self::Numeric(value) => Some(*value),
        }
    }
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(value) => f.write_str(value),
            Self::Numeric(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

impl From<f64> for DomainValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}
