pub mod axis;
pub mod interpolate;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod types;

pub use axis::{DomainAxis, LinearDomainAxis, MeasureAxis, OrdinalAxis};
pub use scale::LinearScale;
pub use series::{BarDatum, BarSeries};
pub use types::{DomainValue, PixelPoint, PixelRect, Viewport};
