//! chart-bars: animated bar-chart rendering core.
//!
//! Series are preprocessed into grouped/stacked layouts, reconciled into
//! animated bar elements, and painted through a backend-agnostic canvas.

pub mod api;
pub mod bars;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{BarChartEngine, BarChartEngineConfig};
pub use error::{ChartError, ChartResult};
