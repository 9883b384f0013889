//! Bar-rendering core: grouping, stacking and weighting of series into bar
//! geometry, animated element reconciliation, and nearest-datum search.

mod animated;
mod config;
mod element;
mod geometry;
mod kind;
mod nearest;
mod preprocess;
mod renderer;

pub use animated::{AnimatedElement, DatumBinding};
pub use config::{
    BarGroupingType, BarOrientation, BarRendererConfig, CornerStrategy, TargetLineConfig,
};
pub use element::{BarElement, BarRenderElement, ElementStyle, TargetLineElement};
pub use geometry::{
    BarGroupSlot, BarLayoutParams, DomainSpan, TargetLineOverdraw, compute_bar_bounds,
    compute_domain_span, compute_target_line_points, desired_bar_width,
};
pub use kind::{BarKind, DEFAULT_BAR_COLOR, ElementContext, FilledBars, TargetLines};
pub use nearest::{DatumMatch, distance_to_span, sort_datum_matches};
pub use preprocess::{
    DEFAULT_STACK_KEY, DatumLayout, PreparedSeries, SeriesLayout, bar_group_weights,
    order_series_for_rendering, preprocess_series, previous_group_weight,
};
pub use renderer::{BarRenderer, FilledBarRenderer, SyncStats, TargetLineRenderer};
