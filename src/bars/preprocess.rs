//! Per-pass series preprocessing: render order, group weights and stacked
//! measure offsets.

use indexmap::IndexMap;
use tracing::debug;

use crate::bars::config::{BarGroupingType, BarOrientation, BarRendererConfig};
use crate::core::BarSeries;
use crate::error::{ChartError, ChartResult};
use crate::render::FillPattern;

/// Stack key shared by every series unless grouped-stacked mode keys stacks
/// by series category.
pub const DEFAULT_STACK_KEY: &str = "__defaultKey__";

/// Group placement computed once per series per preprocessing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayout {
    pub stack_key: String,
    pub group_index: usize,
    pub group_count: usize,
    pub group_weight: f64,
    /// Sum of the weights of groups physically drawn before this one.
    pub previous_group_weight: f64,
    pub all_group_weights: Vec<f64>,
}

/// Stacking details for one datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatumLayout {
    pub bar_stack_index: usize,
    pub measure_offset: f64,
    pub cumulative_total: f64,
    pub measure_offset_plus_measure: f64,
    pub fill_pattern: FillPattern,
    pub stroke_width_px: f64,
}

/// A borrowed series together with its computed layout.
#[derive(Debug, Clone)]
pub struct PreparedSeries<'a> {
    pub series: &'a BarSeries,
    pub layout: SeriesLayout,
    pub data: Vec<DatumLayout>,
}

impl PreparedSeries<'_> {
    /// Stacked measure offset for a datum; 0 for an out-of-range index.
    #[must_use]
    pub fn measure_offset(&self, index: usize) -> f64 {
        self.data.get(index).map_or(0.0, |datum| datum.measure_offset)
    }

    #[must_use]
    pub fn datum_layout(&self, index: usize) -> Option<&DatumLayout> {
        self.data.get(index)
    }
}

/// Sign bucket used for both stack accumulation and element keys.
/// Null measures share the negative bucket.
#[must_use]
pub(crate) fn measure_sign_key(measure: Option<f64>) -> &'static str {
    match measure {
        Some(value) if value >= 0.0 => "pos",
        _ => "neg",
    }
}

fn series_category(series: &BarSeries) -> &str {
    series.category.as_deref().unwrap_or(DEFAULT_STACK_KEY)
}

/// Orders series the way stacks are painted.
///
/// Vertical stacks draw bottom-up, so the input order is reversed: within each
/// category for grouped-stacked charts (categories keep first-seen order), or
/// across the whole list for stacked-only charts. Every other combination
/// keeps the input order.
#[must_use]
pub fn order_series_for_rendering<'a>(
    series_list: &'a [BarSeries],
    grouping: BarGroupingType,
    orientation: BarOrientation,
) -> Vec<&'a BarSeries> {
    if orientation != BarOrientation::Vertical || !grouping.is_stacked() {
        return series_list.iter().collect();
    }

    if grouping.is_grouped() {
        let mut by_category: IndexMap<&str, Vec<&BarSeries>> = IndexMap::new();
        for series in series_list {
            by_category
                .entry(series_category(series))
                .or_default()
                .push(series);
        }
        by_category
            .into_values()
            .flat_map(|group| group.into_iter().rev())
            .collect()
    } else {
        series_list.iter().rev().collect()
    }
}

/// Relative width of each bar group.
///
/// With an explicit pattern, group `i` gets `pattern[i] / sum(pattern[..num_groups])`;
/// otherwise every group gets `1 / num_groups`.
pub fn bar_group_weights(num_groups: usize, pattern: Option<&[u32]>) -> ChartResult<Vec<f64>> {
    if num_groups == 0 {
        return Ok(Vec::new());
    }

    let Some(pattern) = pattern else {
        return Ok(vec![1.0 / num_groups as f64; num_groups]);
    };

    if pattern.len() < num_groups {
        return Err(ChartError::WeightPatternTooShort {
            pattern_len: pattern.len(),
            num_groups,
        });
    }

    let used = &pattern[..num_groups];
    let total: f64 = used.iter().map(|weight| f64::from(*weight)).sum();
    if total <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "weight pattern must have a positive sum over the used groups".to_owned(),
        ));
    }
    Ok(used
        .iter()
        .map(|weight| f64::from(*weight) / total)
        .collect())
}

/// Sum of the weights of groups drawn before `group_index`. Under RTL the
/// physically first group is the last logical one.
#[must_use]
pub fn previous_group_weight(weights: &[f64], group_index: usize, rtl: bool) -> f64 {
    let range = if rtl {
        weights.get(group_index + 1..).unwrap_or_default()
    } else {
        weights.get(..group_index).unwrap_or(weights)
    };
    range.iter().sum()
}

#[derive(Debug, Clone, Copy)]
struct StackAccumulator {
    bar_stack_index: usize,
    measure_offset_plus_measure: f64,
    cumulative_total: f64,
}

/// Computes series layouts and stacked offsets for one data pass.
///
/// The returned list is in render order (see [`order_series_for_rendering`]).
/// A weight pattern shorter than the number of bar groups is a configuration
/// error; missing accessors fall back to neutral defaults.
pub fn preprocess_series<'a>(
    series_list: &'a [BarSeries],
    config: &BarRendererConfig,
) -> ChartResult<Vec<PreparedSeries<'a>>> {
    let ordered = order_series_for_rendering(series_list, config.grouping, config.orientation);
    let grouping = config.grouping;
    let grouped_stacked = grouping == BarGroupingType::GroupedStacked;

    let mut category_to_index: IndexMap<&str, usize> = IndexMap::new();
    if grouped_stacked {
        for series in &ordered {
            let next = category_to_index.len();
            category_to_index
                .entry(series_category(series))
                .or_insert(next);
        }
    }

    let num_groups = match grouping {
        BarGroupingType::GroupedStacked => category_to_index.len(),
        BarGroupingType::Stacked => 1,
        BarGroupingType::Grouped => ordered.len(),
    };
    let weights = bar_group_weights(num_groups, config.weight_pattern.as_deref())?;

    debug!(
        series = ordered.len(),
        groups = num_groups,
        grouping = ?grouping,
        "preprocess bar series"
    );

    let mut stacks: IndexMap<String, StackAccumulator> = IndexMap::new();
    let mut prepared = Vec::with_capacity(ordered.len());
    let mut next_group_index = 0usize;

    for series in ordered {
        let stack_key = if grouped_stacked {
            series_category(series).to_owned()
        } else {
            DEFAULT_STACK_KEY.to_owned()
        };

        let group_index = match grouping {
            BarGroupingType::GroupedStacked => category_to_index
                .get(series_category(series))
                .copied()
                .unwrap_or_default(),
            BarGroupingType::Stacked => 0,
            BarGroupingType::Grouped => {
                let index = next_group_index;
                next_group_index += 1;
                index
            }
        };

        let mut data = Vec::with_capacity(series.len());
        for datum in &series.data {
            let measure = datum.measure.unwrap_or(0.0);
            let own_offset = datum.measure_offset.unwrap_or(0.0);

            // Offsets only accumulate across series that share a stack.
            let stack_map_key = grouping.is_stacked().then(|| {
                format!(
                    "{}__{}__{}",
                    datum.domain,
                    stack_key,
                    measure_sign_key(datum.measure)
                )
            });
            let previous = stack_map_key
                .as_ref()
                .and_then(|key| stacks.get(key).copied());

            let measure_offset =
                own_offset + previous.map_or(0.0, |prev| prev.measure_offset_plus_measure);
            let accumulator = StackAccumulator {
                bar_stack_index: previous.map_or(0, |prev| prev.bar_stack_index + 1),
                measure_offset_plus_measure: measure_offset + measure,
                cumulative_total: measure + previous.map_or(0.0, |prev| prev.cumulative_total),
            };
            if let Some(key) = stack_map_key {
                stacks.insert(key, accumulator);
            }

            data.push(DatumLayout {
                bar_stack_index: accumulator.bar_stack_index,
                measure_offset,
                cumulative_total: accumulator.cumulative_total,
                measure_offset_plus_measure: accumulator.measure_offset_plus_measure,
                fill_pattern: datum.fill_pattern.unwrap_or(config.fill_pattern),
                stroke_width_px: datum.stroke_width_px.unwrap_or(config.stroke_width_px),
            });
        }

        let group_weight = weights.get(group_index).copied().unwrap_or_default();
        prepared.push(PreparedSeries {
            series,
            layout: SeriesLayout {
                stack_key,
                group_index,
                group_count: num_groups,
                group_weight,
                previous_group_weight: previous_group_weight(&weights, group_index, config.rtl),
                all_group_weights: weights.clone(),
            },
            data,
        });
    }

    Ok(prepared)
}
