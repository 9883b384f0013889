use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::bars::animated::{AnimatedElement, DatumBinding};
use crate::bars::config::BarRendererConfig;
use crate::bars::element::BarRenderElement;
use crate::bars::geometry::desired_bar_width;
use crate::bars::kind::{BarKind, ElementContext, FilledBars, TargetLines};
use crate::bars::nearest::{self, DatumMatch};
use crate::bars::preprocess::{PreparedSeries, measure_sign_key, preprocess_series};
use crate::core::{BarSeries, DomainAxis, MeasureAxis, PixelPoint, PixelRect};
use crate::error::ChartResult;
use crate::render::ChartCanvas;

pub type FilledBarRenderer = BarRenderer<FilledBars>;
pub type TargetLineRenderer = BarRenderer<TargetLines>;

/// Element counts from one synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncStats {
    pub created: usize,
    pub updated: usize,
    pub retired: usize,
}

/// Reconciles animated bar elements against the current data each update and
/// paints their interpolated state each frame.
///
/// Elements live in stacks keyed by `"{domain}__{stackKey}__{sign}__{group}"`;
/// each element key appends its position in the stack.
#[derive(Debug)]
pub struct BarRenderer<K: BarKind> {
    config: BarRendererConfig,
    kind: K,
    draw_bounds: Option<PixelRect>,
    stacks: IndexMap<String, Vec<AnimatedElement<K::Element>>>,
    current_keys: IndexSet<String>,
    domain_stack_keys: IndexMap<String, IndexSet<String>>,
}

impl<K: BarKind + Default> BarRenderer<K> {
    pub fn new(config: BarRendererConfig) -> ChartResult<Self> {
        Self::with_kind(config, K::default())
    }
}

impl<K: BarKind> BarRenderer<K> {
    pub fn with_kind(config: BarRendererConfig, kind: K) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            kind,
            draw_bounds: None,
            stacks: IndexMap::new(),
            current_keys: IndexSet::new(),
            domain_stack_keys: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &BarRendererConfig {
        &self.config
    }

    #[must_use]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Area stacks are clipped to and hit tests are limited to.
    pub fn set_draw_bounds(&mut self, draw_bounds: Option<PixelRect>) {
        self.draw_bounds = draw_bounds;
    }

    #[must_use]
    pub fn draw_bounds(&self) -> Option<PixelRect> {
        self.draw_bounds
    }

    /// Computes layouts for `series_list` in render order.
    pub fn preprocess<'a>(
        &self,
        series_list: &'a [BarSeries],
    ) -> ChartResult<Vec<PreparedSeries<'a>>> {
        preprocess_series(series_list, &self.config)
    }

    /// Creates, retargets or retires elements for the prepared series.
    pub fn update(
        &mut self,
        prepared: &[PreparedSeries<'_>],
        domain_axis: &dyn DomainAxis,
        measure_axis: &dyn MeasureAxis,
    ) -> SyncStats {
        let mut stats = SyncStats::default();
        let mut seen_keys: IndexSet<String> = IndexSet::new();
        let mut domain_stack_keys: IndexMap<String, IndexSet<String>> = IndexMap::new();

        if let Some(first) = prepared.first() {
            let group_count = first.layout.group_count;
            let domain_width_px = domain_axis.range_band();
            if desired_bar_width(
                domain_width_px,
                group_count,
                self.config.bar_group_inner_padding_px,
            ) < 1.0
            {
                warn!(
                    groups = group_count,
                    domain_width_px, "bar groups do not fit the domain slot; bars floored to 1px"
                );
            }
        }

        for prepared_series in prepared {
            let series = prepared_series.series;
            let layout = &prepared_series.layout;

            for (datum_index, datum) in series.data.iter().enumerate() {
                let Some(datum_layout) = prepared_series.datum_layout(datum_index).copied() else {
                    continue;
                };
                let stack_map_key = format!(
                    "{}__{}__{}__{}",
                    datum.domain,
                    layout.stack_key,
                    measure_sign_key(datum.measure),
                    layout.group_index
                );
                let bar_key = format!("{stack_map_key}{}", datum_layout.bar_stack_index);

                let ctx = ElementContext {
                    series,
                    layout,
                    datum_index,
                    datum_layout,
                    measure: datum.measure,
                    measure_offset: datum_layout.measure_offset,
                    domain_axis,
                    measure_axis,
                    config: &self.config,
                };
                let binding = DatumBinding {
                    series_id: series.id.clone(),
                    datum_index,
                    bar_stack_index: datum_layout.bar_stack_index,
                    domain: datum.domain.clone(),
                    overlay: series.overlay,
                };

                let existing = self.stacks.get_mut(&stack_map_key).and_then(|stack| {
                    stack.iter_mut().find(|element| element.key() == bar_key)
                });

                match existing {
                    Some(element) => {
                        element.rebind(binding);
                        if let Some(target) = self.kind.make_element(&ctx) {
                            element.set_new_target(target);
                        }
                        stats.updated += 1;
                    }
                    None => {
                        if datum.measure.is_none() {
                            continue;
                        }
                        let (Some(initial), Some(target)) = (
                            self.kind.make_element(&ctx.collapsed()),
                            self.kind.make_element(&ctx),
                        ) else {
                            continue;
                        };
                        trace!(key = %bar_key, "create bar element");
                        let mut element = AnimatedElement::new(bar_key.clone(), binding, initial);
                        element.set_new_target(target);
                        let stack = self.stacks.entry(stack_map_key.clone()).or_default();
                        stack.push(element);
                        stack.sort_by_key(|element| element.binding().bar_stack_index);
                        stats.created += 1;
                    }
                }

                seen_keys.insert(bar_key);
                domain_stack_keys
                    .entry(datum.domain.to_string())
                    .or_default()
                    .insert(stack_map_key);
            }
        }

        let orientation = self.config.orientation;
        for element in self.stacks.values_mut().flatten() {
            if !seen_keys.contains(element.key()) && !element.is_animating_out() {
                trace!(key = %element.key(), "retire bar element");
                element.animate_out(orientation);
                stats.retired += 1;
            }
        }

        self.current_keys = seen_keys;
        self.domain_stack_keys = domain_stack_keys;

        debug!(
            created = stats.created,
            updated = stats.updated,
            retired = stats.retired,
            stacks = self.stacks.len(),
            "synchronize bar elements"
        );
        stats
    }

    /// Paints every stack at `progress`; a finished animation first drops
    /// retired elements.
    pub fn paint(&mut self, canvas: &mut dyn ChartCanvas, progress: f64) {
        if progress >= 1.0 {
            self.cleanup();
        }
        for stack in self.stacks.values_mut() {
            let elements: Vec<K::Element> = stack
                .iter_mut()
                .map(|element| element.current_at(progress).clone())
                .collect();
            self.kind
                .paint_stack(canvas, &elements, &self.config, self.draw_bounds);
        }
    }

    /// Drops animated-out and null-measure elements, then empty stacks.
    pub fn cleanup(&mut self) {
        for stack in self.stacks.values_mut() {
            stack.retain(|element| {
                !element.is_animating_out() && !element.target().measure_is_null()
            });
        }
        self.stacks.retain(|_, stack| !stack.is_empty());

        let stacks = &self.stacks;
        self.current_keys.retain(|key| {
            stacks
                .values()
                .flatten()
                .any(|element| element.key() == key.as_str())
        });
        for keys in self.domain_stack_keys.values_mut() {
            keys.retain(|key| stacks.contains_key(key));
        }
        self.domain_stack_keys.retain(|_, keys| !keys.is_empty());
    }

    /// Data matches nearest to `point`, ordered nearest-first.
    ///
    /// Returns nothing when `point` falls outside `bounds_override` (or the
    /// draw bounds when no override is given).
    #[must_use]
    pub fn nearest(
        &self,
        domain_axis: &dyn DomainAxis,
        point: PixelPoint,
        by_domain: bool,
        bounds_override: Option<PixelRect>,
    ) -> Vec<DatumMatch> {
        if let Some(bounds) = bounds_override.or(self.draw_bounds) {
            if !bounds.contains_point(point) {
                return Vec::new();
            }
        }

        let vertical = self.config.renders_vertically();
        let candidates: Vec<&AnimatedElement<K::Element>> = if domain_axis.is_ordinal() {
            let pixel = if vertical { point.x } else { point.y };
            let Some(domain) = domain_axis.domain_for_pixel(pixel) else {
                return Vec::new();
            };
            let Some(keys) = self.domain_stack_keys.get(&domain.to_string()) else {
                return Vec::new();
            };
            keys.iter()
                .filter_map(|key| self.stacks.get(key))
                .flatten()
                .filter(|element| !element.binding().overlay)
                .collect()
        } else {
            self.stacks.values().flatten().collect()
        };

        nearest::locate(
            candidates,
            point,
            vertical,
            by_domain,
            !domain_axis.is_ordinal(),
        )
    }

    /// Element keys seen by the last update, minus those cleaned up since.
    pub fn current_keys(&self) -> impl Iterator<Item = &str> {
        self.current_keys.iter().map(String::as_str)
    }

    pub fn stack_keys(&self) -> impl Iterator<Item = &str> {
        self.stacks.keys().map(String::as_str)
    }

    pub fn elements(&self) -> impl Iterator<Item = &AnimatedElement<K::Element>> {
        self.stacks.values().flatten()
    }

    #[must_use]
    pub fn element(&self, key: &str) -> Option<&AnimatedElement<K::Element>> {
        self.elements().find(|element| element.key() == key)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.stacks.values().map(Vec::len).sum()
    }
}
