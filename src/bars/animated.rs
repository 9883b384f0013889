use crate::bars::config::BarOrientation;
use crate::bars::element::BarRenderElement;
use crate::core::DomainValue;

/// Which datum an animated element currently draws.
#[derive(Debug, Clone, PartialEq)]
pub struct DatumBinding {
    pub series_id: String,
    pub datum_index: usize,
    /// Position within the bar stack; stacks paint in this order.
    pub bar_stack_index: usize,
    pub domain: DomainValue,
    /// Overlay series are painted but skipped by ordinal hit testing.
    pub overlay: bool,
}

/// Previous/target/current snapshots of one rendered element.
///
/// `current_at(progress)` is defined for every progress in `[0, 1]`: 0 yields
/// `previous`, 1 yields `target`.
#[derive(Debug, Clone)]
pub struct AnimatedElement<E> {
    key: String,
    binding: DatumBinding,
    previous: E,
    target: E,
    current: E,
    animating_out: bool,
}

impl<E: BarRenderElement> AnimatedElement<E> {
    #[must_use]
    pub fn new(key: impl Into<String>, binding: DatumBinding, initial: E) -> Self {
        Self {
            key: key.into(),
            binding,
            previous: initial.clone(),
            target: initial.clone(),
            current: initial,
            animating_out: false,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn binding(&self) -> &DatumBinding {
        &self.binding
    }

    pub fn rebind(&mut self, binding: DatumBinding) {
        self.binding = binding;
    }

    #[must_use]
    pub fn previous(&self) -> &E {
        &self.previous
    }

    #[must_use]
    pub fn target(&self) -> &E {
        &self.target
    }

    #[must_use]
    pub fn current(&self) -> &E {
        &self.current
    }

    #[must_use]
    pub fn is_animating_out(&self) -> bool {
        self.animating_out
    }

    /// Starts a new transition from the last interpolated state.
    pub fn set_new_target(&mut self, target: E) {
        self.animating_out = false;
        self.previous = self.current.clone();
        self.target = target;
    }

    /// Retargets towards a collapsed copy of the current geometry.
    pub fn animate_out(&mut self, orientation: BarOrientation) {
        let mut collapsed = self.current.clone();
        collapsed.collapse_to_measure_axis(orientation);
        self.set_new_target(collapsed);
        self.animating_out = true;
    }

    /// Advances `current` to `progress` and returns it.
    pub fn current_at(&mut self, progress: f64) -> &E {
        if progress >= 1.0 {
            self.current = self.target.clone();
            self.previous = self.target.clone();
        } else {
            self.current
                .interpolate(&self.previous, &self.target, progress);
        }
        &self.current
    }
}
