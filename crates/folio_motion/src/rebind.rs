//! Filterable collections
//!
//! When a filter changes the rendered set, every handle of the previous set
//! is disposed before any handle of the new set is bound. Positions (and so
//! stagger delays) restart from zero for the new set.

use crate::element::{ElementLookup, ItemKey};
use crate::registry::{AnimationHandle, AnimationRegistry};
use crate::reveal::{bind_section, RevealSpec};
use indexmap::IndexSet;

/// Category that shows the whole master list
pub const ALL_CATEGORY: &str = "All";

/// An item of a filterable master list
pub trait Categorized {
    fn item_key(&self) -> ItemKey;
    fn category(&self) -> &str;
}

/// Active category and the filtered view it produces
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub active_category: String,
    pub visible: Vec<ItemKey>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_category: ALL_CATEGORY.to_string(),
            visible: Vec::new(),
        }
    }
}

impl FilterState {
    /// State showing every item of `master`
    pub fn all<T: Categorized>(master: &[T]) -> Self {
        Self {
            active_category: ALL_CATEGORY.to_string(),
            visible: Self::filtered(ALL_CATEGORY, master),
        }
    }

    /// Keys of the items in `category`, in master order
    pub fn filtered<T: Categorized>(category: &str, master: &[T]) -> Vec<ItemKey> {
        master
            .iter()
            .filter(|item| category == ALL_CATEGORY || item.category() == category)
            .map(Categorized::item_key)
            .collect()
    }
}

/// Set difference between two consecutive visible sets
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RebindReport {
    /// In both sets
    pub retained: Vec<ItemKey>,
    /// Only in the previous set
    pub removed: Vec<ItemKey>,
    /// Only in the new set
    pub added: Vec<ItemKey>,
    /// Previous handles that were still live
    pub disposed: usize,
    /// New handles that are live
    pub bound: usize,
}

impl RebindReport {
    /// Keys are reported in the order of the set they come from
    pub fn diff(previous: &[ItemKey], next: &[ItemKey]) -> Self {
        let before: IndexSet<&ItemKey> = previous.iter().collect();
        let after: IndexSet<&ItemKey> = next.iter().collect();

        Self {
            retained: after.intersection(&before).map(|k| (*k).clone()).collect(),
            removed: before.difference(&after).map(|k| (*k).clone()).collect(),
            added: after.difference(&before).map(|k| (*k).clone()).collect(),
            disposed: 0,
            bound: 0,
        }
    }
}

/// A section whose visible items change with the active filter
#[derive(Debug)]
pub struct FilterableCollection {
    filter: FilterState,
    spec: RevealSpec,
    handles: Vec<AnimationHandle>,
}

impl FilterableCollection {
    pub fn new(spec: RevealSpec) -> Self {
        Self {
            filter: FilterState::default(),
            spec,
            handles: Vec::new(),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn active_category(&self) -> &str {
        &self.filter.active_category
    }

    pub fn visible(&self) -> &[ItemKey] {
        &self.filter.visible
    }

    pub fn handles(&self) -> &[AnimationHandle] {
        &self.handles
    }

    pub fn spec(&self) -> &RevealSpec {
        &self.spec
    }

    /// Replace the visible set and rebind
    ///
    /// Every prior handle is disposed before the new set is bound, even when
    /// the sets are equal.
    pub fn on_filter_change(
        &mut self,
        registry: &mut AnimationRegistry,
        new_visible: Vec<ItemKey>,
        elements: &dyn ElementLookup,
    ) -> RebindReport {
        let mut report = RebindReport::diff(&self.filter.visible, &new_visible);

        let previous = std::mem::take(&mut self.handles);
        report.disposed = registry.dispose_all(&previous);

        self.filter.visible = new_visible;

        self.handles = bind_section(registry, &self.filter.visible, &self.spec, elements);
        report.bound = self
            .handles
            .iter()
            .filter(|handle| registry.is_live(**handle))
            .count();

        tracing::debug!(
            category = %self.filter.active_category,
            retained = report.retained.len(),
            removed = report.removed.len(),
            added = report.added.len(),
            disposed = report.disposed,
            bound = report.bound,
            "rebind"
        );
        report
    }

    /// Switch category and rebind to the matching slice of `master`
    ///
    /// The renderer must have mounted the new set before this is called.
    pub fn set_category<T: Categorized>(
        &mut self,
        registry: &mut AnimationRegistry,
        category: &str,
        master: &[T],
        elements: &dyn ElementLookup,
    ) -> RebindReport {
        self.filter.active_category = category.to_string();
        let visible = FilterState::filtered(category, master);
        self.on_filter_change(registry, visible, elements)
    }

    /// Dispose every handle and forget the visible set
    pub fn teardown(&mut self, registry: &mut AnimationRegistry) -> usize {
        let handles = std::mem::take(&mut self.handles);
        self.filter.visible.clear();
        registry.dispose_all(&handles)
    }
}
