//! Viewport intersection tracking
//!
//! A subscription watches one element against one threshold line. Each poll
//! compares the element's top edge with the line and reports a crossing only
//! when the side changes:
//!
//! | previous side | top at or above line | event      |
//! |---------------|----------------------|------------|
//! | `Before`      | yes                  | `Entered`  |
//! | `After`       | no                   | `LeftBack` |
//! | unchanged     |                      | none       |
//!
//! Scrolling back and forth therefore fires exactly one event per crossing.

use crate::element::{ElementLookup, ItemKey, Viewport};
use slotmap::{new_key_type, SlotMap};
use std::fmt;
use std::str::FromStr;

new_key_type! {
    /// Handle to one intersection subscription
    pub struct SubscriptionId;
}

/// Trigger line as a fraction of the viewport height, measured from the top
///
/// `Threshold::new(0.85)` fires once an element's top edge reaches 85% of the
/// way down the viewport (`"top 85%"`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold(f32);

impl Threshold {
    /// Out-of-range fractions are clamped to `[0, 1]`; NaN becomes 1
    pub fn new(fraction: f32) -> Self {
        if fraction.is_nan() {
            return Self(1.0);
        }
        Self(fraction.clamp(0.0, 1.0))
    }

    pub fn fraction(&self) -> f32 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(0.85)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "top {}%", (self.0 * 100.0).round())
    }
}

/// Error returned when a threshold string cannot be parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseThresholdError(pub String);

impl fmt::Display for ParseThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid threshold '{}', expected e.g. \"top 85%\"", self.0)
    }
}

impl std::error::Error for ParseThresholdError {}

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    /// Accepts `"top 85%"`, `"85%"` or a bare fraction such as `"0.85"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseThresholdError(s.to_string());
        let trimmed = s.trim();
        let value = trimmed.strip_prefix("top").unwrap_or(trimmed).trim();

        if let Some(percent) = value.strip_suffix('%') {
            let percent: f32 = percent.trim().parse().map_err(|_| err())?;
            return Ok(Self::new(percent / 100.0));
        }

        let fraction: f32 = value.parse().map_err(|_| err())?;
        Ok(Self::new(fraction))
    }
}

/// Direction of a threshold crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// Top edge moved at or above the line (scrolling down)
    Entered,
    /// Top edge moved back below the line (scrolling up)
    LeftBack,
}

/// One crossing reported by `IntersectionTracker::poll`
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEvent {
    pub subscription: SubscriptionId,
    pub key: ItemKey,
    pub crossing: Crossing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

#[derive(Debug)]
struct Subscription {
    key: ItemKey,
    threshold: Threshold,
    side: Side,
}

/// Tracks threshold crossings for a set of elements
#[derive(Debug, Default)]
pub struct IntersectionTracker {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
}

impl IntersectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start watching `key` against `threshold`
    ///
    /// Observing a detached element returns an id that is already disposed.
    pub fn observe(
        &mut self,
        key: &ItemKey,
        threshold: Threshold,
        elements: &dyn ElementLookup,
    ) -> SubscriptionId {
        if !elements.is_mounted(key) {
            tracing::trace!(%key, "observe: element detached, returning disposed subscription");
            return SubscriptionId::default();
        }

        self.subscriptions.insert(Subscription {
            key: key.clone(),
            threshold,
            side: Side::Before,
        })
    }

    /// Stop watching; returns false if the subscription was already gone
    pub fn dispose(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(id).is_some()
    }

    pub fn is_active(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(id)
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Number of live subscriptions watching `key`
    pub fn subscriptions_for(&self, key: &ItemKey) -> usize {
        self.subscriptions
            .values()
            .filter(|sub| &sub.key == key)
            .count()
    }

    /// Evaluate every live subscription against the viewport
    ///
    /// Elements that are no longer mounted are skipped without firing.
    pub fn poll(
        &mut self,
        viewport: &Viewport,
        elements: &dyn ElementLookup,
    ) -> Vec<IntersectionEvent> {
        let mut events = Vec::new();

        for (id, sub) in self.subscriptions.iter_mut() {
            let Some(bounds) = elements.bounds(&sub.key) else {
                continue;
            };

            let past_line = bounds.top <= viewport.line_at(sub.threshold.fraction());
            let crossing = match (sub.side, past_line) {
                (Side::Before, true) => {
                    sub.side = Side::After;
                    Crossing::Entered
                }
                (Side::After, false) => {
                    sub.side = Side::Before;
                    Crossing::LeftBack
                }
                _ => continue,
            };

            events.push(IntersectionEvent {
                subscription: id,
                key: sub.key.clone(),
                crossing,
            });
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementBounds, MountedElements};

    const VIEWPORT_HEIGHT: f32 = 1000.0;

    fn at(scroll_y: f32) -> Viewport {
        Viewport::new(scroll_y, VIEWPORT_HEIGHT)
    }

    fn setup() -> (IntersectionTracker, MountedElements, ItemKey) {
        let key = ItemKey::new("card");
        let mut elements = MountedElements::new();
        // Line for 0.85 sits at scroll_y + 850, so the card enters at scroll_y >= 1150
        elements.mount(key.clone(), ElementBounds::new(2000.0, 300.0));
        (IntersectionTracker::new(), elements, key)
    }

    #[test]
    fn test_threshold_parse() {
        assert_eq!("top 85%".parse::<Threshold>(), Ok(Threshold::new(0.85)));
        assert_eq!("90%".parse::<Threshold>(), Ok(Threshold::new(0.9)));
        assert_eq!("0.8".parse::<Threshold>(), Ok(Threshold::new(0.8)));
        assert_eq!("top 150%".parse::<Threshold>(), Ok(Threshold::new(1.0)));
        assert!("bottom".parse::<Threshold>().is_err());
        assert_eq!(Threshold::new(0.85).to_string(), "top 85%");
    }

    #[test]
    fn test_fires_once_per_crossing() {
        let (mut tracker, elements, key) = setup();
        let id = tracker.observe(&key, Threshold::new(0.85), &elements);
        assert!(tracker.is_active(id));

        assert!(tracker.poll(&at(0.0), &elements).is_empty());

        let events = tracker.poll(&at(1200.0), &elements);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].crossing, Crossing::Entered);
        assert_eq!(events[0].subscription, id);

        // Further scrolling on the same side stays quiet
        assert!(tracker.poll(&at(1500.0), &elements).is_empty());

        let events = tracker.poll(&at(100.0), &elements);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].crossing, Crossing::LeftBack);

        let events = tracker.poll(&at(1200.0), &elements);
        assert_eq!(events[0].crossing, Crossing::Entered);
    }

    #[test]
    fn test_already_past_line_fires_on_first_poll() {
        let (mut tracker, elements, key) = setup();
        tracker.observe(&key, Threshold::new(0.85), &elements);

        let events = tracker.poll(&at(3000.0), &elements);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].crossing, Crossing::Entered);
    }

    #[test]
    fn test_observing_detached_element() {
        let mut tracker = IntersectionTracker::new();
        let elements = MountedElements::new();

        let id = tracker.observe(&ItemKey::new("ghost"), Threshold::default(), &elements);
        assert!(!tracker.is_active(id));
        assert!(!tracker.dispose(id));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (mut tracker, elements, key) = setup();
        let id = tracker.observe(&key, Threshold::default(), &elements);

        assert!(tracker.dispose(id));
        assert!(!tracker.dispose(id));
        assert!(tracker.poll(&at(5000.0), &elements).is_empty());
    }

    #[test]
    fn test_unmounted_element_is_skipped() {
        let (mut tracker, mut elements, key) = setup();
        tracker.observe(&key, Threshold::default(), &elements);
        elements.unmount(&key);

        assert!(tracker.poll(&at(5000.0), &elements).is_empty());
        assert_eq!(tracker.subscriptions_for(&key), 1);
    }
}
