//! Animation scheduler
//!
//! Owns every live timeline and advances them once per frame. Controllers
//! never hold timelines directly: they register them through a
//! `SchedulerHandle` and keep the returned `TimelineId`.
//!
//! The handle is weak, so a controller that outlives the scheduler (or is
//! disposed after page teardown) degrades to no-ops instead of failing.

use crate::timeline::{Timeline, TimelineSnapshot};
use crate::values::MotionProperties;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, Weak};

new_key_type! {
    /// Handle to a registered timeline
    pub struct TimelineId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    timelines: SlotMap<TimelineId, Timeline>,
}

impl SchedulerInner {
    fn advance(&mut self, dt_ms: f32) -> bool {
        for (_, timeline) in self.timelines.iter_mut() {
            timeline.tick(dt_ms);
        }

        // NOTE: finished timelines stay registered. They are removed only when
        // their owner disposes them, so a completed entrance can still reverse.
        self.timelines.iter().any(|(_, t)| t.is_playing())
    }
}

/// The animation scheduler that ticks all registered timelines
///
/// Held by the page and shared with controllers via `SchedulerHandle`.
///
/// ```ignore
/// let scheduler = AnimationScheduler::new();
/// let registry = AnimationRegistry::new(scheduler.handle());
///
/// // each animation frame:
/// scheduler.tick_with(dt_ms);
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timelines: SlotMap::with_key(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to controllers
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tick all timelines by the host's frame delta (in milliseconds)
    ///
    /// Returns true if any timeline is still playing (needs another tick).
    pub fn tick_with(&self, dt_ms: f32) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        inner.advance(dt_ms)
    }

    /// Check if any timeline is still playing
    pub fn has_active_animations(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.timelines.iter().any(|(_, t)| t.is_playing()))
            .unwrap_or(false)
    }

    /// Get the number of registered timelines
    pub fn timeline_count(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.timelines.len())
            .unwrap_or(0)
    }

}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to controllers that need to register timelines.
/// It won't prevent the scheduler from being dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl std::fmt::Debug for SchedulerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl SchedulerHandle {
    /// A handle that is not attached to any scheduler
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    /// Whether the scheduler behind this handle still exists
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut SchedulerInner) -> R) -> Option<R> {
        let inner = self.inner.upgrade()?;
        let mut guard = inner.lock().ok()?;
        Some(f(&mut guard))
    }

    fn with_timeline<R>(&self, id: TimelineId, f: impl FnOnce(&mut Timeline) -> R) -> Option<R> {
        self.with_inner(|inner| inner.timelines.get_mut(id).map(f))
            .flatten()
    }

    /// Register a timeline and return its ID
    pub fn register_timeline(&self, timeline: Timeline) -> Option<TimelineId> {
        self.with_inner(|inner| inner.timelines.insert(timeline))
    }

    /// Run a timeline forward from its playhead
    pub fn play_timeline(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::play);
    }

    /// Run a timeline backward from its playhead
    pub fn reverse_timeline(&self, id: TimelineId) {
        self.with_timeline(id, Timeline::reverse);
    }

    /// Remove a timeline; returns it if it was still registered
    pub fn remove_timeline(&self, id: TimelineId) -> Option<Timeline> {
        self.with_inner(|inner| inner.timelines.remove(id)).flatten()
    }

    /// Interpolated properties at the timeline's playhead
    pub fn timeline_value(&self, id: TimelineId) -> Option<MotionProperties> {
        self.with_timeline(id, |t| t.value())
    }

    /// Full read-only view of a timeline
    pub fn timeline_snapshot(&self, id: TimelineId) -> Option<TimelineSnapshot> {
        self.with_timeline(id, |t| t.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Easing;

    fn slide() -> Timeline {
        Timeline::new(1000.0)
            .from(MotionProperties::new().translate_y(100.0))
            .to(MotionProperties::new().translate_y(0.0))
            .easing(Easing::Linear)
    }

    #[test]
    fn test_scheduler_tick() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let id = handle.register_timeline(slide()).unwrap();
        assert!(!scheduler.has_active_animations());

        handle.play_timeline(id);
        assert!(scheduler.tick_with(250.0));

        let value = handle.timeline_value(id).unwrap();
        assert!((value.translate_y.unwrap() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_completed_timelines_stay_registered() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let id = handle.register_timeline(slide()).unwrap();
        handle.play_timeline(id);
        assert!(!scheduler.tick_with(2000.0));

        assert_eq!(scheduler.timeline_count(), 1);
        handle.reverse_timeline(id);
        assert!(handle.timeline_snapshot(id).unwrap().playing);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let id = handle.register_timeline(slide()).unwrap();
        assert!(handle.remove_timeline(id).is_some());
        assert!(handle.remove_timeline(id).is_none());
        assert_eq!(scheduler.timeline_count(), 0);

        // Operations on a removed timeline are silent
        handle.play_timeline(id);
        assert_eq!(handle.timeline_value(id), None);
    }

    #[test]
    fn test_handle_outliving_scheduler() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle.register_timeline(slide()).unwrap();

        drop(scheduler);

        assert!(!handle.is_alive());
        assert!(handle.register_timeline(slide()).is_none());
        assert!(handle.remove_timeline(id).is_none());
        assert_eq!(handle.timeline_snapshot(id), None);
    }

    #[test]
    fn test_detached_handle() {
        let handle = SchedulerHandle::detached();
        assert!(!handle.is_alive());
        assert!(handle.register_timeline(slide()).is_none());
    }
}
