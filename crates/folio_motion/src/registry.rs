//! Animation handle registry
//!
//! Pairs one intersection subscription with one lazily built timeline per
//! element. The registry is the only owner of both halves, so disposing a
//! handle tears down the subscription and the timeline together.
//!
//! Each binding is a small state machine:
//!
//! | state      | `Entered`                 | `LeftBack`           |
//! |------------|---------------------------|----------------------|
//! | `Armed`    | build + play → `Revealed` | stay                 |
//! | `Revealed` | stay                      | reverse → `Reversed` |
//! | `Reversed` | play → `Revealed`         | stay                 |
//!
//! Disposed handles ignore everything. A reversal resumes from the current
//! playhead, so a half-played entrance retraces instead of restarting.

use crate::element::{ElementLookup, ItemKey, Viewport};
use crate::intersection::{Crossing, IntersectionTracker, SubscriptionId, Threshold};
use folio_animation::{MotionProperties, SchedulerHandle, Timeline, TimelineId, TimelineSnapshot};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct HandleId;
}

/// Opaque token for one element binding
///
/// Copyable and cheap; disposing it more than once is harmless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AnimationHandle(HandleId);

impl AnimationHandle {
    /// A handle that was never live (e.g. bound against a detached element)
    pub fn disposed() -> Self {
        Self(HandleId::default())
    }
}

/// Lifecycle state of a binding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingState {
    /// Subscribed, never entered; no timeline built yet
    Armed,
    /// Entered; timeline running or resting forward
    Revealed,
    /// Scrolled back above the line; timeline running or resting reversed
    Reversed,
    /// Handle no longer refers to a live binding
    Disposed,
}

/// Timeline action taken in response to a crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingAction {
    Play,
    Reverse,
}

impl BindingState {
    /// Transition table for one crossing
    pub fn on(self, crossing: Crossing) -> (BindingState, Option<BindingAction>) {
        match (self, crossing) {
            (BindingState::Armed, Crossing::Entered)
            | (BindingState::Reversed, Crossing::Entered) => {
                (BindingState::Revealed, Some(BindingAction::Play))
            }
            (BindingState::Revealed, Crossing::LeftBack) => {
                (BindingState::Reversed, Some(BindingAction::Reverse))
            }
            (state, _) => (state, None),
        }
    }
}

/// Emitted by `AnimationRegistry::sync` for every action taken
#[derive(Clone, Debug, PartialEq)]
pub struct BindingEvent {
    pub handle: AnimationHandle,
    pub key: ItemKey,
    pub action: BindingAction,
}

/// Deferred timeline constructor, run on first entry
pub type TimelineBuilder = Box<dyn FnOnce() -> Timeline>;

struct Binding {
    key: ItemKey,
    subscription: SubscriptionId,
    timeline: Option<TimelineId>,
    builder: Option<TimelineBuilder>,
    state: BindingState,
    plays: u32,
    reverses: u32,
}

/// Owns the bindings of one section
pub struct AnimationRegistry {
    /// Section label, for logs
    name: String,
    tracker: IntersectionTracker,
    scheduler: SchedulerHandle,
    bindings: SlotMap<HandleId, Binding>,
    by_subscription: FxHashMap<SubscriptionId, HandleId>,
}

impl std::fmt::Debug for AnimationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("name", &self.name)
            .field("live", &self.bindings.len())
            .field("subscriptions", &self.tracker.len())
            .finish()
    }
}

impl AnimationRegistry {
    pub fn new(name: impl Into<String>, scheduler: SchedulerHandle) -> Self {
        Self {
            name: name.into(),
            tracker: IntersectionTracker::new(),
            scheduler,
            bindings: SlotMap::with_key(),
            by_subscription: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind `key` to a timeline that is built and played on first entry
    ///
    /// Exactly one subscription is created. A detached element yields
    /// `AnimationHandle::disposed()`.
    pub fn register<F>(
        &mut self,
        key: &ItemKey,
        build: F,
        threshold: Threshold,
        elements: &dyn ElementLookup,
    ) -> AnimationHandle
    where
        F: FnOnce() -> Timeline + 'static,
    {
        let subscription = self.tracker.observe(key, threshold, elements);
        if !self.tracker.is_active(subscription) {
            tracing::debug!(section = %self.name, %key, "register: element not mounted, skipping");
            return AnimationHandle::disposed();
        }

        let id = self.bindings.insert(Binding {
            key: key.clone(),
            subscription,
            timeline: None,
            builder: Some(Box::new(build)),
            state: BindingState::Armed,
            plays: 0,
            reverses: 0,
        });
        self.by_subscription.insert(subscription, id);

        tracing::trace!(section = %self.name, %key, %threshold, "register");
        AnimationHandle(id)
    }

    /// Dispose one handle; returns false if it was already disposed
    ///
    /// Cancels the subscription and removes any in-flight timeline.
    pub fn dispose(&mut self, handle: AnimationHandle) -> bool {
        let Some(binding) = self.bindings.remove(handle.0) else {
            return false;
        };

        self.tracker.dispose(binding.subscription);
        self.by_subscription.remove(&binding.subscription);
        if let Some(timeline) = binding.timeline {
            self.scheduler.remove_timeline(timeline);
        }

        tracing::trace!(section = %self.name, key = %binding.key, "dispose");
        true
    }

    /// Dispose every handle in `handles`; returns how many were still live
    ///
    /// Safe on empty slices and on handles that are already gone.
    pub fn dispose_all(&mut self, handles: &[AnimationHandle]) -> usize {
        let disposed = handles.iter().filter(|h| self.dispose(**h)).count();
        if disposed > 0 {
            tracing::debug!(section = %self.name, disposed, "dispose_all");
        }
        disposed
    }

    /// Dispose every live binding in this registry
    pub fn teardown(&mut self) -> usize {
        let handles: Vec<AnimationHandle> = self.bindings.keys().map(AnimationHandle).collect();
        self.dispose_all(&handles)
    }

    /// Poll crossings and apply the resulting play/reverse actions
    pub fn sync(&mut self, viewport: &Viewport, elements: &dyn ElementLookup) -> Vec<BindingEvent> {
        let crossings = self.tracker.poll(viewport, elements);
        let mut events = Vec::with_capacity(crossings.len());

        for crossing in crossings {
            let Some(&id) = self.by_subscription.get(&crossing.subscription) else {
                continue;
            };
            let Some(binding) = self.bindings.get_mut(id) else {
                continue;
            };

            let (next, action) = binding.state.on(crossing.crossing);
            binding.state = next;
            let Some(action) = action else {
                continue;
            };

            match action {
                BindingAction::Play => {
                    if binding.timeline.is_none() {
                        if let Some(build) = binding.builder.take() {
                            binding.timeline = self.scheduler.register_timeline(build());
                            if binding.timeline.is_none() {
                                tracing::warn!(
                                    section = %self.name,
                                    key = %binding.key,
                                    "scheduler gone, entrance will not animate"
                                );
                            }
                        }
                    }
                    if let Some(timeline) = binding.timeline {
                        self.scheduler.play_timeline(timeline);
                    }
                    binding.plays += 1;
                }
                BindingAction::Reverse => {
                    if let Some(timeline) = binding.timeline {
                        self.scheduler.reverse_timeline(timeline);
                    }
                    binding.reverses += 1;
                }
            }

            tracing::trace!(section = %self.name, key = %binding.key, ?action, "binding");
            events.push(BindingEvent {
                handle: AnimationHandle(id),
                key: binding.key.clone(),
                action,
            });
        }

        events
    }

    pub fn is_live(&self, handle: AnimationHandle) -> bool {
        self.bindings.contains_key(handle.0)
    }

    pub fn state(&self, handle: AnimationHandle) -> BindingState {
        self.bindings
            .get(handle.0)
            .map(|b| b.state)
            .unwrap_or(BindingState::Disposed)
    }

    /// Number of live bindings
    pub fn live_count(&self) -> usize {
        self.bindings.len()
    }

    /// Number of live intersection subscriptions
    pub fn subscription_count(&self) -> usize {
        self.tracker.len()
    }

    /// Live subscriptions watching `key`
    pub fn subscriptions_for(&self, key: &ItemKey) -> usize {
        self.tracker.subscriptions_for(key)
    }

    pub fn key(&self, handle: AnimationHandle) -> Option<&ItemKey> {
        self.bindings.get(handle.0).map(|b| &b.key)
    }

    /// How many times the binding's timeline was played forward
    pub fn plays(&self, handle: AnimationHandle) -> u32 {
        self.bindings.get(handle.0).map(|b| b.plays).unwrap_or(0)
    }

    /// How many times the binding's timeline was reversed
    pub fn reverses(&self, handle: AnimationHandle) -> u32 {
        self.bindings.get(handle.0).map(|b| b.reverses).unwrap_or(0)
    }

    /// Timeline backing a binding, once built
    pub fn timeline(&self, handle: AnimationHandle) -> Option<TimelineId> {
        self.bindings.get(handle.0).and_then(|b| b.timeline)
    }

    /// Current animated properties, once the timeline is built
    pub fn value(&self, handle: AnimationHandle) -> Option<MotionProperties> {
        self.timeline(handle)
            .and_then(|id| self.scheduler.timeline_value(id))
    }

    pub fn snapshot(&self, handle: AnimationHandle) -> Option<TimelineSnapshot> {
        self.timeline(handle)
            .and_then(|id| self.scheduler.timeline_snapshot(id))
    }

    /// Live handles in slot order
    pub fn handles(&self) -> impl Iterator<Item = AnimationHandle> + '_ {
        self.bindings.keys().map(AnimationHandle)
    }
}
