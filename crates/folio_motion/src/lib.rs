//! Folio Motion
//!
//! Scroll-synchronized motion for content sections:
//!
//! - **Intersection**: threshold crossings for mounted elements
//! - **Registry**: one subscription plus one lazily built timeline per element
//! - **Reveal / Progress**: staggered entrances and progress-bar widths
//! - **Velocity**: damped skew derived from scroll speed
//! - **Rebind**: dispose-then-bind when a filter changes the rendered set
//!
//! # Example
//!
//! ```
//! use folio_animation::AnimationScheduler;
//! use folio_motion::{
//!     bind_section, AnimationRegistry, ElementBounds, ItemKey, MountedElements, RevealSpec,
//!     Viewport,
//! };
//!
//! let scheduler = AnimationScheduler::new();
//! let mut registry = AnimationRegistry::new("contact", scheduler.handle());
//!
//! let mut elements = MountedElements::new();
//! let key = ItemKey::scoped("contact", "email");
//! elements.mount(key.clone(), ElementBounds::new(1200.0, 80.0));
//!
//! let spec = RevealSpec::new().offset(0.0, 50.0);
//! let handles = bind_section(&mut registry, &[key], &spec, &elements);
//!
//! registry.sync(&Viewport::new(600.0, 800.0), &elements);
//! scheduler.tick_with(16.0);
//! assert_eq!(registry.plays(handles[0]), 1);
//! ```

pub mod element;
pub mod intersection;
pub mod progress;
pub mod rebind;
pub mod registry;
pub mod reveal;
pub mod velocity;

pub use element::{ElementBounds, ElementLookup, ItemKey, MountedElements, Viewport};
pub use intersection::{
    Crossing, IntersectionEvent, IntersectionTracker, ParseThresholdError, SubscriptionId,
    Threshold,
};
pub use progress::{bind_progress, ProgressSpec};
pub use rebind::{Categorized, FilterState, FilterableCollection, RebindReport, ALL_CATEGORY};
pub use registry::{
    AnimationHandle, AnimationRegistry, BindingAction, BindingEvent, BindingState,
    TimelineBuilder,
};
pub use reveal::{bind_section, RevealRole, RevealSpec};
pub use velocity::{
    SkewPhase, SkewTarget, VelocityConfig, VelocityController, VelocityEvent, VelocityState,
};
