//! Folio Animation System
//!
//! Easing curves, reversible timelines, stagger offsets, and the frame
//! scheduler that advances them.
//!
//! # Features
//!
//! - **Easing**: Named curves (`expo.out`, `power1.inOut`, ...) parsed from config
//! - **Multi-Property Values**: `MotionProperties` interpolates translate, opacity,
//!   scale, rotation and width together
//! - **Reversible Timelines**: Play forward, reverse from the current playhead
//! - **Stagger**: Per-index start delays for sequenced entrances
//! - **Scheduler**: Slot-map owned timelines ticked once per frame, reached
//!   through weak `SchedulerHandle`s
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{AnimationScheduler, Easing, MotionProperties, Timeline};
//!
//! let scheduler = AnimationScheduler::new();
//! let handle = scheduler.handle();
//!
//! let timeline = Timeline::new(600.0)
//!     .from(MotionProperties::new().translate_y(80.0).opacity(0.0))
//!     .to(MotionProperties::neutral())
//!     .easing(Easing::ExpoOut);
//!
//! let id = handle.register_timeline(timeline).unwrap();
//! handle.play_timeline(id);
//! scheduler.tick_with(600.0);
//!
//! let value = handle.timeline_value(id).unwrap();
//! assert_eq!(value.opacity, Some(1.0));
//! ```

pub mod easing;
pub mod scheduler;
pub mod stagger;
pub mod timeline;
pub mod values;

pub use easing::{Easing, ParseEasingError};
pub use scheduler::{AnimationScheduler, SchedulerHandle, TimelineId};
pub use stagger::{StaggerConfig, StaggerIndex};
pub use timeline::{PlayDirection, Timeline, TimelineSnapshot};
pub use values::{Interpolate, MotionProperties};
