//! Reversible timelines
//!
//! A `Timeline` tweens one element from a start `MotionProperties` to an end
//! one after an optional delay. The playhead runs over `delay + duration`
//! milliseconds and can move in either direction:
//!
//! - `play()` runs the playhead forward from wherever it is
//! - `reverse()` runs it backward from wherever it is
//!
//! Interrupting a forward run with `reverse()` therefore retraces the visible
//! state from the current frame instead of jumping to the end first.

use crate::easing::Easing;
use crate::values::{Interpolate, MotionProperties};

/// Direction the playhead moves in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

/// Read-only view of a timeline at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineSnapshot {
    /// Playhead position in milliseconds
    pub time_ms: f32,
    /// Total length (delay + duration) in milliseconds
    pub total_ms: f32,
    /// Linear tween progress (0.0 to 1.0), excluding the delay
    pub progress: f32,
    pub direction: PlayDirection,
    pub playing: bool,
    /// Interpolated properties at the playhead
    pub value: MotionProperties,
}

/// A single-tween timeline with delay, easing and a bidirectional playhead
#[derive(Clone, Debug)]
pub struct Timeline {
    from: MotionProperties,
    to: MotionProperties,
    duration_ms: f32,
    delay_ms: f32,
    easing: Easing,
    time_ms: f32,
    direction: PlayDirection,
    playing: bool,
    played: bool,
}

impl Timeline {
    /// Create a timeline with the given tween duration in milliseconds
    pub fn new(duration_ms: f32) -> Self {
        Self {
            from: MotionProperties::default(),
            to: MotionProperties::default(),
            duration_ms: duration_ms.max(0.0),
            delay_ms: 0.0,
            easing: Easing::Linear,
            time_ms: 0.0,
            direction: PlayDirection::Forward,
            playing: false,
            played: false,
        }
    }

    /// Set the start state
    pub fn from(mut self, from: MotionProperties) -> Self {
        self.from = from;
        self
    }

    /// Set the end state
    pub fn to(mut self, to: MotionProperties) -> Self {
        self.to = to;
        self
    }

    /// Set delay before the tween starts (in milliseconds)
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Set the easing curve
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    /// Total playhead range: delay plus duration
    pub fn total_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms
    }

    /// Current playhead position in milliseconds
    pub fn time(&self) -> f32 {
        self.time_ms
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the playhead rests at the end
    pub fn is_complete(&self) -> bool {
        self.time_ms >= self.total_ms()
    }

    /// Run forward from the current playhead
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
        self.played = true;
        self.playing = self.time_ms < self.total_ms();
    }

    /// Run backward from the current playhead
    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.playing = self.time_ms > 0.0;
    }

    /// Advance by delta time (in milliseconds) in the current direction
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing || dt_ms <= 0.0 {
            return;
        }

        match self.direction {
            PlayDirection::Forward => {
                self.time_ms += dt_ms;
                if self.time_ms >= self.total_ms() {
                    self.time_ms = self.total_ms();
                    self.playing = false;
                }
            }
            PlayDirection::Reverse => {
                self.time_ms -= dt_ms;
                if self.time_ms <= 0.0 {
                    self.time_ms = 0.0;
                    self.playing = false;
                }
            }
        }
    }

    /// Linear tween progress (0.0 to 1.0); zero throughout the delay
    pub fn progress(&self) -> f32 {
        let local = self.time_ms - self.delay_ms;
        if self.duration_ms <= 0.0 {
            // Zero-length tweens jump once the playhead has been run forward
            let reached = local >= 0.0 && self.played && self.direction == PlayDirection::Forward;
            return if reached { 1.0 } else { 0.0 };
        }
        (local / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Interpolated properties at the playhead
    pub fn value(&self) -> MotionProperties {
        let eased = self.easing.apply(self.progress());
        self.from.lerp(&self.to, eased)
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            time_ms: self.time_ms,
            total_ms: self.total_ms(),
            progress: self.progress(),
            direction: self.direction,
            playing: self.playing,
            value: self.value(),
        }
    }
}
