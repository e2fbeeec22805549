//! Scroll velocity skew
//!
//! While the page scrolls, content leans by an angle proportional to how far
//! it moved since the previous scroll event. The angle eases toward its
//! target every frame and the target drops back to zero once scrolling has
//! been quiet for a short while.
//!
//! | phase      | `Scroll`                     | `QuietElapsed`       |
//! |------------|------------------------------|----------------------|
//! | `Idle`     | → `Settling`, set target     | stay                 |
//! | `Settling` | stay, set target, reset timer| → `Idle`, target = 0 |

use std::time::Duration;

/// Tuning for the skew loop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityConfig {
    /// Degrees of skew per pixel scrolled between events
    pub scale: f32,
    /// Upper bound on the target angle, in degrees
    pub max_skew_deg: f32,
    /// Fraction of the remaining distance covered each frame
    pub smoothing: f32,
    /// Quiet period after which the target resets to zero
    pub idle_after: Duration,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            scale: 0.02,
            max_skew_deg: 3.0,
            smoothing: 0.1,
            idle_after: Duration::from_millis(100),
        }
    }
}

/// Phase of the skew loop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkewPhase {
    /// Scroll events are arriving; target follows the last delta
    Settling,
    /// No recent scroll; target is zero and the angle decays
    #[default]
    Idle,
}

/// Input to the phase machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VelocityEvent {
    Scroll,
    QuietElapsed,
}

impl SkewPhase {
    pub fn on(self, event: VelocityEvent) -> SkewPhase {
        match event {
            VelocityEvent::Scroll => SkewPhase::Settling,
            VelocityEvent::QuietElapsed => SkewPhase::Idle,
        }
    }
}

/// Mutable state of the loop, owned by one controller
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityState {
    pub current_skew_deg: f32,
    pub target_skew_deg: f32,
    /// Unset until the first scroll event
    pub last_scroll_y: Option<f32>,
    /// Time of the most recent scroll event; the quiet timer runs from here
    pub last_scroll_at: Option<Duration>,
}

/// Receives the skew angle each frame
pub trait SkewTarget {
    fn apply_skew(&mut self, degrees: f32);
}

impl SkewTarget for f32 {
    fn apply_skew(&mut self, degrees: f32) {
        *self = degrees;
    }
}

/// Page-lifetime skew controller
///
/// Inert until `start`; after `stop` every input is ignored until the next
/// `start`. Timestamps are the host's monotonic frame clock.
#[derive(Debug, Default)]
pub struct VelocityController {
    config: VelocityConfig,
    state: VelocityState,
    phase: SkewPhase,
    running: bool,
}

impl VelocityController {
    pub fn new(config: VelocityConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &VelocityConfig {
        &self.config
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.state = VelocityState::default();
        self.phase = SkewPhase::Idle;
        self.running = true;
        tracing::debug!("velocity loop started");
    }

    /// Stop the loop and return the target to neutral
    pub fn stop(&mut self, target: &mut dyn SkewTarget) {
        if !self.running {
            return;
        }
        self.running = false;
        self.state = VelocityState::default();
        self.phase = SkewPhase::Idle;
        target.apply_skew(0.0);
        tracing::debug!("velocity loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> SkewPhase {
        self.phase
    }

    pub fn state(&self) -> &VelocityState {
        &self.state
    }

    /// Record a scroll position
    ///
    /// The first event after `start` measures a delta of zero.
    pub fn on_scroll(&mut self, scroll_y: f32, now: Duration) {
        if !self.running {
            return;
        }

        let delta = self
            .state
            .last_scroll_y
            .map(|last| (scroll_y - last).abs())
            .filter(|delta| delta.is_finite())
            .unwrap_or(0.0);

        self.state.target_skew_deg = (delta * self.config.scale).min(self.config.max_skew_deg);
        self.state.last_scroll_y = Some(scroll_y);
        self.state.last_scroll_at = Some(now);
        self.transition(VelocityEvent::Scroll);
    }

    /// Drop the target to zero once scrolling has been quiet long enough
    pub fn poll_idle(&mut self, now: Duration) {
        if !self.running || self.phase == SkewPhase::Idle {
            return;
        }
        let Some(last) = self.state.last_scroll_at else {
            return;
        };
        if now.saturating_sub(last) >= self.config.idle_after {
            self.state.target_skew_deg = 0.0;
            self.transition(VelocityEvent::QuietElapsed);
        }
    }

    /// Advance one frame and write the angle; returns it while running
    pub fn frame(&mut self, now: Duration, target: &mut dyn SkewTarget) -> Option<f32> {
        if !self.running {
            return None;
        }
        self.poll_idle(now);

        let state = &mut self.state;
        state.current_skew_deg +=
            (state.target_skew_deg - state.current_skew_deg) * self.config.smoothing;
        target.apply_skew(state.current_skew_deg);
        Some(state.current_skew_deg)
    }

    fn transition(&mut self, event: VelocityEvent) {
        let next = self.phase.on(event);
        if next != self.phase {
            tracing::trace!(from = ?self.phase, to = ?next, "skew phase");
            self.phase = next;
        }
    }
}
