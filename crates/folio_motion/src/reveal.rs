//! Entrance reveals
//!
//! A `RevealSpec` describes how every element of one section enters: the
//! start state it is rendered in, how long it takes to reach the neutral
//! state, and how the section staggers its elements.

use crate::element::{ElementLookup, ItemKey};
use crate::intersection::Threshold;
use crate::registry::{AnimationHandle, AnimationRegistry};
use folio_animation::{Easing, MotionProperties, StaggerConfig, Timeline};

/// How an element's position in the set shapes its start state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealRole {
    /// Every element starts from the same state
    #[default]
    Uniform,
    /// Odd positions mirror the horizontal offset and rotation
    Alternating,
}

/// Immutable per-section entrance description
#[derive(Clone, Debug, PartialEq)]
pub struct RevealSpec {
    /// Start offset (x, y) in pixels
    pub initial_offset: (f32, f32),
    pub initial_opacity: f32,
    pub initial_scale: f32,
    /// Start rotation about the vertical axis, in degrees
    pub initial_rotation: f32,
    pub duration_ms: f32,
    pub easing: Easing,
    pub stagger: StaggerConfig,
    pub threshold: Threshold,
    pub role: RevealRole,
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            initial_offset: (0.0, 0.0),
            initial_opacity: 0.0,
            initial_scale: 1.0,
            initial_rotation: 0.0,
            duration_ms: 600.0,
            easing: Easing::ExpoOut,
            stagger: StaggerConfig::new(100.0),
            threshold: Threshold::default(),
            role: RevealRole::Uniform,
        }
    }
}

impl RevealSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.initial_offset = (x, y);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.initial_opacity = opacity;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.initial_scale = scale;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.initial_rotation = degrees;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger(mut self, stagger: StaggerConfig) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn alternating(mut self) -> Self {
        self.role = RevealRole::Alternating;
        self
    }

    /// Start state of the element at position `index`
    pub fn initial_state(&self, index: usize) -> MotionProperties {
        let mirror = match self.role {
            RevealRole::Alternating if index % 2 == 1 => -1.0,
            _ => 1.0,
        };
        let (x, y) = self.initial_offset;

        MotionProperties::new()
            .translate_x(x * mirror)
            .translate_y(y)
            .opacity(self.initial_opacity)
            .scale(self.initial_scale)
            .rotate_y(self.initial_rotation * mirror)
    }

    /// Start delay of the element at position `index`
    pub fn delay_for(&self, index: usize) -> f32 {
        self.stagger.delay_for_index(index)
    }

    /// Entrance timeline for the element at `index`, ending at neutral
    pub fn timeline_for(&self, index: usize) -> Timeline {
        Timeline::new(self.duration_ms)
            .from(self.initial_state(index))
            .to(MotionProperties::neutral())
            .delay(self.delay_for(index))
            .easing(self.easing)
    }
}

/// Bind one entrance per element, staggered by position in `keys`
///
/// Positions always start from zero for the given slice. Detached elements
/// produce disposed handles and never fire.
pub fn bind_section(
    registry: &mut AnimationRegistry,
    keys: &[ItemKey],
    spec: &RevealSpec,
    elements: &dyn ElementLookup,
) -> Vec<AnimationHandle> {
    let handles: Vec<AnimationHandle> = keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let timeline = spec.timeline_for(index);
            registry.register(key, move || timeline, spec.threshold, elements)
        })
        .collect();

    tracing::debug!(
        section = registry.name(),
        bound = keys.len(),
        live = registry.live_count(),
        "bind_section"
    );
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementBounds, MountedElements, Viewport};
    use folio_animation::{AnimationScheduler, Interpolate};

    #[test]
    fn test_alternating_role_mirrors_odd_positions() {
        let spec = RevealSpec::new().offset(100.0, 0.0).rotation(15.0).alternating();

        let even = spec.initial_state(0);
        let odd = spec.initial_state(1);
        assert_eq!(even.translate_x, Some(100.0));
        assert_eq!(even.rotate_y, Some(15.0));
        assert_eq!(odd.translate_x, Some(-100.0));
        assert_eq!(odd.rotate_y, Some(-15.0));
    }

    #[test]
    fn test_timeline_ends_at_neutral() {
        let spec = RevealSpec::new().offset(0.0, 80.0).scale(0.9);
        let mut timeline = spec.timeline_for(2);
        assert_eq!(timeline.delay_ms(), 200.0);

        timeline.play();
        timeline.tick(timeline.total_ms());
        assert!(timeline.value().approx_eq(&MotionProperties::neutral(), 1e-5));
    }

    #[test]
    fn test_bind_section_staggers_from_zero() {
        let scheduler = AnimationScheduler::new();
        let mut registry = AnimationRegistry::new("cards", scheduler.handle());
        let mut elements = MountedElements::new();
        let keys: Vec<ItemKey> = (0..4).map(|i| ItemKey::new(format!("card-{i}"))).collect();
        for key in &keys {
            elements.mount(key.clone(), ElementBounds::new(500.0, 100.0));
        }

        let spec = RevealSpec::new().offset(0.0, 60.0);
        let handles = bind_section(&mut registry, &keys, &spec, &elements);
        assert_eq!(handles.len(), 4);

        registry.sync(&Viewport::new(0.0, 1000.0), &elements);
        for (i, handle) in handles.iter().enumerate() {
            let snapshot = registry.snapshot(*handle).unwrap();
            assert_eq!(snapshot.total_ms, 600.0 + 100.0 * i as f32);
        }
    }

    #[test]
    fn test_element_that_never_crosses_never_builds() {
        let scheduler = AnimationScheduler::new();
        let mut registry = AnimationRegistry::new("cards", scheduler.handle());
        let mut elements = MountedElements::new();
        let key = ItemKey::new("far");
        elements.mount(key.clone(), ElementBounds::new(10_000.0, 100.0));

        let handles = bind_section(&mut registry, &[key], &RevealSpec::new(), &elements);
        registry.sync(&Viewport::new(0.0, 1000.0), &elements);
        assert_eq!(registry.plays(handles[0]), 0);
        assert_eq!(scheduler.timeline_count(), 0);
    }
}
