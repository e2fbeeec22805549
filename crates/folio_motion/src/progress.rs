//! Progress indicators
//!
//! A progress bar is a reveal that only animates width, from 0% to a target
//! declared on the element (`data-width="85%"`).

use crate::element::{ElementLookup, ItemKey};
use crate::intersection::Threshold;
use crate::registry::{AnimationHandle, AnimationRegistry};
use folio_animation::{Easing, MotionProperties, Timeline};

/// Width animation for one progress bar
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSpec {
    target_percent: f32,
    pub duration_ms: f32,
    pub easing: Easing,
    pub threshold: Threshold,
}

impl ProgressSpec {
    /// Target is clamped to `[0, 100]`; NaN becomes 0
    pub fn new(target_percent: f32) -> Self {
        let target_percent = if target_percent.is_nan() {
            0.0
        } else {
            target_percent.clamp(0.0, 100.0)
        };

        Self {
            target_percent,
            duration_ms: 1000.0,
            easing: Easing::ExpoOut,
            threshold: Threshold::new(0.9),
        }
    }

    /// Parse a declared width such as `"85%"` or `"85"`
    ///
    /// Anything unparsable animates to 0%.
    pub fn from_data_width(width: &str) -> Self {
        let trimmed = width.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        match number.parse::<f32>() {
            Ok(percent) => Self::new(percent),
            Err(_) => {
                tracing::warn!(width, "unparsable progress width, using 0%");
                Self::new(0.0)
            }
        }
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms.max(0.0);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn target_percent(&self) -> f32 {
        self.target_percent
    }

    pub fn timeline(&self) -> Timeline {
        Timeline::new(self.duration_ms)
            .from(MotionProperties::new().width_percent(0.0))
            .to(MotionProperties::new().width_percent(self.target_percent))
            .easing(self.easing)
    }
}

/// Bind a progress bar; the width animates on first intersection
pub fn bind_progress(
    registry: &mut AnimationRegistry,
    key: &ItemKey,
    spec: &ProgressSpec,
    elements: &dyn ElementLookup,
) -> AnimationHandle {
    let timeline = spec.timeline();
    registry.register(key, move || timeline, spec.threshold, elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementBounds, MountedElements, Viewport};
    use folio_animation::AnimationScheduler;

    #[test]
    fn test_target_is_clamped() {
        assert_eq!(ProgressSpec::new(85.0).target_percent(), 85.0);
        assert_eq!(ProgressSpec::new(140.0).target_percent(), 100.0);
        assert_eq!(ProgressSpec::new(-5.0).target_percent(), 0.0);
        assert_eq!(ProgressSpec::new(f32::NAN).target_percent(), 0.0);
    }

    #[test]
    fn test_from_data_width() {
        assert_eq!(ProgressSpec::from_data_width("85%").target_percent(), 85.0);
        assert_eq!(ProgressSpec::from_data_width(" 60 ").target_percent(), 60.0);
        assert_eq!(ProgressSpec::from_data_width("150%").target_percent(), 100.0);
        assert_eq!(ProgressSpec::from_data_width("wide").target_percent(), 0.0);
        assert_eq!(ProgressSpec::from_data_width("").target_percent(), 0.0);
    }

    #[test]
    fn test_bound_progress_reaches_target_without_overshoot() {
        let scheduler = AnimationScheduler::new();
        let mut registry = AnimationRegistry::new("languages", scheduler.handle());
        let mut elements = MountedElements::new();
        let key = ItemKey::new("languages/english/bar");
        elements.mount(key.clone(), ElementBounds::new(400.0, 8.0));

        let handle = bind_progress(&mut registry, &key, &ProgressSpec::new(250.0), &elements);
        registry.sync(&Viewport::new(0.0, 1000.0), &elements);

        let mut peak: f32 = 0.0;
        for _ in 0..80 {
            scheduler.tick_with(16.0);
            let width = registry.value(handle).and_then(|v| v.width_percent).unwrap();
            peak = peak.max(width);
        }
        assert!(peak <= 100.0);
        assert_eq!(registry.value(handle).unwrap().width_percent, Some(100.0));
    }
}
