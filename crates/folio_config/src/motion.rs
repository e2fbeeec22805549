//! `[motion]` table: timing, easing and thresholds shared by every section

use folio_animation::Easing;
use folio_motion::{Threshold, VelocityConfig};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Motion tuning
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MotionSettings {
    /// Curve used by every reveal and progress bar
    #[serde(default = "default_easing")]
    pub easing: Easing,

    /// Delay between staggered siblings (ms)
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: f32,

    /// Default reveal duration (ms)
    #[serde(default = "default_reveal_ms")]
    pub reveal_ms: f32,

    /// Experience card duration (ms)
    #[serde(default = "default_experience_ms")]
    pub experience_ms: f32,

    /// Progress bar duration (ms)
    #[serde(default = "default_progress_ms")]
    pub progress_ms: f32,

    #[serde(default)]
    pub thresholds: ThresholdSettings,

    #[serde(default)]
    pub velocity: VelocitySettings,
}

fn default_easing() -> Easing {
    Easing::ExpoOut
}

fn default_stagger_ms() -> f32 {
    100.0
}

fn default_reveal_ms() -> f32 {
    600.0
}

fn default_experience_ms() -> f32 {
    800.0
}

fn default_progress_ms() -> f32 {
    1000.0
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            easing: default_easing(),
            stagger_ms: default_stagger_ms(),
            reveal_ms: default_reveal_ms(),
            experience_ms: default_experience_ms(),
            progress_ms: default_progress_ms(),
            thresholds: ThresholdSettings::default(),
            velocity: VelocitySettings::default(),
        }
    }
}

/// Trigger lines, written the way designers write them (`"top 85%"`)
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_reveal_threshold", deserialize_with = "threshold")]
    pub reveal: Threshold,

    #[serde(default = "default_experience_threshold", deserialize_with = "threshold")]
    pub experience: Threshold,

    #[serde(default = "default_progress_threshold", deserialize_with = "threshold")]
    pub progress: Threshold,
}

fn default_reveal_threshold() -> Threshold {
    Threshold::new(0.85)
}

fn default_experience_threshold() -> Threshold {
    Threshold::new(0.80)
}

fn default_progress_threshold() -> Threshold {
    Threshold::new(0.90)
}

fn threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Threshold, D::Error> {
    let text = String::deserialize(deserializer)?;
    text.parse().map_err(serde::de::Error::custom)
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            reveal: default_reveal_threshold(),
            experience: default_experience_threshold(),
            progress: default_progress_threshold(),
        }
    }
}

/// `[motion.velocity]`: scroll skew tuning
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct VelocitySettings {
    #[serde(default = "default_velocity_scale")]
    pub scale: f32,
    #[serde(default = "default_max_skew")]
    pub max_skew_deg: f32,
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
}

fn default_velocity_scale() -> f32 {
    0.02
}

fn default_max_skew() -> f32 {
    3.0
}

fn default_smoothing() -> f32 {
    0.1
}

fn default_idle_ms() -> u64 {
    100
}

impl Default for VelocitySettings {
    fn default() -> Self {
        Self {
            scale: default_velocity_scale(),
            max_skew_deg: default_max_skew(),
            smoothing: default_smoothing(),
            idle_ms: default_idle_ms(),
        }
    }
}

impl VelocitySettings {
    pub fn to_config(&self) -> VelocityConfig {
        VelocityConfig {
            scale: self.scale,
            max_skew_deg: self.max_skew_deg,
            smoothing: self.smoothing,
            idle_after: Duration::from_millis(self.idle_ms),
        }
    }

    /// Smoothing outside `(0, 1]` never converges or overshoots
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(format!(
                "motion.velocity.smoothing must be in (0, 1], got {}",
                self.smoothing
            ));
        }
        if !(self.scale >= 0.0 && self.max_skew_deg >= 0.0) {
            return Err("motion.velocity scale and max_skew_deg must be non-negative".to_string());
        }
        Ok(())
    }
}
