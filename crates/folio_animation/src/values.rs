//! Animatable value types
//!
//! Provides the interpolation trait and the multi-property value that entrance
//! and progress timelines animate.

use std::fmt;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Option<f32> {
    /// Missing endpoints hold the other side's value
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Some(a), Some(b)) => Some(a.lerp(b, t)),
            (Some(a), None) => Some(*a),
            (None, Some(b)) => Some(*b),
            (None, None) => None,
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Interpolate::approx_eq(a, b, epsilon),
            (None, None) => true,
            _ => false,
        }
    }
}

// ============================================================================
// Multi-property motion value
// ============================================================================

/// Visual properties of one element at one instant
///
/// Unset properties are left untouched by the renderer. Width is a percentage
/// of the parent track (progress bars); rotation is around the Y axis in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionProperties {
    pub translate_x: Option<f32>,
    pub translate_y: Option<f32>,
    pub opacity: Option<f32>,
    pub scale: Option<f32>,
    pub rotate_y: Option<f32>,
    pub width_percent: Option<f32>,
}

impl MotionProperties {
    /// Empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Resting state of an entrance: no offset, fully opaque, unscaled, unrotated
    pub fn neutral() -> Self {
        Self {
            translate_x: Some(0.0),
            translate_y: Some(0.0),
            opacity: Some(1.0),
            scale: Some(1.0),
            rotate_y: Some(0.0),
            width_percent: None,
        }
    }

    pub fn translate_x(mut self, x: f32) -> Self {
        self.translate_x = Some(x);
        self
    }

    pub fn translate_y(mut self, y: f32) -> Self {
        self.translate_y = Some(y);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = Some(degrees);
        self
    }

    pub fn width_percent(mut self, percent: f32) -> Self {
        self.width_percent = Some(percent);
        self
    }
}

impl Interpolate for MotionProperties {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            translate_x: self.translate_x.lerp(&other.translate_x, t),
            translate_y: self.translate_y.lerp(&other.translate_y, t),
            opacity: self.opacity.lerp(&other.opacity, t),
            scale: self.scale.lerp(&other.scale, t),
            rotate_y: self.rotate_y.lerp(&other.rotate_y, t),
            width_percent: self.width_percent.lerp(&other.width_percent, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.translate_x.approx_eq(&other.translate_x, epsilon)
            && self.translate_y.approx_eq(&other.translate_y, epsilon)
            && self.opacity.approx_eq(&other.opacity, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
            && self.rotate_y.approx_eq(&other.rotate_y, epsilon)
            && self.width_percent.approx_eq(&other.width_percent, epsilon)
    }
}

/// CSS-like rendering, e.g. `translate(0px, 80px) scale(0.90) opacity(0.00)`
impl fmt::Display for MotionProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.translate_x.is_some() || self.translate_y.is_some() {
            parts.push(format!(
                "translate({:.1}px, {:.1}px)",
                self.translate_x.unwrap_or(0.0),
                self.translate_y.unwrap_or(0.0)
            ));
        }
        if let Some(scale) = self.scale {
            parts.push(format!("scale({scale:.2})"));
        }
        if let Some(rotate) = self.rotate_y {
            parts.push(format!("rotateY({rotate:.1}deg)"));
        }
        if let Some(opacity) = self.opacity {
            parts.push(format!("opacity({opacity:.2})"));
        }
        if let Some(width) = self.width_percent {
            parts.push(format!("width({width:.1}%)"));
        }

        if parts.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_motion_properties_interpolation() {
        let from = MotionProperties::new()
            .translate_y(80.0)
            .opacity(0.0)
            .scale(0.9);
        let to = MotionProperties::new()
            .translate_y(0.0)
            .opacity(1.0)
            .scale(1.0);

        let mid = from.lerp(&to, 0.5);
        assert!((mid.translate_y.unwrap() - 40.0).abs() < 1e-5);
        assert!((mid.opacity.unwrap() - 0.5).abs() < 1e-5);
        assert!((mid.scale.unwrap() - 0.95).abs() < 1e-5);

        // Untouched properties stay unset
        assert_eq!(mid.translate_x, None);
        assert_eq!(mid.rotate_y, None);
    }

    #[test]
    fn test_display() {
        let props = MotionProperties::new().translate_y(80.0).opacity(0.0);
        assert_eq!(props.to_string(), "translate(0.0px, 80.0px) opacity(0.00)");
        assert_eq!(MotionProperties::new().to_string(), "none");
    }
}
