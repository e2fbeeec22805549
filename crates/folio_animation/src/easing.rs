//! Easing curves
//!
//! Maps linear progress (0.0 to 1.0) onto eased progress. Curves are named the
//! way the site's motion config spells them (`expo.out`, `power1.inOut`), with
//! CSS-style aliases accepted as well.

use std::fmt;
use std::str::FromStr;

/// An easing curve applied to normalized tween progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub enum Easing {
    /// Constant velocity
    #[default]
    Linear,
    /// Quadratic acceleration from zero velocity
    EaseIn,
    /// Quadratic deceleration to zero velocity
    EaseOut,
    /// Quadratic acceleration then deceleration
    EaseInOut,
    /// Cubic deceleration
    CubicOut,
    /// Exponential acceleration
    ExpoIn,
    /// Exponential deceleration (fast start, long settle)
    ExpoOut,
    /// Exponential acceleration then deceleration
    ExpoInOut,
}

impl Easing {
    /// Apply the curve to linear progress `t`
    ///
    /// Input is clamped to `[0, 1]`; every curve maps 0 to 0 and 1 to 1 and
    /// stays inside `[0, 1]` in between.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::ExpoIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }

    /// Canonical config name of this curve
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "power1.in",
            Easing::EaseOut => "power1.out",
            Easing::EaseInOut => "power1.inOut",
            Easing::CubicOut => "power2.out",
            Easing::ExpoIn => "expo.in",
            Easing::ExpoOut => "expo.out",
            Easing::ExpoInOut => "expo.inOut",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an easing name is not recognized
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEasingError(pub String);

impl fmt::Display for ParseEasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown easing curve '{}'", self.0)
    }
}

impl std::error::Error for ParseEasingError {}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "none" => Ok(Easing::Linear),
            "power1.in" | "ease-in" | "quad.in" => Ok(Easing::EaseIn),
            "power1.out" | "ease-out" | "quad.out" => Ok(Easing::EaseOut),
            "power1.inout" | "ease-in-out" | "quad.inout" => Ok(Easing::EaseInOut),
            "power2.out" | "cubic.out" | "cubic-out" => Ok(Easing::CubicOut),
            "expo.in" => Ok(Easing::ExpoIn),
            "expo.out" => Ok(Easing::ExpoOut),
            "expo.inout" => Ok(Easing::ExpoInOut),
            _ => Err(ParseEasingError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = ParseEasingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
