//! # Easing

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Timing curves. All of them fix 0 and 1, are monotonic, and the two
/// ease-in-out curves are symmetric about `(0.5, 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseInOutCubic,
    EaseInOutSine,
}

impl Easing {
    /// Eased value of `t`, clamped to `[0, 1]` first.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}
