//! # Configuration
//!
//! [`ComposerConfig`] is layered by figment: defaults, an optional TOML file,
//! then `PENTAD_*` environment variables.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{BendVariant, ShiftMode},
    permutation::PermutationError,
    scene::Layout,
};

use super::easing::Easing;

/// Prefix of the environment variables read by [`ComposerConfig::figment`].
pub const ENV_PREFIX: &str = "PENTAD_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Length of one swap animation, in milliseconds.
    pub duration_ms: f64,
    pub easing: Easing,
    /// Settle the labels first, then move the anchors.
    pub multi_stage: bool,
    /// Fraction of the animation spent morphing in multi-stage mode.
    pub stage_split: f64,
    /// Pause between morphing and shifting in multi-stage mode.
    pub dead_zone: f64,
    pub main_radius: f64,
    pub pentad_radius: f64,
    pub slot_radius: f64,
    pub shift_mode: ShiftMode,
    pub variant: BendVariant,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            duration_ms: 1200.0,
            easing: Easing::default(),
            multi_stage: false,
            stage_split: 0.45,
            dead_zone: 0.10,
            main_radius: 160.0,
            pentad_radius: 40.0,
            slot_radius: 320.0,
            shift_mode: ShiftMode::default(),
            variant: BendVariant::default(),
        }
    }
}

impl ComposerConfig {
    /// Defaults, then the TOML file if one is given, then `PENTAD_*` variables.
    pub fn figment(toml: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(ComposerConfig::default()));
        let figment = match toml {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment,
        };
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        let config: ComposerConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), figment::Error> {
        if self.duration_ms.is_nan() || self.duration_ms <= 0.0 {
            return Err(format!("duration_ms must be positive, got {}", self.duration_ms).into());
        }
        let settled = self.stage_split + self.dead_zone;
        if self.stage_split <= 0.0 || self.dead_zone < 0.0 || settled >= 1.0 {
            return Err(format!(
                "stage_split ({}) and dead_zone ({}) must leave room for the shift stage",
                self.stage_split, self.dead_zone
            )
            .into());
        }
        Ok(())
    }

    pub fn layout(&self) -> Result<Layout, PermutationError> {
        Layout::new(
            self.main_radius,
            self.pentad_radius,
            self.slot_radius,
            self.variant,
        )
    }

    /// Morph and shift parameters at raw progress `p`.
    ///
    /// In multi-stage mode the morph runs over `[0, stage_split]`, nothing moves
    /// during the dead zone, and the shift runs over the rest.
    pub fn stages(&self, p: f64) -> (f64, f64) {
        if !self.multi_stage {
            let t = self.easing.apply(p);
            return (t, t);
        }
        let start = self.stage_split + self.dead_zone;
        let morph = self.easing.apply((p / self.stage_split).min(1.0));
        let shift = self
            .easing
            .apply(((p - start) / (1.0 - start)).clamp(0.0, 1.0));
        (morph, shift)
    }
}
