//! Instrument Configuration - tuning-physics constants as operator-tunable TOML values
//!
//! Every constant of the prescription and rendering models is a field in
//! this module. Each struct implements `Default` with the canonical
//! values, ensuring zero-change behavior when no config file is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for an instrument / workshop deployment.
///
/// Load with `InstrumentConfig::load()` which searches:
/// 1. `$TONESMITH_CONFIG` env var
/// 2. `./tonesmith.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Instrument identification
    #[serde(default)]
    pub instrument: InstrumentInfo,

    /// Strike force and energy model constants
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Color-field rendering constants
    #[serde(default)]
    pub rendering: RenderingConfig,

    /// Resting-surface relief and sampling density
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Session adapter settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            instrument: InstrumentInfo::default(),
            physics: PhysicsConfig::default(),
            rendering: RenderingConfig::default(),
            surface: SurfaceConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl InstrumentConfig {
    /// Load configuration using the standard search order:
    /// 1. `$TONESMITH_CONFIG` environment variable
    /// 2. `./tonesmith.toml` in the current working directory
    /// 3. Built-in defaults (the canonical constants)
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var("TONESMITH_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), instrument = %config.instrument.name, "Loaded instrument config from TONESMITH_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from TONESMITH_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "TONESMITH_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./tonesmith.toml
        let local = PathBuf::from("tonesmith.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(instrument = %config.instrument.name, "Loaded instrument config from ./tonesmith.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./tonesmith.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No tonesmith.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all constants for physical consistency.
    ///
    /// Rules:
    /// - Force limit must exceed base force (otherwise no strike fits)
    /// - Stiffness factors, scales and radii must be positive
    /// - Sampling densities must be at least 4
    /// - Tension must stay within [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let p = &self.physics;
        if p.force_limit <= p.base_force {
            errors.push(format!(
                "physics.force_limit ({}) must exceed physics.base_force ({})",
                p.force_limit, p.base_force
            ));
        }
        if p.energy_scale <= 0.0 {
            errors.push("physics.energy_scale must be positive".into());
        }
        if !(0.0 < p.min_efficiency && p.min_efficiency <= 1.0) {
            errors.push("physics.min_efficiency must be in (0, 1]".into());
        }
        if p.max_strike_count < 1 {
            errors.push("physics.max_strike_count must be at least 1".into());
        }
        for (name, value) in [
            ("stiffness_tonic", p.stiffness_tonic),
            ("stiffness_octave", p.stiffness_octave),
            ("stiffness_fifth", p.stiffness_fifth),
        ] {
            if value <= 0.0 {
                errors.push(format!("physics.{} must be positive", name));
            }
        }

        let r = &self.rendering;
        if !(0.0 < r.dimple_radius && r.dimple_radius < 1.0) {
            errors.push("rendering.dimple_radius must be in (0, 1)".into());
        }
        if r.spotlight_radius <= 0.0 {
            errors.push("rendering.spotlight_radius must be positive".into());
        }
        if r.spotlight_gain < 0.0 {
            errors.push("rendering.spotlight_gain must not be negative".into());
        }
        if !(0.0 < r.anti_bleed_threshold && r.anti_bleed_threshold < 1.0) {
            errors.push("rendering.anti_bleed_threshold must be in (0, 1)".into());
        }

        let s = &self.surface;
        if !(0.0..=1.0).contains(&s.tension) {
            errors.push("surface.tension must be in [0, 1]".into());
        }
        if s.frequency <= 0.0 {
            errors.push("surface.frequency must be positive".into());
        }
        if s.height_scale <= 0.0 {
            errors.push("surface.height_scale must be positive".into());
        }
        if s.angular_samples < 4 || s.radial_samples < 4 {
            errors.push("surface sampling must be at least 4 x 4".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration loading / validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("failed to parse config file {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),
    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

/// Instrument identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentInfo {
    #[serde(default = "defaults::instrument_name")]
    pub name: String,
    /// Free-form workshop notes
    #[serde(default)]
    pub notes: String,
}

impl Default for InstrumentInfo {
    fn default() -> Self {
        Self {
            name: defaults::instrument_name(),
            notes: String::new(),
        }
    }
}

/// Strike force and energy model constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Hard ceiling for a single strike's force
    #[serde(default = "defaults::force_limit")]
    pub force_limit: f64,
    /// Force cost of any strike before tuning energy is added
    #[serde(default = "defaults::base_force")]
    pub base_force: f64,
    /// Hz-to-energy conversion factor
    #[serde(default = "defaults::energy_scale")]
    pub energy_scale: f64,
    /// Floor for the coordinate-projection efficiency
    #[serde(default = "defaults::min_efficiency")]
    pub min_efficiency: f64,
    /// Largest repeat count the splitter will try
    #[serde(default = "defaults::max_strike_count")]
    pub max_strike_count: u32,
    #[serde(default = "defaults::stiffness_tonic")]
    pub stiffness_tonic: f64,
    #[serde(default = "defaults::stiffness_octave")]
    pub stiffness_octave: f64,
    #[serde(default = "defaults::stiffness_fifth")]
    pub stiffness_fifth: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            force_limit: defaults::force_limit(),
            base_force: defaults::base_force(),
            energy_scale: defaults::energy_scale(),
            min_efficiency: defaults::min_efficiency(),
            max_strike_count: defaults::max_strike_count(),
            stiffness_tonic: defaults::stiffness_tonic(),
            stiffness_octave: defaults::stiffness_octave(),
            stiffness_fifth: defaults::stiffness_fifth(),
        }
    }
}

impl PhysicsConfig {
    /// Stiffness factor for a partial
    pub fn stiffness(&self, partial: crate::types::Partial) -> f64 {
        match partial {
            crate::types::Partial::Tonic => self.stiffness_tonic,
            crate::types::Partial::Octave => self.stiffness_octave,
            crate::types::Partial::Fifth => self.stiffness_fifth,
        }
    }
}

/// Color-field rendering constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Aspect-normalized radius of the inert central dimple
    #[serde(default = "defaults::dimple_radius")]
    pub dimple_radius: f64,
    /// Spotlight reach around the active strike coordinate
    #[serde(default = "defaults::spotlight_radius")]
    pub spotlight_radius: f64,
    /// Peak spotlight brightness boost (0.6 = 1.6x at the center)
    #[serde(default = "defaults::spotlight_gain")]
    pub spotlight_gain: f64,
    /// Pole-lobe dominance above which the fifth's weight is damped
    #[serde(default = "defaults::anti_bleed_threshold")]
    pub anti_bleed_threshold: f64,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            dimple_radius: defaults::dimple_radius(),
            spotlight_radius: defaults::spotlight_radius(),
            spotlight_gain: defaults::spotlight_gain(),
            anti_bleed_threshold: defaults::anti_bleed_threshold(),
        }
    }
}

/// Resting-surface relief and sampling density
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Membrane tension, 0.0 (slack) to 1.0 (tight)
    #[serde(default = "defaults::tension")]
    pub tension: f64,
    /// Radial relief wave frequency
    #[serde(default = "defaults::frequency")]
    pub frequency: f64,
    /// Relief height scale in surface units
    #[serde(default = "defaults::height_scale")]
    pub height_scale: f64,
    #[serde(default = "defaults::angular_samples")]
    pub angular_samples: usize,
    #[serde(default = "defaults::radial_samples")]
    pub radial_samples: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            tension: defaults::tension(),
            frequency: defaults::frequency(),
            height_scale: defaults::height_scale(),
            angular_samples: defaults::angular_samples(),
            radial_samples: defaults::radial_samples(),
        }
    }
}

/// Session adapter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for the fifth-lobe side coin flip
    #[serde(default = "defaults::side_seed")]
    pub side_seed: u64,
    /// Directory of the sled history database
    #[serde(default = "defaults::history_path")]
    pub history_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            side_seed: defaults::side_seed(),
            history_path: defaults::history_path(),
        }
    }
}

/// Canonical default values, one function per field so serde and
/// `Default` impls cannot drift apart.
pub mod defaults {
    pub fn instrument_name() -> String {
        "Workshop Tonefield".to_string()
    }
    pub fn force_limit() -> f64 {
        42.0
    }
    pub fn base_force() -> f64 {
        20.0
    }
    pub fn energy_scale() -> f64 {
        30.0
    }
    pub fn min_efficiency() -> f64 {
        0.1
    }
    pub fn max_strike_count() -> u32 {
        10
    }
    pub fn stiffness_tonic() -> f64 {
        1.0
    }
    pub fn stiffness_octave() -> f64 {
        0.9
    }
    pub fn stiffness_fifth() -> f64 {
        1.2
    }
    pub fn dimple_radius() -> f64 {
        0.35
    }
    pub fn spotlight_radius() -> f64 {
        0.4
    }
    pub fn spotlight_gain() -> f64 {
        0.6
    }
    pub fn anti_bleed_threshold() -> f64 {
        0.7
    }
    pub fn tension() -> f64 {
        0.5
    }
    pub fn frequency() -> f64 {
        1.0
    }
    pub fn height_scale() -> f64 {
        0.08
    }
    pub fn angular_samples() -> usize {
        64
    }
    pub fn radial_samples() -> usize {
        32
    }
    pub fn side_seed() -> u64 {
        0x5EED_F1F7
    }
    pub fn history_path() -> String {
        "tonesmith_history".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        InstrumentConfig::default()
            .validate()
            .expect("built-in defaults must validate");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: InstrumentConfig = toml::from_str(
            r#"
[physics]
force_limit = 50.0

[instrument]
name = "Bench D-minor"
"#,
        )
        .expect("partial config must parse");
        assert_eq!(cfg.physics.force_limit, 50.0);
        assert_eq!(cfg.physics.base_force, 20.0);
        assert_eq!(cfg.instrument.name, "Bench D-minor");
        assert_eq!(cfg.surface.angular_samples, 64);
    }

    #[test]
    fn test_validation_rejects_inverted_force_limits() {
        let mut cfg = InstrumentConfig::default();
        cfg.physics.force_limit = 10.0;
        let err = cfg.validate().expect_err("limit below base force must fail");
        assert!(err.to_string().contains("force_limit"));
    }

    #[test]
    fn test_validation_rejects_out_of_range_tension() {
        let mut cfg = InstrumentConfig::default();
        cfg.surface.tension = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = InstrumentConfig::default();
        let toml_str = cfg.to_toml().expect("serialize");
        let back: InstrumentConfig = toml::from_str(&toml_str).expect("reparse");
        assert_eq!(back.physics.force_limit, cfg.physics.force_limit);
        assert_eq!(back.session.side_seed, cfg.session.side_seed);
    }
}
