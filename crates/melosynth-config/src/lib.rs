//! Configuration and preset management for melosynth.
//!
//! A [`SynthPreset`] is a TOML description of everything a synthesis run
//! needs beyond the contour itself: sample rate, harmonic stacking, transition
//! length, output bit depth and how raw tracker frames are voiced.
//!
//! # Features
//!
//! - **Presets**: load and save [`SynthPreset`] files
//! - **Factory presets**: built-in starting points ([`get_factory_preset`])
//! - **Paths**: platform-specific preset directories ([`paths`])
//! - **Resolution**: [`resolve_preset`] finds a preset by name or path
//!
//! # Example
//!
//! ```rust,no_run
//! use melosynth_config::{SynthPreset, resolve_preset};
//!
//! let preset = resolve_preset("reed").unwrap();
//! let config = preset.to_config().unwrap();
//! assert_eq!(config.harmonics(), 5);
//!
//! let mine = SynthPreset::new("Mine").with_harmonics(2);
//! mine.save("mine.toml").unwrap();
//! ```

mod error;
mod factory;
mod preset;

/// Platform-specific preset directories.
pub mod paths;

pub use error::ConfigError;
pub use factory::{FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset};
pub use paths::{find_preset, user_presets_dir};
pub use preset::{BIT_DEPTHS, GateConfig, SynthPreset, parse_negative_policy, parse_waveform};

/// Resolve a preset by name or path.
///
/// Searches factory presets first, then user and system preset directories,
/// then treats `name` as a file path (see [`find_preset`]).
pub fn resolve_preset(name: &str) -> Result<SynthPreset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }
    match find_preset(name) {
        Some(path) => SynthPreset::load(path),
        None => Err(ConfigError::PresetNotFound(name.to_string())),
    }
}
