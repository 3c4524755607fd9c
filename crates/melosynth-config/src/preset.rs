//! Synthesis preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use melosynth_core::{
    DEFAULT_SAMPLE_RATE, DEFAULT_TARGET_PEAK, NegativePolicy, SynthConfig, VoicingGate, Waveform,
};

use crate::error::ConfigError;

/// PCM bit depths a preset may request.
pub const BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Frequency/confidence gate section of a preset.
///
/// Missing bounds fall back to a pass-through gate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct GateConfig {
    /// Lowest voiced frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_hz: Option<f64>,
    /// Highest voiced frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hz: Option<f64>,
    /// Minimum tracker confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_confidence: Option<f64>,
}

impl From<GateConfig> for VoicingGate {
    fn from(gate: GateConfig) -> Self {
        let open = VoicingGate::default();
        VoicingGate {
            min_hz: gate.min_hz.unwrap_or(open.min_hz),
            max_hz: gate.max_hz.unwrap_or(open.max_hz),
            min_confidence: gate.min_confidence.unwrap_or(open.min_confidence),
        }
    }
}

/// A named synthesis configuration stored as TOML.
///
/// # TOML Format
///
/// ```toml
/// name = "Reed"
/// description = "Hollow odd-harmonic tone"
/// sample_rate = 16000
/// harmonics = 5
/// waveform = "square"
/// transition_ms = 10.0
/// target_peak = 0.8
/// bit_depth = 16
/// negative_policy = "silence"
///
/// [gate]
/// min_hz = 120.0
/// max_hz = 720.0
/// min_confidence = 0.5
/// ```
///
/// Every field except `name` is optional and falls back to the synthesis
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Number of stacked harmonics.
    #[serde(default = "default_harmonics")]
    pub harmonics: u32,

    /// Harmonic series: `"sawtooth"` or `"square"`.
    #[serde(default = "default_waveform")]
    pub waveform: String,

    /// Fade / glide duration in milliseconds.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: f64,

    /// Normalized peak amplitude.
    #[serde(default = "default_target_peak")]
    pub target_peak: f64,

    /// PCM bit depth for WAV output.
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u16,

    /// How negative input frequencies are read: `"silence"` or `"absolute"`.
    #[serde(default = "default_negative_policy")]
    pub negative_policy: String,

    /// Optional voicing gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateConfig>,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_harmonics() -> u32 {
    1
}

fn default_waveform() -> String {
    Waveform::default().name().to_string()
}

fn default_transition_ms() -> f64 {
    melosynth_core::DEFAULT_TRANSITION * 1000.0
}

fn default_target_peak() -> f64 {
    DEFAULT_TARGET_PEAK
}

fn default_bit_depth() -> u16 {
    16
}

fn default_negative_policy() -> String {
    "silence".to_string()
}

/// Parse a waveform name as used in presets and on the command line.
pub fn parse_waveform(name: &str) -> Result<Waveform, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
        "square" => Ok(Waveform::Square),
        _ => Err(ConfigError::InvalidValue {
            field: "waveform",
            value: name.to_string(),
            expected: "sawtooth, square",
        }),
    }
}

/// Parse a negative-frequency policy name.
pub fn parse_negative_policy(name: &str) -> Result<NegativePolicy, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "silence" => Ok(NegativePolicy::Silence),
        "absolute" => Ok(NegativePolicy::Absolute),
        _ => Err(ConfigError::InvalidValue {
            field: "negative_policy",
            value: name.to_string(),
            expected: "silence, absolute",
        }),
    }
}

impl SynthPreset {
    /// Create a preset with default synthesis settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            harmonics: default_harmonics(),
            waveform: default_waveform(),
            transition_ms: default_transition_ms(),
            target_peak: default_target_peak(),
            bit_depth: default_bit_depth(),
            negative_policy: default_negative_policy(),
            gate: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the harmonic count.
    pub fn with_harmonics(mut self, harmonics: u32) -> Self {
        self.harmonics = harmonics;
        self
    }

    /// Set the harmonic series.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform.name().to_string();
        self
    }

    /// Set the transition duration in milliseconds.
    pub fn with_transition_ms(mut self, ms: f64) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Set the voicing gate.
    pub fn with_gate(mut self, gate: GateConfig) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Parsed harmonic series.
    pub fn waveform(&self) -> Result<Waveform, ConfigError> {
        parse_waveform(&self.waveform)
    }

    /// Parsed negative-frequency policy.
    pub fn negative_policy(&self) -> Result<NegativePolicy, ConfigError> {
        parse_negative_policy(&self.negative_policy)
    }

    /// Voicing gate, validated. A preset without `[gate]` passes every frame.
    pub fn voicing_gate(&self) -> Result<VoicingGate, ConfigError> {
        let gate = VoicingGate::from(self.gate.unwrap_or_default());
        gate.validate()?;
        Ok(gate)
    }

    /// Build the validated synthesis configuration.
    pub fn to_config(&self) -> Result<SynthConfig, ConfigError> {
        Ok(SynthConfig::builder()
            .sample_rate(self.sample_rate)
            .harmonics(self.harmonics)
            .waveform(self.waveform()?)
            .transition_ms(self.transition_ms)
            .target_peak(self.target_peak)
            .build()?)
    }

    /// Check every field that [`to_config`](Self::to_config) and friends
    /// would, plus the output bit depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_config()?;
        self.negative_policy()?;
        self.voicing_gate()?;
        if !BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(ConfigError::InvalidValue {
                field: "bit_depth",
                value: self.bit_depth.to_string(),
                expected: "16, 24, 32",
            });
        }
        Ok(())
    }
}

impl Default for SynthPreset {
    fn default() -> Self {
        Self::new("Default")
    }
}
