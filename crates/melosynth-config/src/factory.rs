//! Factory presets bundled with melosynth.
//!
//! Embedded as TOML so they go through the same parser as user presets.

use crate::SynthPreset;

/// Names of the built-in presets.
pub static FACTORY_PRESET_NAMES: &[&str] = &["sine", "reed", "brass", "legato", "crepe"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("sine", SINE_PRESET),
    ("reed", REED_PRESET),
    ("brass", BRASS_PRESET),
    ("legato", LEGATO_PRESET),
    ("crepe", CREPE_PRESET),
];

const SINE_PRESET: &str = r#"
name = "Sine"
description = "Single sinusoid, the plain synthesis defaults"
sample_rate = 16000
harmonics = 1
waveform = "sawtooth"
transition_ms = 10.0
"#;

const REED_PRESET: &str = r#"
name = "Reed"
description = "Odd harmonics for a hollow, clarinet-like tone"
sample_rate = 16000
harmonics = 5
waveform = "square"
transition_ms = 10.0
"#;

const BRASS_PRESET: &str = r#"
name = "Brass"
description = "Eight sawtooth harmonics at 22.05 kHz"
sample_rate = 22050
harmonics = 8
waveform = "sawtooth"
transition_ms = 15.0
"#;

const LEGATO_PRESET: &str = r#"
name = "Legato"
description = "Long glides and soft onsets for sung melodies"
sample_rate = 16000
harmonics = 3
waveform = "sawtooth"
transition_ms = 30.0
"#;

const CREPE_PRESET: &str = r#"
name = "CREPE"
description = "Gate tuned for CREPE output: 120-720 Hz, confidence >= 0.5"
sample_rate = 16000
harmonics = 1
waveform = "sawtooth"
transition_ms = 10.0

[gate]
min_hz = 120.0
max_hz = 720.0
min_confidence = 0.5
"#;

/// All factory presets, parsed.
pub fn factory_presets() -> Vec<SynthPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| SynthPreset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by key or display name, case-insensitively.
pub fn get_factory_preset(name: &str) -> Option<SynthPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(key, toml)| SynthPreset::from_toml(toml).ok().map(|p| (*key, p)))
        .find(|(key, preset)| {
            key.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name)
        })
        .map(|(_, preset)| preset)
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use melosynth_core::Waveform;

    #[test]
    fn all_factory_presets_parse_and_validate() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let preset = SynthPreset::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{name}' should parse: {e}"));
            assert!(preset.description.is_some(), "'{name}' needs a description");
            preset
                .validate()
                .unwrap_or_else(|e| panic!("factory preset '{name}' invalid: {e}"));
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn lookup_by_key_and_display_name() {
        assert_eq!(get_factory_preset("reed").unwrap().name, "Reed");
        assert_eq!(get_factory_preset("LEGATO").unwrap().name, "Legato");
        assert_eq!(get_factory_preset("CREPE").unwrap().name, "CREPE");
        assert!(get_factory_preset("nonexistent").is_none());
        assert!(is_factory_preset("brass"));
    }

    #[test]
    fn reed_is_square() {
        let config = get_factory_preset("reed").unwrap().to_config().unwrap();
        assert_eq!(config.waveform(), Waveform::Square);
        assert_eq!(config.harmonics(), 5);
    }

    #[test]
    fn crepe_gate() {
        let gate = get_factory_preset("crepe").unwrap().voicing_gate().unwrap();
        assert_eq!(gate, melosynth_core::VoicingGate::crepe());
    }
}
