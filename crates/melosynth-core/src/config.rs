//! Synthesis configuration.

use crate::error::{Result, SynthError};

/// Default synthesis sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 16000;

/// Default transition (fade / glide) duration in seconds.
pub const DEFAULT_TRANSITION: f64 = 0.010;

/// Default normalized peak amplitude, as a fraction of full scale.
pub const DEFAULT_TARGET_PEAK: f64 = 0.8;

/// Harmonic series used to stack partials on the fundamental.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// All harmonics `1, 2, 3, ...` weighted `1/n`, sawtooth-like.
    #[default]
    Sawtooth,
    /// Odd harmonics `1, 3, 5, ...` weighted `1/n`, square-like.
    Square,
}

impl Waveform {
    /// Multiplier of the fundamental for harmonic index `h` (zero-based).
    #[inline]
    pub fn harmonic_number(self, h: u32) -> u32 {
        match self {
            Self::Sawtooth => h + 1,
            Self::Square => 2 * h + 1,
        }
    }

    /// Lowercase name used in presets and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sawtooth => "sawtooth",
            Self::Square => "square",
        }
    }
}

/// Immutable, validated configuration for one synthesis run.
///
/// Built through [`SynthConfig::builder`]; invalid values are rejected at
/// [`SynthConfigBuilder::build`], never inside the render loop.
///
/// # Example
///
/// ```rust
/// use melosynth_core::{SynthConfig, Waveform};
///
/// let config = SynthConfig::builder()
///     .sample_rate(22050)
///     .harmonics(4)
///     .waveform(Waveform::Square)
///     .build()
///     .unwrap();
/// assert_eq!(config.harmonics(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthConfig {
    sample_rate: u32,
    harmonics: u32,
    waveform: Waveform,
    transition: f64,
    target_peak: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            harmonics: 1,
            waveform: Waveform::Sawtooth,
            transition: DEFAULT_TRANSITION,
            target_peak: DEFAULT_TARGET_PEAK,
        }
    }
}

impl SynthConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> SynthConfigBuilder {
        SynthConfigBuilder::default()
    }

    /// Turn this configuration back into a builder for overriding fields.
    pub fn to_builder(self) -> SynthConfigBuilder {
        SynthConfigBuilder { config: self }
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of stacked harmonics (>= 1).
    pub fn harmonics(&self) -> u32 {
        self.harmonics
    }

    /// Harmonic series.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Fade / glide duration in seconds.
    pub fn transition(&self) -> f64 {
        self.transition
    }

    /// Peak amplitude after normalization.
    pub fn target_peak(&self) -> f64 {
        self.target_peak
    }

    /// Transition length in samples, before clamping to a block.
    pub fn transition_samples(&self) -> usize {
        round_samples(self.transition * f64::from(self.sample_rate))
    }
}

/// Builder for [`SynthConfig`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SynthConfigBuilder {
    config: SynthConfig,
}

impl SynthConfigBuilder {
    /// Set the output sample rate in Hz.
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Set the number of harmonics.
    pub fn harmonics(mut self, harmonics: u32) -> Self {
        self.config.harmonics = harmonics;
        self
    }

    /// Set the harmonic series.
    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.config.waveform = waveform;
        self
    }

    /// Set the transition duration in seconds.
    pub fn transition(mut self, seconds: f64) -> Self {
        self.config.transition = seconds;
        self
    }

    /// Set the transition duration in milliseconds.
    pub fn transition_ms(self, ms: f64) -> Self {
        self.transition(ms / 1000.0)
    }

    /// Set the normalized peak amplitude.
    pub fn target_peak(mut self, peak: f64) -> Self {
        self.config.target_peak = peak;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<SynthConfig> {
        let c = self.config;
        if c.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(c.sample_rate));
        }
        if c.harmonics == 0 {
            return Err(SynthError::InvalidHarmonics(c.harmonics));
        }
        if !c.transition.is_finite() || c.transition < 0.0 {
            return Err(SynthError::InvalidTransition(c.transition));
        }
        if !(c.target_peak > 0.0 && c.target_peak <= 1.0) {
            return Err(SynthError::InvalidTargetPeak(c.target_peak));
        }
        Ok(c)
    }
}

/// Round a non-negative sample count half-to-even.
///
/// Gaps are rounded to even on exact halves so that alternating hops do not
/// drift consistently in one direction.
#[inline]
pub(crate) fn round_samples(x: f64) -> usize {
    let r = x.round_ties_even();
    if r <= 0.0 { 0 } else { r as usize }
}
