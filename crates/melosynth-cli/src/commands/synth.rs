//! Contour-to-WAV synthesis command.

use clap::{Args, ValueEnum};
use melosynth_config::{GateConfig, SynthPreset, resolve_preset};
use melosynth_core::{AdditiveSynth, NegativePolicy, Normalization, Waveform};
use melosynth_io::{PcmSpec, read_contour_csv, write_wav};
use std::path::PathBuf;

/// Waveform types for CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliWaveform {
    /// All harmonics (sawtooth-like)
    Saw,
    /// Odd harmonics (square-like)
    Square,
}

impl From<CliWaveform> for Waveform {
    fn from(w: CliWaveform) -> Self {
        match w {
            CliWaveform::Saw => Waveform::Sawtooth,
            CliWaveform::Square => Waveform::Square,
        }
    }
}

#[derive(Args)]
pub struct SynthArgs {
    /// Input contour CSV (time,frequency[,confidence])
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML path
    #[arg(short, long)]
    preset: Option<String>,

    /// Output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Number of harmonics
    #[arg(long)]
    harmonics: Option<u32>,

    /// Harmonic series
    #[arg(long, value_enum)]
    waveform: Option<CliWaveform>,

    /// Fade / glide duration in milliseconds
    #[arg(long)]
    transition_ms: Option<f64>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long)]
    bit_depth: Option<u16>,

    /// Treat frames below this frequency as unvoiced
    #[arg(long)]
    min_hz: Option<f64>,

    /// Treat frames above this frequency as unvoiced
    #[arg(long)]
    max_hz: Option<f64>,

    /// Treat frames below this tracker confidence as unvoiced
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Synthesize negative frequencies as |f| instead of silence
    #[arg(long)]
    use_negative: bool,
}

impl SynthArgs {
    /// Layer command-line overrides on top of a preset.
    fn apply_to(&self, preset: &mut SynthPreset) {
        if let Some(sr) = self.sample_rate {
            preset.sample_rate = sr;
        }
        if let Some(h) = self.harmonics {
            preset.harmonics = h;
        }
        if let Some(w) = self.waveform {
            preset.waveform = Waveform::from(w).name().to_string();
        }
        if let Some(ms) = self.transition_ms {
            preset.transition_ms = ms;
        }
        if let Some(bits) = self.bit_depth {
            preset.bit_depth = bits;
        }
        if self.use_negative {
            preset.negative_policy = "absolute".to_string();
        }
        if self.min_hz.is_some() || self.max_hz.is_some() || self.min_confidence.is_some() {
            let base = preset.gate.unwrap_or_default();
            preset.gate = Some(GateConfig {
                min_hz: self.min_hz.or(base.min_hz),
                max_hz: self.max_hz.or(base.max_hz),
                min_confidence: self.min_confidence.or(base.min_confidence),
            });
        }
    }
}

pub fn run(args: SynthArgs) -> anyhow::Result<()> {
    let mut preset = match &args.preset {
        Some(name) => resolve_preset(name)?,
        None => SynthPreset::default(),
    };
    args.apply_to(&mut preset);
    preset.validate()?;

    let config = preset.to_config()?;
    let policy = preset.negative_policy()?;
    let gate = preset.voicing_gate()?;
    tracing::info!(
        preset = %preset.name,
        sample_rate = config.sample_rate(),
        harmonics = config.harmonics(),
        waveform = config.waveform().name(),
        "synthesis config"
    );

    println!("Reading {}...", args.input.display());
    let contour = read_contour_csv(&args.input)?.into_contour(policy, &gate)?;
    println!(
        "  {} points, {} voiced, {:.2}s",
        contour.len(),
        contour.voiced_count(),
        contour.end_time()
    );
    if policy == NegativePolicy::Absolute {
        tracing::debug!("negative frequencies synthesized as |f|");
    }

    let synthesis = AdditiveSynth::new(config).synthesize(&contour)?;
    if synthesis.normalization == Normalization::Silent {
        tracing::warn!("contour has no voiced content, writing silence");
    }

    let spec = PcmSpec::new(synthesis.sample_rate).with_bits(preset.bit_depth);
    write_wav(&args.output, &synthesis.samples, spec)?;

    println!(
        "Wrote {} ({} samples, {} Hz, {}-bit, {:.2}s)",
        args.output.display(),
        synthesis.samples.len(),
        synthesis.sample_rate,
        spec.bits_per_sample,
        synthesis.duration_secs()
    );
    Ok(())
}
