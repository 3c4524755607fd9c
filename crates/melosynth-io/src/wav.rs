//! Mono linear-PCM WAV encoding.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::io::{Seek, Write};
use std::path::Path;

/// PCM bit depths accepted by [`write_wav`].
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Output format for a synthesized buffer: one channel of signed linear PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for PcmSpec {
    fn default() -> Self {
        Self {
            sample_rate: melosynth_core::DEFAULT_SAMPLE_RATE,
            bits_per_sample: 16,
        }
    }
}

impl PcmSpec {
    /// 16-bit PCM at the given sample rate.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    /// Set the bit depth.
    pub fn with_bits(mut self, bits_per_sample: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self
    }

    /// Largest positive integer sample at this bit depth.
    fn full_scale(&self) -> f64 {
        ((1i64 << (self.bits_per_sample - 1)) - 1) as f64
    }

    fn validate(&self) -> Result<()> {
        if SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            Ok(())
        } else {
            Err(Error::UnsupportedBitDepth(self.bits_per_sample))
        }
    }
}

impl From<PcmSpec> for hound::WavSpec {
    fn from(spec: PcmSpec) -> Self {
        hound::WavSpec {
            channels: 1,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Whether samples are IEEE floats rather than integers.
    pub is_float: bool,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = reader.len() as u64 / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        is_float: spec.sample_format == SampleFormat::Float,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
    })
}

/// Read a WAV file as mono f32 in `[-1, 1]`.
///
/// Multi-channel files are mixed down by averaging channels. The returned
/// spec reports the file's sample rate and bit depth.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, PcmSpec)> {
    let reader = WavReader::open(path)?;
    let file_spec = reader.spec();
    let channels = file_spec.channels as usize;
    let spec = PcmSpec {
        sample_rate: file_spec.sample_rate,
        bits_per_sample: file_spec.bits_per_sample,
    };

    let samples: Vec<f32> = match file_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (file_spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| (f64::from(v) / max_val) as f32))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}

/// Encode `samples` as mono linear PCM into any seekable writer.
///
/// A sample of `x` is written as `round(x * (2^(bits-1) - 1))`, clamped to
/// the signed range, so `[-1, 1]` spans the full integer scale.
pub fn write_wav_to<W: Write + Seek>(writer: W, samples: &[f32], spec: PcmSpec) -> Result<()> {
    spec.validate()?;

    let mut writer = WavWriter::new(writer, hound::WavSpec::from(spec))?;
    let full_scale = spec.full_scale();
    for &sample in samples {
        let value = (f64::from(sample) * full_scale)
            .round()
            .clamp(-full_scale - 1.0, full_scale);
        writer.write_sample(value as i32)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write `samples` to a mono linear-PCM WAV file.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0f32; 16000]; // 1 second of silence
/// write_wav("output.wav", &samples, PcmSpec::new(16000))?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: PcmSpec) -> Result<()> {
    let path = path.as_ref();
    spec.validate()?;

    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_wav_to(file, samples, spec)?;

    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "wrote PCM WAV"
    );
    Ok(())
}
