//! File I/O for melosynth.
//!
//! This crate provides:
//!
//! - **Contour CSV**: [`read_contour_csv`] / [`write_contour_csv`] for
//!   `time,frequency[,confidence]` rows as saved by pitch-tracking scripts
//! - **PCM WAV output**: [`write_wav`] encodes a normalized mono buffer as
//!   linear PCM, with [`read_wav`] and [`read_wav_info`] for inspection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use melosynth_core::{NegativePolicy, SynthConfig, VoicingGate, synthesize};
//! use melosynth_io::{PcmSpec, read_contour_csv, write_wav};
//!
//! let contour = read_contour_csv("melody.csv")?
//!     .into_contour(NegativePolicy::Silence, &VoicingGate::default())?;
//! let out = synthesize(&contour, SynthConfig::default())?;
//! write_wav("melody.wav", &out.samples, PcmSpec::new(out.sample_rate))?;
//! ```

mod csv;
mod wav;

pub use csv::{format_contour_csv, parse_contour_csv, read_contour_csv, write_contour_csv};
pub use wav::{
    PcmSpec, SUPPORTED_BIT_DEPTHS, WavInfo, read_wav, read_wav_info, write_wav, write_wav_to,
};

/// Error types for melosynth I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Malformed contour CSV row.
    #[error("contour CSV line {line}: {reason}")]
    Csv {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// The requested PCM bit depth is not supported.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// The contour failed validation.
    #[error("invalid contour: {0}")]
    Contour(#[from] melosynth_core::SynthError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
