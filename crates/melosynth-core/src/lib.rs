//! Melosynth Core - additive synthesis of pitch contours
//!
//! Turns a sparse, irregularly timed pitch contour (a sequence of
//! `(time, frequency)` pairs, possibly unvoiced) into a continuous mono
//! waveform ready for PCM encoding.
//!
//! # Pipeline
//!
//! 1. **Contour** - [`Contour`] validates ordering and tags each frequency as
//!    [`Frequency::Voiced`] or [`Frequency::Unvoiced`]. Raw tracker output with
//!    signed or gated frames goes through [`RawContour`] first.
//! 2. **Preprocessing** - [`Contour::with_leading_silence`] adds an unvoiced
//!    anchor so synthesis always starts from silence.
//! 3. **Synthesis** - [`AdditiveSynth`] renders one block per contour gap,
//!    summing harmonics with phase carried in a [`PhaseState`], gliding
//!    between voiced points and fading at voiced/unvoiced boundaries.
//! 4. **Normalization** - [`normalize`] scales the buffer to a fixed peak
//!    (0.8 of full scale by default).
//!
//! ```rust
//! use melosynth_core::{Contour, SynthConfig, synthesize};
//!
//! let contour = Contour::from_pairs(&[0.0, 0.5, 1.0], &[0.0, 440.0, 0.0]).unwrap();
//! let out = synthesize(&contour, SynthConfig::default())?;
//!
//! assert_eq!(out.sample_rate, 16000);
//! assert_eq!(out.samples.len(), 16000);
//! # Ok::<(), melosynth_core::SynthError>(())
//! ```
//!
//! # Features
//!
//! - `tracing`: emit `debug` events for segment planning and normalization.

pub mod config;
pub mod contour;
mod error;
pub mod normalize;
pub mod phase;
pub mod raw;
pub mod synth;
pub mod transition;

pub use config::{
    DEFAULT_SAMPLE_RATE, DEFAULT_TARGET_PEAK, DEFAULT_TRANSITION, SynthConfig, SynthConfigBuilder,
    Waveform,
};
pub use contour::{Contour, ContourPoint, Frequency};
pub use error::{Result, SynthError};
pub use normalize::{Normalization, normalize, peak};
pub use phase::PhaseState;
pub use raw::{MELODIA_NO_ESTIMATE, NegativePolicy, RawContour, VoicingGate};
pub use synth::{
    AdditiveSynth, MAX_RENDER_SAMPLES, Segment, SegmentKind, Synthesis, synthesize,
};
