//! Error types for contour validation and synthesis configuration.

use thiserror::Error;

/// Errors raised at the contour and configuration boundaries, and by
/// rendering when a contour is too long to fit in a buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// The contour has no points.
    #[error("contour is empty")]
    EmptyContour,

    /// Paired time/frequency arrays differ in length.
    #[error("length mismatch: {times} timestamps but {frequencies} frequencies")]
    LengthMismatch {
        /// Number of timestamps supplied.
        times: usize,
        /// Number of frequencies supplied.
        frequencies: usize,
    },

    /// The confidence column differs in length from the frames.
    #[error("length mismatch: {frames} frames but {confidences} confidences")]
    ConfidenceMismatch {
        /// Number of frames supplied.
        frames: usize,
        /// Number of confidences supplied.
        confidences: usize,
    },

    /// A timestamp is NaN or infinite.
    #[error("timestamp at index {index} is not finite: {value}")]
    NonFiniteTime {
        /// Position of the offending point.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// A timestamp is earlier than the one before it.
    #[error("timestamps must be non-decreasing: index {index} has {current} after {previous}")]
    NonMonotonicTime {
        /// Position of the offending point.
        index: usize,
        /// Timestamp of the preceding point.
        previous: f64,
        /// Timestamp of the offending point.
        current: f64,
    },

    /// A frequency is negative, NaN or infinite.
    #[error("invalid frequency at index {index}: {value} Hz")]
    InvalidFrequency {
        /// Position of the offending point.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Sample rate must be positive.
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    /// Harmonic count must be at least one.
    #[error("harmonic count must be at least 1, got {0}")]
    InvalidHarmonics(u32),

    /// Transition duration must be finite and non-negative.
    #[error("transition duration must be finite and >= 0 seconds, got {0}")]
    InvalidTransition(f64),

    /// Target peak must lie in (0, 1].
    #[error("target peak must be in (0, 1], got {0}")]
    InvalidTargetPeak(f64),

    /// Voicing gate bounds are inconsistent.
    #[error("invalid voicing gate: {0}")]
    InvalidGate(String),

    /// The contour would render more than [`MAX_RENDER_SAMPLES`](crate::MAX_RENDER_SAMPLES).
    #[error("contour reaches {time}s, beyond the {max}-sample render limit")]
    ContourTooLong {
        /// Timestamp at which the limit is exceeded.
        time: f64,
        /// The sample limit.
        max: usize,
    },

    /// A phase state was built for a different harmonic count.
    #[error("phase state has {actual} harmonics, synthesizer renders {expected}")]
    PhaseStateMismatch {
        /// Harmonic count of the synthesizer.
        expected: usize,
        /// Harmonic count of the phase state.
        actual: usize,
    },

    /// An output block does not match its segment length.
    #[error("output block holds {actual} samples, segment needs {expected}")]
    BlockLengthMismatch {
        /// Segment length in samples.
        expected: usize,
        /// Length of the supplied block.
        actual: usize,
    },
}

/// Convenience result type for melosynth-core.
pub type Result<T> = std::result::Result<T, SynthError>;
