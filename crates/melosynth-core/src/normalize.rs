//! Peak normalization of a finished sample buffer.

/// Outcome of [`normalize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Normalization {
    /// The buffer was all zero and left untouched.
    Silent,
    /// The buffer was scaled by `gain` so that `peak` maps to the target.
    Scaled {
        /// Peak absolute value before scaling.
        peak: f32,
        /// Gain applied to every sample.
        gain: f32,
    },
}

impl Normalization {
    /// Gain that was applied, `1.0` for a silent buffer.
    pub fn gain(&self) -> f32 {
        match *self {
            Self::Silent => 1.0,
            Self::Scaled { gain, .. } => gain,
        }
    }
}

/// Largest absolute sample value.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
}

/// Scale `samples` in place so that the peak absolute value equals `target`.
///
/// An all-zero (or empty) buffer has no defined scale factor; it is left as
/// is and [`Normalization::Silent`] is returned.
///
/// # Example
///
/// ```rust
/// use melosynth_core::{normalize, Normalization};
///
/// let mut buf = vec![0.5, -2.0, 1.0];
/// let result = normalize(&mut buf, 0.8);
/// assert_eq!(result, Normalization::Scaled { peak: 2.0, gain: 0.4 });
/// assert_eq!(buf, vec![0.2, -0.8, 0.4]);
/// ```
pub fn normalize(samples: &mut [f32], target: f32) -> Normalization {
    let peak = peak(samples);
    if peak == 0.0 {
        return Normalization::Silent;
    }

    let gain = target / peak;
    for s in samples.iter_mut() {
        *s *= gain;
    }
    Normalization::Scaled { peak, gain }
}
