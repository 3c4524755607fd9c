//! Raw pitch-tracker output and its mapping onto a [`Contour`].
//!
//! Pitch trackers disagree on how they mark unvoiced frames: some emit zero,
//! Melodia emits the negated pitch estimate, CREPE reports a confidence per
//! frame. [`RawContour::into_contour`] normalizes all of these to
//! [`Frequency::Unvoiced`] before anything reaches the synthesizer.

use crate::contour::{Contour, ContourPoint, Frequency};
use crate::error::{Result, SynthError};

/// Sentinel values Melodia writes when it has no pitch estimate at all.
pub const MELODIA_NO_ESTIMATE: [f64; 4] = [-55.0, -110.0, -220.0, -440.0];

/// How negative raw frequencies are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NegativePolicy {
    /// Negative frequencies are unvoiced frames.
    #[default]
    Silence,
    /// Negative frequencies are unvoiced frames that still carry a pitch
    /// estimate; synthesize `|f|`. Melodia's no-estimate sentinels stay silent.
    Absolute,
}

impl NegativePolicy {
    fn map(self, hz: f64) -> f64 {
        if hz >= 0.0 {
            return hz;
        }
        match self {
            Self::Silence => 0.0,
            Self::Absolute if MELODIA_NO_ESTIMATE.contains(&hz) => 0.0,
            Self::Absolute => hz.abs(),
        }
    }
}

/// Frame gating applied before synthesis.
///
/// Frames outside `[min_hz, max_hz]` or below `min_confidence` are unvoiced.
/// The confidence test only applies when the raw contour carries confidences.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoicingGate {
    /// Lowest frequency kept as voiced, in Hz.
    pub min_hz: f64,
    /// Highest frequency kept as voiced, in Hz.
    pub max_hz: f64,
    /// Minimum tracker confidence in `[0, 1]`.
    pub min_confidence: f64,
}

impl Default for VoicingGate {
    /// A gate that passes every positive frequency.
    fn default() -> Self {
        Self {
            min_hz: 0.0,
            max_hz: f64::INFINITY,
            min_confidence: 0.0,
        }
    }
}

impl VoicingGate {
    /// Gate used for CREPE output: 120-720 Hz, confidence >= 0.5.
    pub fn crepe() -> Self {
        Self {
            min_hz: 120.0,
            max_hz: 720.0,
            min_confidence: 0.5,
        }
    }

    /// Check that the bounds make sense.
    pub fn validate(&self) -> Result<()> {
        if self.min_hz.is_nan() || self.min_hz < 0.0 {
            return Err(SynthError::InvalidGate(format!(
                "min_hz must be >= 0, got {}",
                self.min_hz
            )));
        }
        if self.max_hz.is_nan() || self.max_hz < self.min_hz {
            return Err(SynthError::InvalidGate(format!(
                "max_hz ({}) must be >= min_hz ({})",
                self.max_hz, self.min_hz
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(SynthError::InvalidGate(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }

    fn passes(&self, hz: f64, confidence: Option<f64>) -> bool {
        let in_range = hz >= self.min_hz && hz <= self.max_hz;
        let confident = confidence.is_none_or(|c| c >= self.min_confidence);
        in_range && confident
    }
}

/// Unvalidated tracker output: parallel arrays as a pitch tracker emits them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawContour {
    /// Frame timestamps in seconds.
    pub times: Vec<f64>,
    /// Frame frequencies in Hz, possibly signed.
    pub frequencies: Vec<f64>,
    /// Optional per-frame confidence in `[0, 1]`.
    pub confidences: Option<Vec<f64>>,
}

impl RawContour {
    /// Create a raw contour without confidences.
    pub fn new(times: Vec<f64>, frequencies: Vec<f64>) -> Self {
        Self {
            times,
            frequencies,
            confidences: None,
        }
    }

    /// Attach per-frame confidences.
    pub fn with_confidences(mut self, confidences: Vec<f64>) -> Self {
        self.confidences = Some(confidences);
        self
    }

    /// Map signed/gated frames to tagged frequencies and validate.
    pub fn into_contour(self, policy: NegativePolicy, gate: &VoicingGate) -> Result<Contour> {
        gate.validate()?;

        if self.times.len() != self.frequencies.len() {
            return Err(SynthError::LengthMismatch {
                times: self.times.len(),
                frequencies: self.frequencies.len(),
            });
        }
        if let Some(conf) = &self.confidences
            && conf.len() != self.times.len()
        {
            return Err(SynthError::ConfidenceMismatch {
                frames: self.times.len(),
                confidences: conf.len(),
            });
        }

        let mut points = Vec::with_capacity(self.times.len());
        for (index, (&time, &raw_hz)) in self.times.iter().zip(&self.frequencies).enumerate() {
            if !raw_hz.is_finite() {
                return Err(SynthError::InvalidFrequency {
                    index,
                    value: raw_hz,
                });
            }
            let hz = policy.map(raw_hz);
            let confidence = self.confidences.as_ref().map(|c| c[index]);

            let frequency = if hz > 0.0 && gate.passes(hz, confidence) {
                Frequency::Voiced(hz)
            } else {
                Frequency::Unvoiced
            };
            points.push(ContourPoint { time, frequency });
        }

        Contour::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freqs(contour: &Contour) -> Vec<f64> {
        contour.points().iter().map(|p| p.frequency.hz()).collect()
    }

    #[test]
    fn negatives_silenced_by_default() {
        let raw = RawContour::new(vec![0.0, 0.1, 0.2], vec![200.0, -210.0, 0.0]);
        let contour = raw
            .into_contour(NegativePolicy::Silence, &VoicingGate::default())
            .unwrap();
        assert_eq!(freqs(&contour), vec![200.0, 0.0, 0.0]);
    }

    #[test]
    fn absolute_policy_keeps_estimates_but_not_sentinels() {
        let raw = RawContour::new(
            vec![0.0, 0.1, 0.2, 0.3],
            vec![-210.0, -220.0, -55.0, 300.0],
        );
        let contour = raw
            .into_contour(NegativePolicy::Absolute, &VoicingGate::default())
            .unwrap();
        assert_eq!(freqs(&contour), vec![210.0, 0.0, 0.0, 300.0]);
    }

    #[test]
    fn crepe_gate_drops_out_of_range_and_unconfident_frames() {
        let raw = RawContour::new(
            vec![0.0, 0.04, 0.08, 0.12],
            vec![100.0, 440.0, 800.0, 440.0],
        )
        .with_confidences(vec![0.9, 0.9, 0.9, 0.3]);
        let contour = raw
            .into_contour(NegativePolicy::Silence, &VoicingGate::crepe())
            .unwrap();
        assert_eq!(freqs(&contour), vec![0.0, 440.0, 0.0, 0.0]);
    }

    #[test]
    fn confidence_length_mismatch_is_rejected() {
        let raw = RawContour::new(vec![0.0, 0.1], vec![1.0, 2.0]).with_confidences(vec![1.0]);
        let err = raw
            .into_contour(NegativePolicy::Silence, &VoicingGate::default())
            .unwrap_err();
        assert_eq!(
            err,
            SynthError::ConfidenceMismatch {
                frames: 2,
                confidences: 1
            }
        );
    }

    #[test]
    fn nan_frequency_is_rejected() {
        let raw = RawContour::new(vec![0.0], vec![f64::NAN]);
        let err = raw
            .into_contour(NegativePolicy::Silence, &VoicingGate::default())
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidFrequency { index: 0, .. }));
    }

    #[test]
    fn inverted_gate_is_rejected() {
        let gate = VoicingGate {
            min_hz: 500.0,
            max_hz: 100.0,
            min_confidence: 0.0,
        };
        assert!(matches!(gate.validate(), Err(SynthError::InvalidGate(_))));
    }
}
