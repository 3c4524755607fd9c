//! Per-harmonic phase accumulators.

use core::f64::consts::TAU;

/// Running phase of every harmonic, carried from block to block.
///
/// One accumulator per harmonic, in radians. The synthesizer threads a single
/// `PhaseState` through every block in contour order; it is never reset
/// mid-run, which is what keeps block boundaries click-free.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseState {
    phases: Vec<f64>,
}

impl PhaseState {
    /// All accumulators start at zero.
    pub fn new(harmonics: usize) -> Self {
        Self {
            phases: vec![0.0; harmonics],
        }
    }

    /// Number of harmonics tracked.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether no harmonics are tracked.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Accumulated phase of harmonic `h`, in radians.
    pub fn get(&self, h: usize) -> f64 {
        self.phases[h]
    }

    /// All accumulators.
    pub fn as_slice(&self) -> &[f64] {
        &self.phases
    }

    /// Store the phase reached at the end of a block.
    ///
    /// The value is wrapped into `[0, 2π)`; sin is periodic so the rendered
    /// output is unchanged, while long contours keep full f64 precision.
    pub(crate) fn set(&mut self, h: usize, phase: f64) {
        self.phases[h] = phase.rem_euclid(TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let state = PhaseState::new(3);
        assert_eq!(state.len(), 3);
        assert_eq!(state.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn set_wraps_into_one_turn() {
        let mut state = PhaseState::new(1);
        state.set(0, 5.0 * TAU + 1.0);
        assert!((state.get(0) - 1.0).abs() < 1e-9);
    }
}
