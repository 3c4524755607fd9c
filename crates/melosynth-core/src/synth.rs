//! Additive melody synthesizer.
//!
//! Renders a [`Contour`] into a mono sample buffer by summing harmonically
//! related sinusoids. Every gap between consecutive contour points becomes one
//! [`Segment`]; segments are planned up front so the output buffer is allocated
//! once at its final size and each block is written in place.

use core::f64::consts::TAU;
use core::ops::Range;

use crate::config::{SynthConfig, round_samples};
use crate::contour::{Contour, Frequency};
use crate::error::{Result, SynthError};
use crate::normalize::{Normalization, normalize};
use crate::phase::PhaseState;
use crate::transition::{fade_in, fade_out, glide};

/// Voicing transition covered by a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Unvoiced to unvoiced: the block is silent.
    Silent,
    /// Unvoiced to voiced: constant target pitch with a fade-in.
    Onset,
    /// Voiced to voiced: pitch glides to the target, no amplitude shaping.
    Glide,
    /// Voiced to unvoiced: previous pitch held while fading out.
    Release,
}

impl SegmentKind {
    /// Classify a transition between two frequencies.
    pub fn classify(from: Frequency, to: Frequency) -> Self {
        match (from.is_voiced(), to.is_voiced()) {
            (false, false) => Self::Silent,
            (false, true) => Self::Onset,
            (true, true) => Self::Glide,
            (true, false) => Self::Release,
        }
    }
}

/// One block of output between two consecutive contour points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Index of the first output sample.
    pub start: usize,
    /// Number of samples (always > 0).
    pub len: usize,
    /// Frequency at the start of the gap.
    pub from: Frequency,
    /// Frequency at the end of the gap.
    pub to: Frequency,
    /// Fade / glide length in samples, clamped to `len`.
    pub transition: usize,
}

impl Segment {
    /// Voicing transition of this segment.
    pub fn kind(&self) -> SegmentKind {
        SegmentKind::classify(self.from, self.to)
    }

    /// Output sample range covered by this segment.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Instantaneous fundamental at sample `i` of the block.
    #[inline]
    fn frequency_at(&self, i: usize) -> f64 {
        match self.kind() {
            SegmentKind::Glide => glide(self.from.hz(), self.to.hz(), i, self.transition),
            SegmentKind::Onset => self.to.hz(),
            SegmentKind::Release | SegmentKind::Silent => self.from.hz(),
        }
    }
}

/// A finished, normalized rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct Synthesis {
    /// Mono samples, peak at the configured target (or all zero).
    pub samples: Vec<f32>,
    /// Sample rate of `samples` in Hz.
    pub sample_rate: u32,
    /// How the raw buffer was scaled.
    pub normalization: Normalization,
}

impl Synthesis {
    /// Length of the rendering in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Largest buffer, in samples, that a single rendering may produce.
///
/// About 37 hours at 16 kHz, and the most a 16-bit mono WAV can hold.
pub const MAX_RENDER_SAMPLES: usize = i32::MAX as usize;

/// Additive synthesizer for pitch contours.
///
/// # Example
///
/// ```rust
/// use melosynth_core::{AdditiveSynth, Contour, SynthConfig};
///
/// let contour = Contour::from_pairs(&[0.0, 0.5, 1.0], &[0.0, 440.0, 0.0]).unwrap();
/// let config = SynthConfig::builder().sample_rate(8000).build().unwrap();
/// let out = AdditiveSynth::new(config).synthesize(&contour).unwrap();
///
/// assert_eq!(out.samples.len(), 8000);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AdditiveSynth {
    config: SynthConfig,
}

impl AdditiveSynth {
    /// Create a synthesizer for the given configuration.
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Fresh phase accumulators sized for this synthesizer.
    pub fn phase_state(&self) -> PhaseState {
        PhaseState::new(self.config.harmonics() as usize)
    }

    /// Split a contour into output segments.
    ///
    /// The contour is first given a leading unvoiced anchor (see
    /// [`Contour::with_leading_silence`]). Walking starts from an implicit
    /// unvoiced point at time zero; gaps that round to zero samples emit
    /// nothing but still advance the previous point.
    ///
    /// Fails with [`SynthError::ContourTooLong`] when the segments would add
    /// up to more than [`MAX_RENDER_SAMPLES`].
    pub fn plan(&self, contour: &Contour) -> Result<Vec<Segment>> {
        let contour = contour.with_leading_silence();
        let sample_rate = f64::from(self.config.sample_rate());
        let transition = self.config.transition_samples();

        let mut segments = Vec::with_capacity(contour.len());
        let mut t_prev = 0.0;
        let mut f_prev = Frequency::Unvoiced;
        let mut start: usize = 0;

        for point in contour.points() {
            let len = round_samples((point.time - t_prev) * sample_rate);
            if len > 0 {
                let end = start
                    .checked_add(len)
                    .filter(|&end| end <= MAX_RENDER_SAMPLES)
                    .ok_or(SynthError::ContourTooLong {
                        time: point.time,
                        max: MAX_RENDER_SAMPLES,
                    })?;
                segments.push(Segment {
                    start,
                    len,
                    from: f_prev,
                    to: point.frequency,
                    transition: transition.min(len),
                });
                start = end;
            }
            t_prev = point.time;
            f_prev = point.frequency;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            segments = segments.len(),
            samples = start,
            "planned contour of {} points",
            contour.len()
        );

        Ok(segments)
    }

    /// Render one segment into `out`, advancing `phase`.
    ///
    /// `out` must be exactly `segment.len` samples long and `phase` must come
    /// from [`AdditiveSynth::phase_state`] (or hold one accumulator per
    /// configured harmonic). Segments must be rendered in contour order with
    /// the same `phase`; the accumulators carry each harmonic's phase across
    /// the block boundary.
    pub fn render_segment(
        &self,
        segment: &Segment,
        phase: &mut PhaseState,
        out: &mut [f32],
    ) -> Result<()> {
        let harmonics = self.config.harmonics() as usize;
        if phase.len() != harmonics {
            return Err(SynthError::PhaseStateMismatch {
                expected: harmonics,
                actual: phase.len(),
            });
        }
        if out.len() != segment.len {
            return Err(SynthError::BlockLengthMismatch {
                expected: segment.len,
                actual: out.len(),
            });
        }
        out.fill(0.0);

        let kind = segment.kind();
        if kind == SegmentKind::Silent {
            // Zero frequency: accumulators do not move.
            return Ok(());
        }

        let sample_rate = f64::from(self.config.sample_rate());
        let waveform = self.config.waveform();

        for h in 0..harmonics {
            let number = f64::from(waveform.harmonic_number(h as u32));
            let step = TAU * number / sample_rate;
            let mut acc = phase.get(h);
            for (i, sample) in out.iter_mut().enumerate() {
                acc += step * segment.frequency_at(i);
                *sample += (acc.sin() / number) as f32;
            }
            phase.set(h, acc);
        }

        match kind {
            SegmentKind::Onset => {
                for (i, sample) in out.iter_mut().enumerate() {
                    *sample *= fade_in(i, segment.transition) as f32;
                }
            }
            SegmentKind::Release => {
                for (i, sample) in out.iter_mut().enumerate() {
                    *sample *= fade_out(i, segment.transition) as f32;
                }
            }
            SegmentKind::Glide | SegmentKind::Silent => {}
        }
        Ok(())
    }

    /// Render the contour without normalization.
    pub fn render(&self, contour: &Contour) -> Result<Vec<f32>> {
        let segments = self.plan(contour)?;
        let total = segments.last().map_or(0, |s| s.start + s.len);

        let mut buffer = vec![0.0f32; total];
        let mut phase = self.phase_state();
        for segment in &segments {
            self.render_segment(segment, &mut phase, &mut buffer[segment.range()])?;
        }
        Ok(buffer)
    }

    /// Render and normalize the contour to the configured peak.
    pub fn synthesize(&self, contour: &Contour) -> Result<Synthesis> {
        let mut samples = self.render(contour)?;
        let normalization = normalize(&mut samples, self.config.target_peak() as f32);

        #[cfg(feature = "tracing")]
        match normalization {
            Normalization::Silent => tracing::debug!("contour rendered silent, skipping gain"),
            Normalization::Scaled { peak, gain } => {
                tracing::debug!(peak, gain, "normalized {} samples", samples.len());
            }
        }

        Ok(Synthesis {
            samples,
            sample_rate: self.config.sample_rate(),
            normalization,
        })
    }
}

/// Synthesize `contour` with `config` in one call.
pub fn synthesize(contour: &Contour, config: SynthConfig) -> Result<Synthesis> {
    AdditiveSynth::new(config).synthesize(contour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::ContourPoint;

    fn synth(sample_rate: u32) -> AdditiveSynth {
        AdditiveSynth::new(
            SynthConfig::builder()
                .sample_rate(sample_rate)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn classify_covers_all_transitions() {
        let v = Frequency::Voiced(100.0);
        let u = Frequency::Unvoiced;
        assert_eq!(SegmentKind::classify(u, u), SegmentKind::Silent);
        assert_eq!(SegmentKind::classify(u, v), SegmentKind::Onset);
        assert_eq!(SegmentKind::classify(v, v), SegmentKind::Glide);
        assert_eq!(SegmentKind::classify(v, u), SegmentKind::Release);
    }

    #[test]
    fn plan_skips_zero_length_gaps() {
        let contour =
            Contour::from_pairs(&[0.0, 0.5, 0.5, 1.0], &[0.0, 440.0, 220.0, 0.0]).unwrap();
        let segments = synth(1000).plan(&contour).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].kind(), SegmentKind::Onset);
        assert_eq!(segments[0].range(), 0..500);
        // The zero-length gap still moved the previous point to 220 Hz.
        assert_eq!(segments[1].from, Frequency::Voiced(220.0));
        assert_eq!(segments[1].range(), 500..1000);
    }

    #[test]
    fn plan_clamps_transition_to_short_blocks() {
        let contour = Contour::from_pairs(&[0.0, 0.004, 0.5], &[440.0, 440.0, 0.0]).unwrap();
        let segments = synth(1000).plan(&contour).unwrap();
        assert_eq!(segments[0].len, 4);
        assert_eq!(segments[0].transition, 4);
        assert_eq!(segments[1].transition, 10);
    }

    #[test]
    fn plan_starts_with_padded_silence() {
        let contour = Contour::from_pairs(&[2.0, 2.04], &[440.0, 440.0]).unwrap();
        let segments = synth(1000).plan(&contour).unwrap();

        assert_eq!(segments[0].kind(), SegmentKind::Silent);
        assert_eq!(segments[0].range(), 0..1960);
        assert_eq!(segments[1].kind(), SegmentKind::Onset);
        assert_eq!(segments[1].len, 40);
        assert_eq!(segments[2].kind(), SegmentKind::Glide);
    }

    #[test]
    fn silent_segment_does_not_touch_phase() {
        let s = synth(1000);
        let mut phase = PhaseState::new(1);
        let seg = Segment {
            start: 0,
            len: 16,
            from: Frequency::Unvoiced,
            to: Frequency::Unvoiced,
            transition: 10,
        };
        let mut out = vec![1.0f32; 16];
        s.render_segment(&seg, &mut phase, &mut out).unwrap();
        assert!(out.iter().all(|&x| x == 0.0));
        assert_eq!(phase.get(0), 0.0);
    }

    #[test]
    fn release_keeps_previous_pitch_for_phase() {
        let s = synth(1000);
        let mut phase = PhaseState::new(1);
        let seg = Segment {
            start: 0,
            len: 20,
            from: Frequency::Voiced(30.0),
            to: Frequency::Unvoiced,
            transition: 10,
        };
        let mut out = vec![0.0f32; 20];
        s.render_segment(&seg, &mut phase, &mut out).unwrap();

        let expected = 20.0 * TAU * 30.0 / 1000.0;
        assert!((phase.get(0) - expected).abs() < 1e-9);
        assert!(out[10..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn single_harmonic_is_a_plain_sine() {
        let contour = Contour::new(vec![
            ContourPoint::voiced(0.0, 100.0),
            ContourPoint::voiced(0.1, 100.0),
        ])
        .unwrap();
        let raw = synth(8000).render(&contour).unwrap();
        assert_eq!(raw.len(), 800);
        for (j, &x) in raw.iter().enumerate() {
            let expected = ((j + 1) as f64 * TAU * 100.0 / 8000.0).sin() as f32;
            assert!((x - expected).abs() < 1e-4, "sample {j}: {x} vs {expected}");
        }
    }

    #[test]
    fn square_uses_odd_harmonics() {
        let config = SynthConfig::builder()
            .sample_rate(8000)
            .harmonics(2)
            .waveform(crate::Waveform::Square)
            .build()
            .unwrap();
        let contour = Contour::from_pairs(&[0.0, 0.01], &[100.0, 100.0]).unwrap();
        let raw = AdditiveSynth::new(config).render(&contour).unwrap();
        let k = TAU * 100.0 / 8000.0;
        for (j, &x) in raw.iter().enumerate() {
            let p = (j + 1) as f64 * k;
            let expected = (p.sin() + (3.0 * p).sin() / 3.0) as f32;
            assert!((x - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn silent_contour_synthesizes_to_zeros() {
        let contour = Contour::from_pairs(&[0.0, 0.25, 0.5], &[0.0, 0.0, 0.0]).unwrap();
        let out = synth(1000).synthesize(&contour).unwrap();
        assert_eq!(out.samples.len(), 500);
        assert_eq!(out.normalization, Normalization::Silent);
        assert!(out.samples.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn plan_rejects_contour_past_render_limit() {
        let contour = Contour::from_pairs(&[0.0, 1e20, 2e20], &[0.0, 440.0, 0.0]).unwrap();
        let err = synth(1000).plan(&contour).unwrap_err();
        assert_eq!(
            err,
            SynthError::ContourTooLong {
                time: 1e20,
                max: MAX_RENDER_SAMPLES
            }
        );

        let short = Contour::from_pairs(&[0.0, 1e20], &[0.0, 440.0]).unwrap();
        assert!(matches!(
            synth(1000).render(&short),
            Err(SynthError::ContourTooLong { .. })
        ));
    }

    #[test]
    fn plan_rejects_sum_over_limit() {
        // Each gap fits on its own; together they exceed the limit.
        let half = (MAX_RENDER_SAMPLES / 2 + 1) as f64 / 1000.0;
        let contour =
            Contour::from_pairs(&[0.0, half, 2.0 * half], &[0.0, 0.0, 0.0]).unwrap();
        let err = synth(1000).plan(&contour).unwrap_err();
        assert!(matches!(err, SynthError::ContourTooLong { time, .. } if time == 2.0 * half));
    }

    #[test]
    fn phase_state_matches_harmonic_count() {
        let config = SynthConfig::builder().harmonics(3).build().unwrap();
        assert_eq!(AdditiveSynth::new(config).phase_state().len(), 3);
    }

    #[test]
    fn render_segment_rejects_mismatched_phase_state() {
        let config = SynthConfig::builder()
            .sample_rate(1000)
            .harmonics(3)
            .build()
            .unwrap();
        let s = AdditiveSynth::new(config);
        let seg = Segment {
            start: 0,
            len: 32,
            from: Frequency::Voiced(50.0),
            to: Frequency::Voiced(50.0),
            transition: 10,
        };
        let mut out = vec![0.0f32; 32];

        let mut narrow = PhaseState::new(1);
        assert_eq!(
            s.render_segment(&seg, &mut narrow, &mut out),
            Err(SynthError::PhaseStateMismatch {
                expected: 3,
                actual: 1
            })
        );
        assert_eq!(narrow.get(0), 0.0);

        let mut phase = s.phase_state();
        s.render_segment(&seg, &mut phase, &mut out).unwrap();
        let k = TAU * 50.0 / 1000.0;
        let p = 21.0 * k;
        let expected = (p.sin() + (2.0 * p).sin() / 2.0 + (3.0 * p).sin() / 3.0) as f32;
        assert!((out[20] - expected).abs() < 1e-5, "{} vs {expected}", out[20]);
    }

    #[test]
    fn render_segment_rejects_wrong_block_length() {
        let s = synth(1000);
        let seg = Segment {
            start: 0,
            len: 16,
            from: Frequency::Voiced(50.0),
            to: Frequency::Voiced(50.0),
            transition: 10,
        };
        let mut out = vec![0.0f32; 8];
        assert_eq!(
            s.render_segment(&seg, &mut s.phase_state(), &mut out),
            Err(SynthError::BlockLengthMismatch {
                expected: 16,
                actual: 8
            })
        );
    }
}
