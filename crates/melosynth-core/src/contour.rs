//! Pitch contour data model and preprocessing.
//!
//! A [`Contour`] is an ordered, validated sequence of `(time, frequency)`
//! points. Frequencies are tagged as [`Frequency::Voiced`] or
//! [`Frequency::Unvoiced`] instead of overloading zero or negative values.

use crate::error::{Result, SynthError};

/// Instantaneous fundamental frequency of a contour point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Frequency {
    /// No pitched content at this instant.
    #[default]
    Unvoiced,
    /// Pitched content at the given frequency in Hz (finite, > 0).
    Voiced(f64),
}

impl Frequency {
    /// Interpret a raw frequency in Hz.
    ///
    /// `0.0` maps to [`Frequency::Unvoiced`]. Negative and non-finite values
    /// return `None`; callers that use a signed encoding for unvoiced frames
    /// should go through [`RawContour`](crate::RawContour) instead.
    pub fn from_hz(hz: f64) -> Option<Self> {
        if !hz.is_finite() || hz < 0.0 {
            None
        } else if hz == 0.0 {
            Some(Self::Unvoiced)
        } else {
            Some(Self::Voiced(hz))
        }
    }

    /// Frequency in Hz, `0.0` when unvoiced.
    #[inline]
    pub fn hz(self) -> f64 {
        match self {
            Self::Unvoiced => 0.0,
            Self::Voiced(hz) => hz,
        }
    }

    /// Whether this point carries pitched content.
    #[inline]
    pub fn is_voiced(self) -> bool {
        matches!(self, Self::Voiced(_))
    }

    fn is_valid(self) -> bool {
        match self {
            Self::Unvoiced => true,
            Self::Voiced(hz) => hz.is_finite() && hz > 0.0,
        }
    }
}

/// A single `(time, frequency)` sample of a pitch contour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourPoint {
    /// Time in seconds.
    pub time: f64,
    /// Frequency at that instant.
    pub frequency: Frequency,
}

impl ContourPoint {
    /// Create a voiced point.
    pub fn voiced(time: f64, hz: f64) -> Self {
        Self {
            time,
            frequency: Frequency::Voiced(hz),
        }
    }

    /// Create an unvoiced point.
    pub fn unvoiced(time: f64) -> Self {
        Self {
            time,
            frequency: Frequency::Unvoiced,
        }
    }
}

/// Validated pitch contour.
///
/// Guaranteed non-empty, with finite, non-decreasing timestamps and valid
/// frequencies. Construction is the only place these checks happen; the
/// synthesizer relies on them.
///
/// # Example
///
/// ```rust
/// use melosynth_core::Contour;
///
/// let contour = Contour::from_pairs(&[0.0, 0.5, 1.0], &[0.0, 440.0, 0.0]).unwrap();
/// assert_eq!(contour.len(), 3);
/// assert_eq!(contour.median_hop(), Some(0.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    points: Vec<ContourPoint>,
}

impl Contour {
    /// Build a contour from points, validating ordering and values.
    pub fn new(points: Vec<ContourPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(SynthError::EmptyContour);
        }

        let mut previous: Option<f64> = None;
        for (index, point) in points.iter().enumerate() {
            if !point.time.is_finite() {
                return Err(SynthError::NonFiniteTime {
                    index,
                    value: point.time,
                });
            }
            if !point.frequency.is_valid() {
                return Err(SynthError::InvalidFrequency {
                    index,
                    value: point.frequency.hz(),
                });
            }
            if let Some(prev) = previous
                && point.time < prev
            {
                return Err(SynthError::NonMonotonicTime {
                    index,
                    previous: prev,
                    current: point.time,
                });
            }
            previous = Some(point.time);
        }

        Ok(Self { points })
    }

    /// Build a contour from paired timestamp and frequency arrays.
    ///
    /// A frequency of `0.0` is unvoiced; negative values are rejected.
    pub fn from_pairs(times: &[f64], frequencies: &[f64]) -> Result<Self> {
        if times.len() != frequencies.len() {
            return Err(SynthError::LengthMismatch {
                times: times.len(),
                frequencies: frequencies.len(),
            });
        }

        let points = times
            .iter()
            .zip(frequencies)
            .enumerate()
            .map(|(index, (&time, &hz))| {
                Frequency::from_hz(hz)
                    .map(|frequency| ContourPoint { time, frequency })
                    .ok_or(SynthError::InvalidFrequency { index, value: hz })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(points)
    }

    /// The validated points.
    pub fn points(&self) -> &[ContourPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a contour holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the contour.
    pub fn first(&self) -> ContourPoint {
        self.points[0]
    }

    /// Timestamp of the last point, i.e. the end of the synthesized audio.
    pub fn end_time(&self) -> f64 {
        self.points[self.points.len() - 1].time
    }

    /// Median spacing between consecutive timestamps.
    ///
    /// Returns `None` for a single-point contour. With an even number of gaps
    /// the two middle values are averaged.
    pub fn median_hop(&self) -> Option<f64> {
        let mut hops: Vec<f64> = self
            .points
            .windows(2)
            .map(|pair| pair[1].time - pair[0].time)
            .collect();
        if hops.is_empty() {
            return None;
        }

        hops.sort_by(f64::total_cmp);
        let mid = hops.len() / 2;
        if hops.len() % 2 == 0 {
            Some((hops[mid - 1] + hops[mid]) / 2.0)
        } else {
            Some(hops[mid])
        }
    }

    /// Return a copy that starts from an unvoiced anchor.
    ///
    /// If the first timestamp is greater than zero, an unvoiced point is
    /// inserted at `max(first_time - median_hop, 0)`. A single-point contour
    /// has no hop and gets its anchor at `0.0`. Contours already starting at
    /// time zero are returned unchanged.
    pub fn with_leading_silence(&self) -> Self {
        let first = self.first();
        if first.time <= 0.0 {
            return self.clone();
        }

        let hop = self.median_hop().unwrap_or(first.time);
        let anchor = (first.time - hop).max(0.0);

        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.push(ContourPoint::unvoiced(anchor));
        points.extend_from_slice(&self.points);
        Self { points }
    }

    /// Number of voiced points.
    pub fn voiced_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.frequency.is_voiced())
            .count()
    }

    /// Lowest and highest voiced frequency, if any point is voiced.
    pub fn frequency_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter(|p| p.frequency.is_voiced())
            .map(|p| p.frequency.hz())
            .fold(None, |acc, hz| match acc {
                None => Some((hz, hz)),
                Some((lo, hi)) => Some((lo.min(hz), hi.max(hz))),
            })
    }
}
