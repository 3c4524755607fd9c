//! Linear ramps used for frequency glides and amplitude fades.
//!
//! All ramps start at the first sample of a block and span `len` samples,
//! where `len` is the transition length already clamped to the block.

/// Interpolation factor `min(i / len, 1)`.
///
/// A zero-length transition is instantaneous: the factor is 1 everywhere.
#[inline]
pub fn ramp(i: usize, len: usize) -> f64 {
    if len == 0 {
        1.0
    } else {
        (i as f64 / len as f64).min(1.0)
    }
}

/// Fade-in gain at sample `i`, rising from 0 to 1 over `len` samples.
#[inline]
pub fn fade_in(i: usize, len: usize) -> f64 {
    ramp(i, len)
}

/// Fade-out gain at sample `i`, falling from 1 to 0 over `len` samples.
#[inline]
pub fn fade_out(i: usize, len: usize) -> f64 {
    (1.0 - ramp(i, len)).max(0.0)
}

/// Frequency at sample `i` of a glide from `from` to `to`.
#[inline]
pub fn glide(from: f64, to: f64, i: usize, len: usize) -> f64 {
    from + ramp(i, len) * (to - from)
}
