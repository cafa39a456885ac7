/// Quadratic ease-in-out on `t ∈ [0, 1]`.
///
/// `2t²` for the first half, `-1 + (4 - 2t)t` for the second half.
#[inline]
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Maps a monotonic progress `p ∈ [0, 1]` to a symmetric `0 → 1 → 0` pulse.
///
/// The rising and falling halves both use [`ease_in_out_quad`], so the peak is
/// reached at `p = 0.5` and the curve returns to exactly zero at `p = 1`.
#[inline]
#[must_use]
pub fn pulse(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    ease_in_out_quad(1.0 - (2.0 * p - 1.0).abs())
}
