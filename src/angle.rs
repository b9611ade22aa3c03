//! Degree utilities shared by the grid generator and the orderer.

/// Full turn in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;
/// Straight-up pitch in degrees.
pub const ZENITH_DEG: f64 = 90.0;
/// Straight-down pitch in degrees.
pub const NADIR_DEG: f64 = -90.0;

/// Wraps a heading into [0, 360).
///
/// Tiny negative inputs make `rem_euclid` round up to exactly 360; those fold
/// back to 0 so the result always stays inside the half-open range.
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    let norm = angle.rem_euclid(FULL_TURN_DEG);
    if norm >= FULL_TURN_DEG {
        0.0
    } else {
        norm
    }
}

/// Clamps a pitch into [-90, 90].
#[inline]
pub fn clamp_pitch(angle: f64) -> f64 {
    angle.clamp(NADIR_DEG, ZENITH_DEG)
}

/// Half-open arithmetic progression `start, start + step, ...` below `stop`.
///
/// The length is `ceil((stop - start) / step)` and each value is computed as
/// `start + i * step` rather than by repeated addition, so long progressions
/// do not accumulate drift. Returns an empty vector when `stop <= start` or
/// when `step` is not strictly positive.
pub fn progression(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let span = (stop - start) / step;
    if !(span > 0.0) {
        return Vec::new();
    }
    let len = span.ceil() as usize;
    (0..len).map(|i| start + i as f64 * step).collect()
}

/// Step between neighbouring tile centres for a field of view and overlap
/// percentage.
#[inline]
pub fn tile_step(fov_deg: f64, overlap_pct: f64) -> f64 {
    fov_deg * (1.0 - overlap_pct / 100.0)
}
