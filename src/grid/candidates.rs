use crate::angle::{clamp_pitch, progression, wrap_degrees, FULL_TURN_DEG, NADIR_DEG, ZENITH_DEG};

/// Slack past the zenith for the vertical progression's exclusive stop.
pub const VERTICAL_STOP_PAD_DEG: f64 = 1.0;

/// Headings from `base_u` up to (excluding) 360, wrapped into [0, 360).
pub fn horizontal_candidates(base_u: f64, h_step: f64) -> Vec<f64> {
    progression(base_u, FULL_TURN_DEG, h_step)
        .into_iter()
        .map(wrap_degrees)
        .collect()
}

/// Pitches from half a field of view below `base_v` up to the zenith, clamped
/// into [-90, 90].
pub fn vertical_candidates(base_v: f64, v_fov: f64, v_step: f64) -> Vec<f64> {
    let start = (base_v - v_fov / 2.0).max(NADIR_DEG);
    progression(start, ZENITH_DEG + VERTICAL_STOP_PAD_DEG, v_step)
        .into_iter()
        .map(clamp_pitch)
        .collect()
}
