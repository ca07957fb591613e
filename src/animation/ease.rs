/// Quadratic ease-in-out of `t`, clamped to `[0, 1]`. NaN maps to 0.
pub fn in_out_quad(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
    }
}

/// Burst pulse envelope: eases in over the first half, out over the second. 0 at both ends and
/// 1 at `t = 0.5`.
pub fn pulse_envelope(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t <= 0.5 {
        in_out_quad(t * 2.0)
    } else {
        in_out_quad((1.0 - t) * 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
