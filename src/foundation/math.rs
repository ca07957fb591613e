use rand::Rng;

use crate::foundation::core::{Point, Span, Vec2};

/// Draw a count from an inclusive span. Malformed spans (`min > max`) yield 0.
pub fn sample_count<R: Rng + ?Sized>(rng: &mut R, span: Span<u32>) -> u32 {
    if span.min > span.max {
        return 0;
    }
    rng.gen_range(span.min..=span.max)
}

/// Uniform draw from `[min, max]`. Degenerate or malformed spans return `min`.
pub fn sample_f64<R: Rng + ?Sized>(rng: &mut R, span: Span<f64>) -> f64 {
    if span.min >= span.max || !span.min.is_finite() || !span.max.is_finite() {
        return span.min;
    }
    rng.gen_range(span.min..=span.max)
}

/// Right-skewed draw biased toward `span.min`: `min + (max - min) * u^exponent`.
pub fn sample_skewed<R: Rng + ?Sized>(rng: &mut R, span: Span<f64>, exponent: f64) -> f64 {
    if span.min >= span.max || !span.min.is_finite() || !span.max.is_finite() {
        return span.min;
    }
    let u: f64 = rng.r#gen();
    span.min + (span.max - span.min) * u.powf(exponent.max(0.0))
}

/// Symmetric jitter in `[-amount, amount]`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f64) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-amount..=amount)
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.
    if r >= 360.0 { 0.0 } else { r }
}

/// Point at `radius` from `center` along `deg` (0 = +x, clockwise in screen space).
pub fn polar(center: Point, radius: f64, deg: f64) -> Point {
    let rad = deg.to_radians();
    center + Vec2::new(rad.cos(), rad.sin()) * radius
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
