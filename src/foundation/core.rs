use crate::foundation::error::{FlourishError, FlourishResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> FlourishResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlourishError::validation("Canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    pub fn h(self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.w() / 2.0, self.h() / 2.0)
    }

    pub fn min_dim(self) -> f64 {
        self.w().min(self.h())
    }

    /// Half the diagonal: the distance from the center to any corner.
    pub fn half_diagonal(self) -> f64 {
        self.w().hypot(self.h()) / 2.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> FlourishResult<Self> {
        if den == 0 {
            return Err(FlourishError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FlourishError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of whole frames that fit in `secs`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb`, alpha is emitted separately by surfaces that need it.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

/// Inclusive `[min, max]` range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl Span<u32> {
    pub fn validate(&self, what: &str) -> FlourishResult<()> {
        if self.min > self.max {
            return Err(FlourishError::validation(format!(
                "{what}: min {} must be <= max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, v: u32) -> bool {
        self.min <= v && v <= self.max
    }
}

impl Span<f64> {
    pub fn validate(&self, what: &str) -> FlourishResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FlourishError::validation(format!(
                "{what}: bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(FlourishError::validation(format!(
                "{what}: min {} must be <= max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
