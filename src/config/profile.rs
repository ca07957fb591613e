use crate::foundation::{
    core::Span,
    error::{FlourishError, FlourishResult},
};

/// Performance class governing generation density, frame skipping and draw caps.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    High,
}

impl PerformanceTier {
    pub fn parse(s: &str) -> FlourishResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(FlourishError::validation(format!(
                "unknown performance tier '{other}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Which of the four profiles is in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Low,
    Medium,
    High,
    Burst,
}

impl From<PerformanceTier> for ProfileKind {
    fn from(tier: PerformanceTier) -> Self {
        match tier {
            PerformanceTier::Low => Self::Low,
            PerformanceTier::Medium => Self::Medium,
            PerformanceTier::High => Self::High,
        }
    }
}

/// Generation and animation parameter ranges for one operating mode.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfigProfile {
    /// Decorative vortex paths (in addition to the two base spirals).
    pub paths: Span<u32>,
    /// Noise dots.
    pub dots: Span<u32>,
    /// Text glyphs around the vortex center.
    pub glyphs: Span<u32>,
    /// Falling shapes seeded above the canvas.
    pub falling: Span<u32>,
    /// Root vines.
    pub vines: Span<u32>,
    /// Sample points per vine curve.
    pub vine_samples: Span<u32>,

    pub path_opacity: Span<f64>,
    pub dot_opacity: Span<f64>,
    pub glyph_opacity: Span<f64>,
    pub shape_opacity: Span<f64>,
    pub decoration_opacity: Span<f64>,

    /// Per-primitive animation duration in seconds.
    pub duration_s: Span<f64>,
    /// Dot radius, glyph scale and decoration size in pixels.
    pub size: Span<f64>,
    pub stroke_width: Span<f64>,
    /// Rotation speed factor; degrees per 1/60 s.
    pub speed: Span<f64>,

    pub regeneration_interval_ms: f64,
    pub branch_probability: f64,
    pub decoration_probability: f64,

    /// Full-surface displacement overlay.
    pub distortion: bool,
    /// Full-surface color pulse.
    pub color_pulse: bool,
}

impl ConfigProfile {
    pub const LOW: Self = Self {
        paths: Span::new(3, 5),
        dots: Span::new(20, 40),
        glyphs: Span::new(4, 6),
        falling: Span::new(4, 8),
        vines: Span::new(2, 3),
        vine_samples: Span::new(10, 14),
        path_opacity: Span::new(0.15, 0.35),
        dot_opacity: Span::new(0.1, 0.3),
        glyph_opacity: Span::new(0.2, 0.4),
        shape_opacity: Span::new(0.15, 0.35),
        decoration_opacity: Span::new(0.5, 0.8),
        duration_s: Span::new(8.0, 14.0),
        size: Span::new(1.0, 2.5),
        stroke_width: Span::new(0.5, 1.5),
        speed: Span::new(0.05, 0.15),
        regeneration_interval_ms: 6_000.0,
        branch_probability: 0.3,
        decoration_probability: 0.25,
        distortion: false,
        color_pulse: false,
    };

    pub const MEDIUM: Self = Self {
        paths: Span::new(5, 8),
        dots: Span::new(40, 80),
        glyphs: Span::new(6, 10),
        falling: Span::new(8, 14),
        vines: Span::new(3, 4),
        vine_samples: Span::new(12, 18),
        path_opacity: Span::new(0.2, 0.45),
        dot_opacity: Span::new(0.15, 0.4),
        glyph_opacity: Span::new(0.25, 0.5),
        shape_opacity: Span::new(0.2, 0.45),
        decoration_opacity: Span::new(0.55, 0.85),
        duration_s: Span::new(6.0, 12.0),
        size: Span::new(1.0, 3.0),
        stroke_width: Span::new(0.75, 2.0),
        speed: Span::new(0.1, 0.3),
        regeneration_interval_ms: 4_000.0,
        branch_probability: 0.45,
        decoration_probability: 0.35,
        distortion: false,
        color_pulse: false,
    };

    pub const HIGH: Self = Self {
        paths: Span::new(8, 12),
        dots: Span::new(80, 140),
        glyphs: Span::new(10, 16),
        falling: Span::new(12, 20),
        vines: Span::new(4, 6),
        vine_samples: Span::new(16, 24),
        path_opacity: Span::new(0.25, 0.55),
        dot_opacity: Span::new(0.2, 0.5),
        glyph_opacity: Span::new(0.3, 0.6),
        shape_opacity: Span::new(0.25, 0.55),
        decoration_opacity: Span::new(0.6, 0.9),
        duration_s: Span::new(4.0, 10.0),
        size: Span::new(1.0, 3.5),
        stroke_width: Span::new(1.0, 2.5),
        speed: Span::new(0.2, 0.5),
        regeneration_interval_ms: 3_000.0,
        branch_probability: 0.6,
        decoration_probability: 0.45,
        distortion: false,
        color_pulse: false,
    };

    pub const BURST: Self = Self {
        paths: Span::new(14, 20),
        dots: Span::new(150, 220),
        glyphs: Span::new(16, 24),
        falling: Span::new(20, 30),
        vines: Span::new(5, 7),
        vine_samples: Span::new(18, 26),
        path_opacity: Span::new(0.45, 0.85),
        dot_opacity: Span::new(0.4, 0.8),
        glyph_opacity: Span::new(0.5, 0.9),
        shape_opacity: Span::new(0.45, 0.85),
        decoration_opacity: Span::new(0.7, 1.0),
        duration_s: Span::new(1.0, 3.0),
        size: Span::new(1.5, 4.5),
        stroke_width: Span::new(1.5, 3.5),
        speed: Span::new(1.2, 2.4),
        regeneration_interval_ms: 400.0,
        branch_probability: 0.75,
        decoration_probability: 0.6,
        distortion: true,
        color_pulse: true,
    };

    /// Check the range and probability invariants.
    pub fn validate(&self) -> FlourishResult<()> {
        self.paths.validate("paths")?;
        self.dots.validate("dots")?;
        self.glyphs.validate("glyphs")?;
        self.falling.validate("falling")?;
        self.vines.validate("vines")?;
        self.vine_samples.validate("vine_samples")?;

        for (what, span) in [
            ("path_opacity", self.path_opacity),
            ("dot_opacity", self.dot_opacity),
            ("glyph_opacity", self.glyph_opacity),
            ("shape_opacity", self.shape_opacity),
            ("decoration_opacity", self.decoration_opacity),
        ] {
            span.validate(what)?;
            if span.min < 0.0 || span.max > 1.0 {
                return Err(FlourishError::validation(format!(
                    "{what} must lie within [0, 1]"
                )));
            }
        }

        self.duration_s.validate("duration_s")?;
        self.size.validate("size")?;
        self.stroke_width.validate("stroke_width")?;
        self.speed.validate("speed")?;

        if !self.regeneration_interval_ms.is_finite() || self.regeneration_interval_ms <= 0.0 {
            return Err(FlourishError::validation(
                "regeneration_interval_ms must be finite and > 0",
            ));
        }
        for (what, p) in [
            ("branch_probability", self.branch_probability),
            ("decoration_probability", self.decoration_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(FlourishError::validation(format!(
                    "{what} must lie within [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// The four profiles an engine switches between.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProfileSet {
    pub low: ConfigProfile,
    pub medium: ConfigProfile,
    pub high: ConfigProfile,
    pub burst: ConfigProfile,
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self {
            low: ConfigProfile::LOW,
            medium: ConfigProfile::MEDIUM,
            high: ConfigProfile::HIGH,
            burst: ConfigProfile::BURST,
        }
    }
}

impl ProfileSet {
    pub fn get(&self, kind: ProfileKind) -> &ConfigProfile {
        match kind {
            ProfileKind::Low => &self.low,
            ProfileKind::Medium => &self.medium,
            ProfileKind::High => &self.high,
            ProfileKind::Burst => &self.burst,
        }
    }

    pub fn validate(&self) -> FlourishResult<()> {
        for (name, p) in [
            ("low", &self.low),
            ("medium", &self.medium),
            ("high", &self.high),
            ("burst", &self.burst),
        ] {
            p.validate()
                .map_err(|e| FlourishError::config(format!("profile '{name}': {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/profile.rs"]
mod tests;
