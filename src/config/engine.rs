use std::path::Path;

use anyhow::Context as _;

use crate::{
    config::profile::{PerformanceTier, ProfileSet},
    foundation::{
        core::{Canvas, Span},
        error::{FlourishError, FlourishResult},
    },
};

/// Which decorative scene the engine produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visualization {
    /// Radial glitch vortex background.
    #[default]
    Vortex,
    /// Organic vine growth overlay.
    Vine,
}

impl Visualization {
    pub fn parse(s: &str) -> FlourishResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vortex" => Ok(Self::Vortex),
            "vine" => Ok(Self::Vine),
            other => Err(FlourishError::validation(format!(
                "unknown visualization '{other}'"
            ))),
        }
    }
}

/// Calm/Burst cadence in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BurstTiming {
    /// Window for the delay before the next burst starts.
    pub delay_ms: Span<f64>,
    /// Exponent skewing the delay toward `delay_ms.min`.
    pub delay_skew: f64,
    /// Window for how long a burst lasts.
    pub duration_ms: Span<f64>,
}

impl Default for BurstTiming {
    fn default() -> Self {
        Self {
            delay_ms: Span::new(6_000.0, 20_000.0),
            delay_skew: 3.0,
            duration_ms: Span::new(2_000.0, 3_000.0),
        }
    }
}

impl BurstTiming {
    pub fn validate(&self) -> FlourishResult<()> {
        self.delay_ms.validate("burst.delay_ms")?;
        self.duration_ms.validate("burst.duration_ms")?;
        if self.delay_ms.min < 0.0 || self.duration_ms.min <= 0.0 {
            return Err(FlourishError::validation(
                "burst delays must be >= 0 and durations > 0",
            ));
        }
        if !self.delay_skew.is_finite() || self.delay_skew <= 0.0 {
            return Err(FlourishError::validation("burst.delay_skew must be > 0"));
        }
        Ok(())
    }
}

/// Everything a host configures when mounting an engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub visualization: Visualization,
    pub canvas: Canvas,
    /// Tier requested by the host; device detection may lower it.
    pub performance_hint: PerformanceTier,
    /// Explicit tier; disables device detection.
    pub forced_tier: Option<PerformanceTier>,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub burst: BurstTiming,
    /// Regeneration cadence while reduced motion is active.
    pub reduced_motion_interval_ms: f64,
    pub profiles: ProfileSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            visualization: Visualization::Vortex,
            canvas: Canvas::default(),
            performance_hint: PerformanceTier::High,
            forced_tier: None,
            seed: None,
            burst: BurstTiming::default(),
            reduced_motion_interval_ms: 60_000.0,
            profiles: ProfileSet::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> FlourishResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(FlourishError::config("canvas width/height must be > 0"));
        }
        if !self.reduced_motion_interval_ms.is_finite() || self.reduced_motion_interval_ms <= 0.0 {
            return Err(FlourishError::config(
                "reduced_motion_interval_ms must be finite and > 0",
            ));
        }
        self.burst
            .validate()
            .map_err(|e| FlourishError::config(e.to_string()))?;
        self.profiles.validate()
    }

    pub fn from_json_str(s: &str) -> FlourishResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| FlourishError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> FlourishResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read engine config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/engine.rs"]
mod tests;
