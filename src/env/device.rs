use crate::{
    config::profile::PerformanceTier,
    foundation::error::{FlourishError, FlourishResult},
};

/// Devices reporting less memory than this are treated as constrained.
pub const MIN_DEVICE_MEMORY_GB: f64 = 4.0;
/// Viewports narrower than this are treated as constrained.
pub const MIN_VIEWPORT_WIDTH: u32 = 768;

/// Network effective connection type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NetworkType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    G2,
    #[serde(rename = "3g")]
    G3,
    #[serde(rename = "4g")]
    G4,
}

impl NetworkType {
    pub fn parse(s: &str) -> FlourishResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => Ok(Self::Slow2g),
            "2g" => Ok(Self::G2),
            "3g" => Ok(Self::G3),
            "4g" => Ok(Self::G4),
            other => Err(FlourishError::validation(format!(
                "unknown network type '{other}'"
            ))),
        }
    }

    pub fn is_constrained(self) -> bool {
        !matches!(self, Self::G4)
    }
}

/// Device capability readings. `None` means the host could not read the signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeviceHints {
    pub device_memory_gb: Option<f64>,
    pub effective_type: Option<NetworkType>,
    pub viewport_width: Option<u32>,
}

impl DeviceHints {
    /// A capable desktop: plenty of memory, fast network, wide viewport.
    pub fn capable() -> Self {
        Self {
            device_memory_gb: Some(8.0),
            effective_type: Some(NetworkType::G4),
            viewport_width: Some(1440),
        }
    }

    /// Name of the first reading that indicates (or fails to rule out) a constrained device.
    pub fn constraint(&self) -> Option<&'static str> {
        match self.device_memory_gb {
            None => return Some("device memory unavailable"),
            Some(gb) if !gb.is_finite() || gb < MIN_DEVICE_MEMORY_GB => {
                return Some("low device memory");
            }
            Some(_) => {}
        }
        match self.effective_type {
            None => return Some("network type unavailable"),
            Some(t) if t.is_constrained() => return Some("slow network"),
            Some(_) => {}
        }
        match self.viewport_width {
            None => Some("viewport width unavailable"),
            Some(w) if w < MIN_VIEWPORT_WIDTH => Some("narrow viewport"),
            Some(_) => None,
        }
    }
}

/// Pick the steady-state tier once at mount.
///
/// A forced tier bypasses detection. Otherwise any constrained or unreadable hint selects
/// [`PerformanceTier::Low`] regardless of the requested tier.
pub fn select_tier(
    requested: PerformanceTier,
    forced: Option<PerformanceTier>,
    hints: &DeviceHints,
) -> PerformanceTier {
    if let Some(tier) = forced {
        tracing::info!(tier = tier.as_str(), "performance tier forced by host");
        return tier;
    }
    match hints.constraint() {
        Some(reason) => {
            if reason.ends_with("unavailable") {
                tracing::warn!(reason, "environment signal missing, assuming constrained device");
            } else {
                tracing::info!(reason, "constrained device, using low tier");
            }
            PerformanceTier::Low
        }
        None => {
            tracing::info!(tier = requested.as_str(), "performance tier selected");
            requested
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/env/device.rs"]
mod tests;
