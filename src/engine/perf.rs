use crate::config::profile::{ConfigProfile, PerformanceTier, ProfileKind, ProfileSet};

/// Resolves the tier-selected steady profile, reduced-motion collapse and burst override.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceController {
    detected: PerformanceTier,
    reduced_motion: bool,
    reduced_motion_interval_ms: f64,
    profiles: ProfileSet,
}

impl PerformanceController {
    pub fn new(
        detected: PerformanceTier,
        reduced_motion: bool,
        reduced_motion_interval_ms: f64,
        profiles: ProfileSet,
    ) -> Self {
        Self {
            detected,
            reduced_motion,
            reduced_motion_interval_ms,
            profiles,
        }
    }

    /// Tier chosen at mount, before any reduced-motion collapse.
    pub fn detected_tier(&self) -> PerformanceTier {
        self.detected
    }

    pub fn effective_tier(&self) -> PerformanceTier {
        if self.reduced_motion {
            PerformanceTier::Low
        } else {
            self.detected
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        if on != self.reduced_motion {
            tracing::info!(reduced_motion = on, "motion preference changed");
        }
        self.reduced_motion = on;
    }

    /// Profile in effect given whether a burst is running.
    pub fn active_kind(&self, burst_active: bool) -> ProfileKind {
        if burst_active && !self.reduced_motion {
            ProfileKind::Burst
        } else {
            ProfileKind::from(self.effective_tier())
        }
    }

    pub fn profile(&self, kind: ProfileKind) -> &ConfigProfile {
        self.profiles.get(kind)
    }

    /// Regeneration cadence for `kind`; near-idle while reduced motion is active.
    pub fn regeneration_interval_ms(&self, kind: ProfileKind) -> f64 {
        if self.reduced_motion {
            self.reduced_motion_interval_ms
        } else {
            self.profiles.get(kind).regeneration_interval_ms
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/perf.rs"]
mod tests;
