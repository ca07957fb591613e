/// Throttles scene regeneration to the active profile's interval.
///
/// The accumulator is reset to zero (not reduced by the interval) whenever a regeneration
/// happens, so regenerations can never outpace the interval however fast ticks arrive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegenerationScheduler {
    accumulated_ms: f64,
}

impl RegenerationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Add `dt_ms` and report whether a regeneration is due; resets when it is.
    pub fn take_due(&mut self, dt_ms: f64, interval_ms: f64) -> bool {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.accumulated_ms += dt_ms;
        }
        if self.accumulated_ms >= interval_ms {
            self.mark_regenerated();
            return true;
        }
        false
    }

    /// Record a regeneration that happened outside [`Self::take_due`], such as a theme change.
    pub fn mark_regenerated(&mut self) {
        self.accumulated_ms = 0.0;
    }

    pub fn cancel(&mut self) {
        self.mark_regenerated();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/regen.rs"]
mod tests;
