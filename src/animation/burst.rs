use rand::Rng;

use crate::{
    config::engine::BurstTiming,
    foundation::math::{sample_f64, sample_skewed},
};

/// A one-shot deadline on the engine clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timer {
    deadline_ms: Option<f64>,
}

impl Timer {
    pub fn arm(&mut self, at_ms: f64) {
        self.deadline_ms = Some(at_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline_ms
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn remaining(&self, now_ms: f64) -> Option<f64> {
        self.deadline_ms.map(|d| (d - now_ms).max(0.0))
    }

    pub fn fired(&self, now_ms: f64) -> bool {
        matches!(self.deadline_ms, Some(d) if now_ms >= d)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BurstPhase {
    Calm,
    Burst,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BurstTransition {
    Started { duration_ms: f64 },
    Ended { next_in_ms: f64 },
}

/// Snapshot of the burst state machine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstState {
    pub active: bool,
    /// Time until the next burst starts, when one is scheduled.
    pub next_start_in_ms: Option<f64>,
    /// Time until the current burst ends, while one is running.
    pub ends_in_ms: Option<f64>,
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

impl BurstState {
    pub fn idle() -> Self {
        Self {
            active: false,
            next_start_in_ms: None,
            ends_in_ms: None,
            elapsed_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    /// Fraction of the current burst elapsed, 0 when calm.
    pub fn progress(&self) -> f64 {
        if !self.active || self.duration_ms <= 0.0 {
            return 0.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// Calm/Burst state machine driven by the engine's active clock.
///
/// The next burst is only scheduled when a burst ends, so a running burst cannot be superseded
/// or cut short except by disabling the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstController {
    timing: BurstTiming,
    phase: BurstPhase,
    enabled: bool,
    next_start: Timer,
    current_end: Timer,
    started_at_ms: f64,
    duration_ms: f64,
}

impl BurstController {
    /// A disabled controller with nothing scheduled.
    pub fn new(timing: BurstTiming) -> Self {
        Self {
            timing,
            phase: BurstPhase::Calm,
            enabled: false,
            next_start: Timer::default(),
            current_end: Timer::default(),
            started_at_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    pub fn phase(&self) -> BurstPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == BurstPhase::Burst
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn next_start(&self) -> &Timer {
        &self.next_start
    }

    pub fn current_end(&self) -> &Timer {
        &self.current_end
    }

    /// Start cycling; schedules the first burst relative to `now_ms`.
    pub fn enable<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        self.phase = BurstPhase::Calm;
        self.schedule_next(now_ms, rng);
    }

    /// Cancel both timers and fall back to calm.
    pub fn disable(&mut self) {
        if self.phase == BurstPhase::Burst {
            tracing::debug!("burst cancelled");
        }
        self.enabled = false;
        self.phase = BurstPhase::Calm;
        self.next_start.cancel();
        self.current_end.cancel();
        self.duration_ms = 0.0;
    }

    fn schedule_next<R: Rng + ?Sized>(&mut self, from_ms: f64, rng: &mut R) -> f64 {
        let delay = sample_skewed(rng, self.timing.delay_ms, self.timing.delay_skew);
        self.next_start.arm(from_ms + delay);
        delay
    }

    /// Fire at most one due transition.
    ///
    /// Transitions take effect at `now_ms`, the tick that observes them, so a burst stays active
    /// for at least its sampled duration however late or coarse the ticks are.
    pub fn advance<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> Option<BurstTransition> {
        if !self.enabled {
            return None;
        }
        match self.phase {
            BurstPhase::Calm => {
                if !self.next_start.fired(now_ms) {
                    return None;
                }
                self.next_start.cancel();
                let duration = sample_f64(rng, self.timing.duration_ms);
                self.phase = BurstPhase::Burst;
                self.started_at_ms = now_ms;
                self.duration_ms = duration;
                self.current_end.arm(now_ms + duration);
                tracing::debug!(duration_ms = duration, "burst started");
                Some(BurstTransition::Started {
                    duration_ms: duration,
                })
            }
            BurstPhase::Burst => {
                if !self.current_end.fired(now_ms) {
                    return None;
                }
                self.current_end.cancel();
                self.phase = BurstPhase::Calm;
                self.duration_ms = 0.0;
                let next_in_ms = self.schedule_next(now_ms, rng);
                tracing::debug!(next_in_ms, "burst ended");
                Some(BurstTransition::Ended { next_in_ms })
            }
        }
    }

    pub fn state(&self, now_ms: f64) -> BurstState {
        let active = self.is_active();
        BurstState {
            active,
            next_start_in_ms: self.next_start.remaining(now_ms),
            ends_in_ms: self.current_end.remaining(now_ms),
            elapsed_ms: if active {
                (now_ms - self.started_at_ms).clamp(0.0, self.duration_ms)
            } else {
                0.0
            },
            duration_ms: if active { self.duration_ms } else { 0.0 },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/burst.rs"]
mod tests;
