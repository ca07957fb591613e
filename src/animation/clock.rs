use rand::Rng;

use crate::{
    config::profile::PerformanceTier,
    foundation::{
        core::Span,
        math::{sample_f64, wrap_degrees},
    },
};

/// Chance per processed tick that the target speed is re-sampled.
pub const RESAMPLE_PROBABILITY: f64 = 0.01;
/// Fraction of the remaining gap to the target speed closed per processed tick.
pub const SMOOTHING: f64 = 0.02;
/// Speed factors are expressed in degrees per 1/60 s.
pub const SPEED_UNITS_PER_SEC: f64 = 60.0;

/// Rotation and the speed it is integrated with.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Always in `[0, 360)`.
    pub rotation_deg: f64,
    pub current_speed: f64,
    pub target_speed: f64,
}

impl AnimationState {
    /// Start at rest orientation, already moving at the slow end of `speed`.
    pub fn new(speed: Span<f64>) -> Self {
        Self {
            rotation_deg: 0.0,
            current_speed: speed.min,
            target_speed: speed.min,
        }
    }

    /// Integrate one processed tick of `dt_secs`.
    ///
    /// Negative or non-finite deltas integrate as zero. Huge deltas (backgrounded tabs) are fine:
    /// rotation is wrapped after every step.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt_secs: f64, speed: Span<f64>, rng: &mut R) {
        let dt = if dt_secs.is_finite() && dt_secs > 0.0 {
            dt_secs
        } else {
            0.0
        };
        if rng.r#gen::<f64>() < RESAMPLE_PROBABILITY {
            self.target_speed = sample_f64(rng, speed);
        }
        self.current_speed += (self.target_speed - self.current_speed) * SMOOTHING;
        self.rotation_deg =
            wrap_degrees(self.rotation_deg + self.current_speed * dt * SPEED_UNITS_PER_SEC);
    }
}

/// Processes one tick out of every `N`; the rest are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSkip {
    every: u32,
    counter: u32,
}

impl FrameSkip {
    pub fn for_tier(tier: PerformanceTier) -> Self {
        let every = match tier {
            PerformanceTier::High => 1,
            PerformanceTier::Medium => 2,
            PerformanceTier::Low => 3,
        };
        Self { every, counter: 0 }
    }

    pub fn every(&self) -> u32 {
        self.every
    }

    /// Change the stride without restarting the current cycle.
    pub fn set_tier(&mut self, tier: PerformanceTier) {
        let every = Self::for_tier(tier).every;
        if every != self.every {
            self.every = every;
            self.counter %= every;
        }
    }

    /// `true` for the first tick of each cycle of `N`.
    pub fn should_process(&mut self) -> bool {
        let process = self.counter == 0;
        self.counter = (self.counter + 1) % self.every;
        process
    }
}

/// Turns host timestamps into deltas for processed ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    skip: FrameSkip,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(tier: PerformanceTier) -> Self {
        Self {
            skip: FrameSkip::for_tier(tier),
            last_ms: None,
        }
    }

    pub fn set_tier(&mut self, tier: PerformanceTier) {
        self.skip.set_tier(tier);
    }

    pub fn stride(&self) -> u32 {
        self.skip.every()
    }

    /// Forget the previous timestamp so the next processed tick integrates zero time.
    pub fn reset_baseline(&mut self) {
        self.last_ms = None;
    }

    /// `None` for skipped ticks; otherwise milliseconds since the previous processed tick.
    pub fn begin_tick(&mut self, now_ms: f64) -> Option<f64> {
        if !self.skip.should_process() {
            return None;
        }
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() => (now_ms - last).max(0.0),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        Some(dt)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
