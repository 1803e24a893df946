//! Frame-counted cooldown timer.
//!
//! Cooldowns never look at wall-clock time. The owner calls [`Cooldown::tick`]
//! once per frame and polls [`Cooldown::check_finished`], which keeps every
//! timed behaviour deterministic under a fixed frame loop.

use super::random::RandomSource;

/// Timer gating a repeatable action (shooting, sprite swaps, flashes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cooldown {
    /// Nominal interval in frames.
    base: u32,
    /// Maximum deviation from `base` drawn on each varied reset.
    variance: u32,
    /// Interval currently being counted towards.
    duration: u32,
    elapsed: u32,
}

impl Cooldown {
    /// Fixed-interval cooldown.
    pub fn new(frames: u32) -> Self {
        Self {
            base: frames,
            variance: 0,
            duration: frames,
            elapsed: 0,
        }
    }

    /// Cooldown whose interval is redrawn from `frames ± variance` on every
    /// [`Cooldown::reset_varied`].
    pub fn with_variance(frames: u32, variance: u32, rng: &mut dyn RandomSource) -> Self {
        let mut cooldown = Self {
            base: frames,
            variance,
            duration: frames,
            elapsed: 0,
        };
        cooldown.reroll(rng);
        cooldown
    }

    /// Advance by one frame.
    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    pub fn check_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Restart counting towards the current interval.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Restart counting and draw a fresh interval.
    pub fn reset_varied(&mut self, rng: &mut dyn RandomSource) {
        self.elapsed = 0;
        self.reroll(rng);
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    fn reroll(&mut self, rng: &mut dyn RandomSource) {
        if self.variance == 0 {
            self.duration = self.base;
            return;
        }
        let span = self.variance as usize * 2 + 1;
        let offset = rng.below(span) as i64 - self.variance as i64;
        self.duration = (self.base as i64 + offset).max(0) as u32;
    }
}
