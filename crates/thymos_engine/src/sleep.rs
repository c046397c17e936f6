//! Sleep, dream and nightmare state machine.
//!
//! The sleep transition is a ramp driven by a signed velocity, not an
//! exponential approach, so it reaches exactly 1.0 (fully asleep) and
//! exactly 0.0 (fully awake) in a bounded number of ticks. Dreams and
//! nightmares are sub-states that can only start once sleep is deep
//! enough, and are mutually exclusive.

use thymos_core::SleepConfig;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SleepState {
    config: SleepConfig,
    tick_rate: f64,
    /// Whether the avatar is commanded asleep (the ramp lags behind).
    pub active: bool,
    /// 0.0 fully awake, 1.0 fully asleep. f64 so the per-tick velocity
    /// sums past the clamp bound and saturates exactly.
    pub transition: f64,
    velocity: f64,
    pub dream_active: bool,
    pub dream_intensity: f32,
    pub nightmare_active: bool,
    pub nightmare_intensity: f32,
}

impl SleepState {
    pub fn new(config: SleepConfig, tick_rate: f64) -> Self {
        Self {
            config,
            tick_rate,
            active: false,
            transition: 0.0,
            velocity: 0.0,
            dream_active: false,
            dream_intensity: 0.5,
            nightmare_active: false,
            nightmare_intensity: 0.5,
        }
    }

    /// Sleep depth as seen by scenario triggers and the renderer.
    pub fn depth(&self) -> f32 {
        self.transition as f32
    }

    pub fn is_deep(&self) -> bool {
        self.active && self.transition >= self.config.deep_threshold
    }

    /// Flip between falling asleep and waking up. Waking ends any dream
    /// or nightmare immediately.
    pub fn toggle_sleep(&mut self) {
        self.active = !self.active;
        if self.active {
            self.velocity = 1.0 / (self.config.fall_asleep_secs * self.tick_rate);
            debug!("falling asleep");
        } else {
            self.velocity = -1.0 / (self.config.wake_secs * self.tick_rate);
            self.dream_active = false;
            self.nightmare_active = false;
            debug!("waking up");
        }
    }

    /// Start or stop a dream. Starting requires deep sleep and ends any
    /// running nightmare.
    pub fn toggle_dream(&mut self) {
        if self.dream_active {
            self.dream_active = false;
            return;
        }
        if !self.is_deep() {
            warn!("cannot dream: not deeply asleep");
            return;
        }
        self.dream_active = true;
        self.nightmare_active = false;
    }

    /// Start or stop a nightmare. Same depth gate as dreams; starting
    /// one ends any running dream.
    pub fn toggle_nightmare(&mut self) {
        if self.nightmare_active {
            self.nightmare_active = false;
            return;
        }
        if !self.is_deep() {
            warn!("cannot have a nightmare: not deeply asleep");
            return;
        }
        self.nightmare_active = true;
        self.dream_active = false;
    }

    pub fn adjust_dream_intensity(&mut self, delta: f32) {
        self.dream_intensity = (self.dream_intensity + delta).clamp(0.1, 1.0);
    }

    pub fn adjust_nightmare_intensity(&mut self, delta: f32) {
        self.nightmare_intensity = (self.nightmare_intensity + delta).clamp(0.1, 1.0);
    }

    /// Advance the transition ramp one tick.
    pub fn advance(&mut self) {
        if self.velocity == 0.0 {
            return;
        }
        self.transition = (self.transition + self.velocity).clamp(0.0, 1.0);
        if self.transition == 0.0 || self.transition == 1.0 {
            self.velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SleepState {
        SleepState::new(SleepConfig::default(), 25.0)
    }

    #[test]
    fn test_transition_reaches_exactly_one() {
        let mut s = state();
        s.toggle_sleep();
        // 2 s at 25 ticks/s: 50 ticks of 0.02. The float sum drifts past
        // 1.0 on the last tick and the clamp pins it exactly.
        for _ in 0..49 {
            s.advance();
        }
        assert!(s.transition < 1.0, "saturated a tick early");
        s.advance();
        assert_eq!(s.transition, 1.0);
    }

    #[test]
    fn test_wake_returns_to_exactly_zero() {
        let mut s = state();
        s.toggle_sleep();
        for _ in 0..50 {
            s.advance();
        }
        s.toggle_sleep();
        // 1 s wake: 25 ticks of -0.04.
        for _ in 0..24 {
            s.advance();
        }
        assert!(s.transition > 0.0, "woke a tick early");
        s.advance();
        assert_eq!(s.transition, 0.0);
        assert!(!s.active);
    }

    #[test]
    fn test_partial_descent_then_wake() {
        let mut s = state();
        s.toggle_sleep();
        for _ in 0..10 {
            s.advance();
        }
        assert!(s.transition > 0.0 && s.transition < 1.0);
        s.toggle_sleep();
        for _ in 0..30 {
            s.advance();
        }
        assert_eq!(s.transition, 0.0);
    }

    #[test]
    fn test_dream_requires_deep_sleep() {
        let mut s = state();
        s.toggle_dream();
        assert!(!s.dream_active, "rejected while awake");

        s.toggle_sleep();
        for _ in 0..10 {
            s.advance();
        }
        s.toggle_dream();
        assert!(!s.dream_active, "rejected in shallow sleep");

        for _ in 0..50 {
            s.advance();
        }
        s.toggle_dream();
        assert!(s.dream_active);
    }

    #[test]
    fn test_dream_and_nightmare_mutually_exclusive() {
        let mut s = state();
        s.toggle_sleep();
        for _ in 0..60 {
            s.advance();
        }
        s.toggle_dream();
        assert!(s.dream_active);
        s.toggle_nightmare();
        assert!(s.nightmare_active);
        assert!(!s.dream_active);
        s.toggle_dream();
        assert!(s.dream_active);
        assert!(!s.nightmare_active);
    }

    #[test]
    fn test_waking_ends_dreams() {
        let mut s = state();
        s.toggle_sleep();
        for _ in 0..60 {
            s.advance();
        }
        s.toggle_nightmare();
        assert!(s.nightmare_active);
        s.toggle_sleep();
        assert!(!s.nightmare_active);
        assert!(!s.dream_active);
    }

    #[test]
    fn test_intensity_clamps() {
        let mut s = state();
        s.adjust_dream_intensity(10.0);
        assert_eq!(s.dream_intensity, 1.0);
        s.adjust_dream_intensity(-10.0);
        assert_eq!(s.dream_intensity, 0.1);
        s.adjust_nightmare_intensity(-10.0);
        assert_eq!(s.nightmare_intensity, 0.1);
        s.adjust_nightmare_intensity(0.25);
        assert!((s.nightmare_intensity - 0.35).abs() < 1e-6);
    }
}
