//! The owner struct that ticks everything in order.

use crate::arbiter::{self, Selection};
use crate::blender::TemporalBlender;
use crate::masking::{MaskingModel, SocialInputs};
use crate::sleep::SleepState;
use serde::Serialize;
use thymos_core::{Channel, ChannelBank, Emotion, EvalCtx, ScenarioCatalog, StateVector, ThymosConfig};
use tracing::info;

/// Outcome of arbitration plus masking, carried across ticks so the
/// engine can detect displayed-emotion changes.
#[derive(Debug, Clone, Copy)]
pub struct EmotionalState {
    pub internal: Emotion,
    pub internal_intensity: f32,
    pub displayed: Emotion,
    pub displayed_intensity: f32,
    pub is_masking: bool,
    pub effort: f32,
    /// Ramp from 0 to 1 after each displayed-emotion change; the renderer
    /// scales the new scenario's pull by it.
    pub transition: f32,
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self {
            internal: Emotion::Neutral,
            internal_intensity: 0.0,
            displayed: Emotion::Neutral,
            displayed_intensity: 0.0,
            is_masking: false,
            effort: 0.0,
            transition: 0.0,
        }
    }
}

/// Read-only per-tick view handed to the visual resolver.
#[derive(Debug, Clone)]
pub struct Frame {
    pub channels: ChannelBank,
    pub emotional: EmotionalState,
    pub sleep_factor: f32,
    pub dreaming: bool,
    pub dream_intensity: f32,
    pub nightmare: bool,
    pub nightmare_intensity: f32,
    pub is_charging: bool,
}

/// Diagnostic view, JSON-serializable for the CLI's snapshot dump.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub internal_emotion: String,
    pub internal_intensity: f32,
    pub displayed_emotion: String,
    pub displayed_intensity: f32,
    pub is_masking: bool,
    pub masking_effort: f32,
    pub emotion_transition: f32,
    pub sleep_active: bool,
    pub sleep_transition: f64,
    pub dream_active: bool,
    pub dream_intensity: f32,
    pub nightmare_active: bool,
    pub nightmare_intensity: f32,
    pub is_charging: bool,
    pub current: ChannelBank,
    pub targets: ChannelBank,
}

pub struct MaskEngine {
    config: ThymosConfig,
    state: StateVector,
    catalog: ScenarioCatalog,
    blender: TemporalBlender,
    masking: MaskingModel,
    sleep: SleepState,
    emotional: EmotionalState,
    prev_energy_target: f32,
    is_charging: bool,
    /// Engine time in seconds, advanced one tick step per tick.
    elapsed: f64,
}

impl MaskEngine {
    pub fn new(config: ThymosConfig) -> Self {
        let blender = TemporalBlender::new(config.engine.clone());
        let sleep = SleepState::new(config.sleep.clone(), config.engine.tick_rate as f64);
        let masking = MaskingModel::new(config.masking.clone());
        let state = StateVector::default();
        let prev_energy_target = state.target(Channel::Energy);
        Self {
            config,
            state,
            catalog: ScenarioCatalog::standard(),
            blender,
            masking,
            sleep,
            emotional: EmotionalState::default(),
            prev_energy_target,
            is_charging: false,
            elapsed: 0.0,
        }
    }

    // ========================================================================
    // Input surface
    // ========================================================================

    pub fn set_target(&mut self, ch: Channel, value: f32) {
        self.state.set_target(ch, value);
    }

    pub fn nudge_target(&mut self, ch: Channel, delta: f32) {
        self.state.nudge_target(ch, delta);
    }

    pub fn target(&self, ch: Channel) -> f32 {
        self.state.target(ch)
    }

    pub fn current(&self, ch: Channel) -> f32 {
        self.state.current(ch)
    }

    pub fn toggle_sleep(&mut self) {
        self.sleep.toggle_sleep();
    }

    pub fn toggle_dream(&mut self) {
        self.sleep.toggle_dream();
    }

    pub fn toggle_nightmare(&mut self) {
        self.sleep.toggle_nightmare();
    }

    pub fn adjust_dream_intensity(&mut self, delta: f32) {
        self.sleep.adjust_dream_intensity(delta);
    }

    pub fn adjust_nightmare_intensity(&mut self, delta: f32) {
        self.sleep.adjust_nightmare_intensity(delta);
    }

    /// Full reset: every channel back to baseline, awake, neutral.
    pub fn reset(&mut self) {
        self.state.reset();
        self.sleep = SleepState::new(
            self.config.sleep.clone(),
            self.config.engine.tick_rate as f64,
        );
        self.emotional = EmotionalState::default();
        self.prev_energy_target = self.state.target(Channel::Energy);
        self.is_charging = false;
        info!("engine reset to baseline");
    }

    // ========================================================================
    // The tick
    // ========================================================================

    pub fn tick(&mut self) {
        self.elapsed += 1.0 / self.config.engine.tick_rate as f64;

        let was_deep = self.sleep.transition >= 1.0;
        let was_awake = self.sleep.transition <= 0.0;
        self.sleep.advance();
        if !was_deep && self.sleep.transition >= 1.0 {
            info!(t = self.elapsed, "fully asleep");
        } else if !was_awake && self.sleep.transition <= 0.0 {
            info!(t = self.elapsed, "fully awake");
        }

        // Energy target rising means someone is feeding the avatar power.
        let energy_target = self.state.target(Channel::Energy);
        self.is_charging = energy_target > self.prev_energy_target;
        self.prev_energy_target = energy_target;

        self.blender.tick(&mut self.state);

        let ctx = EvalCtx {
            channels: &self.state.current,
            sleep_active: self.sleep.active || self.sleep.transition > 0.0,
            sleep_depth: self.sleep.depth(),
        };
        let Selection { emotion, intensity } = arbiter::select(&self.catalog, &ctx);

        let inputs = SocialInputs::from_bank(&self.state.current);
        let verdict = self.masking.compute(emotion, intensity, &inputs);

        let prev_displayed = self.emotional.displayed;
        self.emotional.internal = emotion;
        self.emotional.internal_intensity = intensity;
        self.emotional.displayed = verdict.displayed;
        self.emotional.displayed_intensity = verdict.displayed_intensity;
        self.emotional.is_masking = verdict.is_masking;
        self.emotional.effort = verdict.effort;

        if verdict.displayed != prev_displayed {
            self.emotional.transition = 0.0;
            if verdict.is_masking {
                info!(
                    t = self.elapsed,
                    internal = %emotion,
                    shows = %verdict.displayed,
                    effort = verdict.effort,
                    "masking"
                );
            } else {
                info!(
                    t = self.elapsed,
                    emotion = %verdict.displayed,
                    intensity = verdict.displayed_intensity,
                    "authentic"
                );
            }
        } else {
            self.emotional.transition = (self.emotional.transition
                + self.config.engine.transition_step)
                .min(1.0);
        }
    }

    // ========================================================================
    // Output surface
    // ========================================================================

    pub fn emotional(&self) -> &EmotionalState {
        &self.emotional
    }

    pub fn sleep(&self) -> &SleepState {
        &self.sleep
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame(&self) -> Frame {
        Frame {
            channels: self.state.current,
            emotional: self.emotional,
            sleep_factor: self.sleep.depth(),
            dreaming: self.sleep.dream_active,
            dream_intensity: self.sleep.dream_intensity,
            nightmare: self.sleep.nightmare_active,
            nightmare_intensity: self.sleep.nightmare_intensity,
            is_charging: self.is_charging,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            internal_emotion: self.emotional.internal.to_string(),
            internal_intensity: self.emotional.internal_intensity,
            displayed_emotion: self.emotional.displayed.to_string(),
            displayed_intensity: self.emotional.displayed_intensity,
            is_masking: self.emotional.is_masking,
            masking_effort: self.emotional.effort,
            emotion_transition: self.emotional.transition,
            sleep_active: self.sleep.active,
            sleep_transition: self.sleep.transition,
            dream_active: self.sleep.dream_active,
            dream_intensity: self.sleep.dream_intensity,
            nightmare_active: self.sleep.nightmare_active,
            nightmare_intensity: self.sleep.nightmare_intensity,
            is_charging: self.is_charging,
            current: self.state.current,
            targets: self.state.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MaskEngine {
        MaskEngine::new(ThymosConfig::default())
    }

    #[test]
    fn test_idle_engine_stays_neutral() {
        let mut e = engine();
        for _ in 0..100 {
            e.tick();
        }
        assert_eq!(e.emotional().internal, Emotion::Neutral);
        assert_eq!(e.emotional().displayed, Emotion::Neutral);
        assert!(!e.emotional().is_masking);
    }

    #[test]
    fn test_sustained_stress_becomes_pain() {
        let mut e = engine();
        // One spike alone bleeds off before current stress can cross the
        // pain threshold; keep re-spiking and it crosses on tick 4
        // (1/3, then +2/3 of the gap each tick: 0.33, 0.56, 0.70, 0.80).
        for _ in 0..4 {
            e.set_target(Channel::Stress, 1.0);
            e.tick();
        }
        assert_eq!(e.emotional().internal, Emotion::Pain);
        assert!(e.emotional().internal_intensity > 0.7);
    }

    #[test]
    fn test_single_stress_spike_fades_without_pain() {
        let mut e = engine();
        e.set_target(Channel::Stress, 1.0);
        for _ in 0..10 {
            e.tick();
            assert_ne!(e.emotional().internal, Emotion::Pain);
        }
        assert!(e.current(Channel::Stress) < 0.5);
    }

    #[test]
    fn test_transition_starts_at_zero() {
        // A fresh engine is mid-ramp into neutral, not settled there.
        let e = engine();
        assert_eq!(e.emotional().transition, 0.0);
    }

    #[test]
    fn test_transition_resets_on_displayed_change() {
        let mut e = engine();
        e.tick();
        assert!(e.emotional().transition > 0.0);

        e.set_target(Channel::JoyInput, 0.9);
        // Smooth joy_input past the masking threshold.
        for _ in 0..3 {
            e.tick();
        }
        assert_ne!(e.emotional().displayed, Emotion::Neutral);
        assert!(e.emotional().is_masking);
        let after_change = e.emotional().transition;
        assert!(after_change < 0.2, "transition restarted near zero");

        e.tick();
        assert!(e.emotional().transition > after_change);
    }

    #[test]
    fn test_transition_saturates_at_one() {
        let mut e = engine();
        for _ in 0..50 {
            e.tick();
        }
        assert_eq!(e.emotional().transition, 1.0);
    }

    #[test]
    fn test_masking_over_internal_emotion() {
        let mut e = engine();
        // Deep exhaustion drives internal despair while a faint joy input
        // still forces a smile on top.
        e.set_target(Channel::Energy, 0.0);
        e.set_target(Channel::Cpu, 1.0);
        e.set_target(Channel::Ram, 1.0);
        e.set_target(Channel::JoyInput, 0.25);
        for _ in 0..300 {
            e.tick();
        }
        assert_eq!(e.emotional().internal, Emotion::Despair);
        assert!(e.emotional().is_masking);
        assert_eq!(e.emotional().displayed, Emotion::Smile);
        assert!(e.emotional().effort > 0.0);
    }

    #[test]
    fn test_charging_detection() {
        let mut e = engine();
        e.set_target(Channel::Energy, 0.2);
        e.tick();
        assert!(!e.frame().is_charging, "energy dropped");
        e.set_target(Channel::Energy, 0.5);
        e.tick();
        assert!(e.frame().is_charging);
        e.tick();
        assert!(!e.frame().is_charging, "target stable again");
    }

    #[test]
    fn test_sleep_flow_through_engine() {
        let mut e = engine();
        e.toggle_sleep();
        for _ in 0..60 {
            e.tick();
        }
        assert_eq!(e.emotional().internal, Emotion::Sleep);
        assert_eq!(e.frame().sleep_factor, 1.0);

        e.toggle_dream();
        assert!(e.frame().dreaming);

        e.toggle_sleep();
        for _ in 0..30 {
            e.tick();
        }
        assert_eq!(e.frame().sleep_factor, 0.0);
        assert!(!e.frame().dreaming);
        assert_ne!(e.emotional().internal, Emotion::Sleep);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut e = engine();
        e.set_target(Channel::Stress, 1.0);
        e.set_target(Channel::JoyInput, 0.9);
        e.toggle_sleep();
        for _ in 0..20 {
            e.tick();
        }
        e.reset();
        assert_eq!(e.current(Channel::Stress), 0.0);
        assert_eq!(e.target(Channel::JoyInput), 0.0);
        assert_eq!(e.frame().sleep_factor, 0.0);
        assert_eq!(e.emotional().internal, Emotion::Neutral);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut e = engine();
        e.tick();
        let json = serde_json::to_string(&e.snapshot()).unwrap();
        assert!(json.contains("\"internal_emotion\":\"neutral\""));
        assert!(json.contains("\"sleep_active\":false"));
    }
}
