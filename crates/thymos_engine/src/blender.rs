//! Temporal blending: target decay plus exponential smoothing.
//!
//! Targets are where the world is pushing the avatar; currents are where
//! it actually is. Each tick the blender first lets impulse-like targets
//! bleed off (stress, felicity), recomputes the derived fear target, then
//! moves every current a fixed fraction of the way toward its target.

use crate::arbiter::compute_fear;
use thymos_core::{Channel, EngineConfig, StateVector};

#[derive(Debug, Clone)]
pub struct TemporalBlender {
    config: EngineConfig,
}

impl TemporalBlender {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// One full blending pass. Stress smooths before its target decays,
    /// so the current catches the full spike on the tick it lands.
    pub fn tick(&self, state: &mut StateVector) {
        // Felicity fades slowly, a mood rather than a jolt.
        let felicity = state.target(Channel::Felicity);
        if felicity > 0.0 {
            state.set_target(Channel::Felicity, felicity - self.config.felicity_decay);
        }
        self.refresh_fear_target(state);
        self.smooth(state);
    }

    /// Fear is derived, not written: recompute its target from the other
    /// targets so the smoothing below treats it like any sensor.
    fn refresh_fear_target(&self, state: &mut StateVector) {
        let fear = compute_fear(&state.target);
        state.set_target(Channel::Fear, fear);
    }

    fn smooth(&self, state: &mut StateVector) {
        for ch in Channel::SMOOTHED {
            state.approach(ch, self.config.sensor_window);
        }
        // Stress targets are impulses: smooth first so the current
        // catches the spike, then bleed the target off fast.
        state.approach(Channel::Stress, self.config.stress_window);
        let stress = state.target(Channel::Stress);
        if stress > 0.0 {
            state.set_target(Channel::Stress, stress - self.config.stress_target_decay);
        }
        state.approach(Channel::Morph, 1.0 / self.config.morph_smoothing);
    }
}
