//! Fear derivation and priority-based scenario selection.
//!
//! Fear is the one channel the avatar computes rather than receives: a
//! weighted sum of technical load, low energy, and environmental pressure,
//! offset by felicity. Selection is a linear rule engine — first trigger
//! match by descending priority wins, no blending.

use thymos_core::{Channel, ChannelBank, Emotion, EvalCtx, ScenarioCatalog, SuppressTag};

/// Minimum intensity a triggered scenario must produce to be selected.
/// A rule that fires at near-zero intensity yields to lower priorities.
const INTENSITY_FLOOR: f32 = 0.05;

/// Derive felt fear from the *target* values (fear reacts to where the
/// organism is heading, then gets smoothed like any other sensor).
pub fn compute_fear(targets: &ChannelBank) -> f32 {
    let tech_stress = targets.get(Channel::Cpu) * 0.4 + targets.get(Channel::Ram) * 0.3;
    let existential_void = (1.0 - targets.get(Channel::Energy)) * 0.6;
    let env_stress = (targets.get(Channel::Pressure) - 1.1).max(0.0) * 0.4
        + (targets.get(Channel::Humidity) - 0.7).max(0.0) * 0.3
        + targets.get(Channel::Noise) * 0.2;

    let raw = (tech_stress + existential_void + env_stress).clamp(0.0, 1.0);
    let calculated = (raw - targets.get(Channel::Felicity) * 0.8).clamp(0.0, 1.0);

    // An explicit external fear signal can only raise felt fear, never
    // calm it.
    let fear_input = targets.get(Channel::FearInput);
    if fear_input > 0.1 {
        calculated.max(fear_input)
    } else {
        calculated
    }
}

/// Outcome of one arbitration pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub emotion: Emotion,
    pub intensity: f32,
}

impl Selection {
    pub fn neutral() -> Self {
        Self {
            emotion: Emotion::Neutral,
            intensity: 0.0,
        }
    }
}

/// Walk the catalog by descending priority; the first scenario whose
/// trigger holds *and* whose intensity clears the floor wins. A triggered
/// rule below the floor is skipped, not a dead end.
pub fn select(catalog: &ScenarioCatalog, ctx: &EvalCtx<'_>) -> Selection {
    for scenario in catalog.iter() {
        if scenario.trigger.eval(ctx) {
            let intensity = scenario.intensity.eval(ctx).clamp(0.0, 1.0);
            if intensity > INTENSITY_FLOOR {
                return Selection {
                    emotion: scenario.emotion,
                    intensity,
                };
            }
        }
    }
    Selection::neutral()
}

/// Whether the given (displayed) emotion vetoes a render concern.
pub fn suppresses(catalog: &ScenarioCatalog, emotion: Emotion, tag: SuppressTag) -> bool {
    if emotion == Emotion::Neutral {
        return false;
    }
    catalog
        .get(emotion)
        .map(|s| s.suppresses(tag))
        .unwrap_or(false)
}
