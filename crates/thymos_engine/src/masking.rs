//! The social mask: what the avatar *shows* versus what it *feels*.
//!
//! When a social input channel dominates, the avatar overlays a displayed
//! emotion drawn from a fixed per-channel ladder, regardless of its
//! internal state. Holding the mask costs effort proportional to how far
//! the shown emotion sits from the felt one — even a mask identical to
//! the true feeling is still a mask being held.

use thymos_core::{Channel, ChannelBank, Emotion, MaskingConfig};

/// The four raw social signal channels, in dominance-check order.
/// Ties resolve to the earlier channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SocialInputs {
    pub joy: f32,
    pub sadness: f32,
    pub anger: f32,
    pub fear: f32,
}

impl SocialInputs {
    pub fn from_bank(bank: &ChannelBank) -> Self {
        Self {
            joy: bank.get(Channel::JoyInput),
            sadness: bank.get(Channel::SadnessInput),
            anger: bank.get(Channel::AngerInput),
            fear: bank.get(Channel::FearInput),
        }
    }

    /// Strongest channel and its magnitude (joy wins ties, then sadness,
    /// then anger, then fear).
    fn dominant(&self) -> (&'static [Emotion], f32) {
        let ladder: [(&'static [Emotion], f32); 4] = [
            (JOY_LADDER, self.joy),
            (SADNESS_LADDER, self.sadness),
            (ANGER_LADDER, self.anger),
            (FEAR_LADDER, self.fear),
        ];
        let mut best = ladder[0];
        for entry in &ladder[1..] {
            if entry.1 > best.1 {
                best = *entry;
            }
        }
        best
    }
}

/// Per-channel mask ladders, mildest expression first.
const JOY_LADDER: &[Emotion] = &[Emotion::Smile, Emotion::Laughter, Emotion::Excitement];
const SADNESS_LADDER: &[Emotion] = &[Emotion::Sadness, Emotion::Tears, Emotion::Melancholy];
const ANGER_LADDER: &[Emotion] = &[Emotion::Anger, Emotion::Rage];
const FEAR_LADDER: &[Emotion] = &[Emotion::Fear, Emotion::Terror];

/// What the masking pass decided for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskVerdict {
    pub displayed: Emotion,
    pub displayed_intensity: f32,
    pub is_masking: bool,
    pub effort: f32,
}

/// Stateless overlay; configuration only carries the thresholds.
#[derive(Debug, Clone, Default)]
pub struct MaskingModel {
    config: MaskingConfig,
}

impl MaskingModel {
    pub fn new(config: MaskingConfig) -> Self {
        Self { config }
    }

    pub fn compute(
        &self,
        internal: Emotion,
        internal_intensity: f32,
        inputs: &SocialInputs,
    ) -> MaskVerdict {
        let (ladder, magnitude) = inputs.dominant();

        if magnitude < self.config.threshold {
            return MaskVerdict {
                displayed: internal,
                displayed_intensity: internal_intensity,
                is_masking: false,
                effort: 0.0,
            };
        }

        // Tier indexing is count-independent: strongest input always maps
        // to the last rung, mid input to the middle one (which for the
        // two-rung ladders is also the last).
        let displayed = if magnitude > self.config.high_tier {
            ladder[ladder.len() - 1]
        } else if magnitude > self.config.mid_tier {
            ladder[1.min(ladder.len() - 1)]
        } else {
            ladder[0]
        };

        let distance = emotion_distance(internal, displayed);
        MaskVerdict {
            displayed,
            displayed_intensity: magnitude,
            is_masking: true,
            effort: distance * magnitude * internal_intensity,
        }
    }
}

/// Pairs that cost full effort to bridge.
const OPPOSITES: &[(Emotion, Emotion)] = &[
    (Emotion::Despair, Emotion::Euphoria),
    (Emotion::Despair, Emotion::Excitement),
    (Emotion::Despair, Emotion::Laughter),
    (Emotion::Depression, Emotion::Euphoria),
    (Emotion::Sadness, Emotion::Euphoria),
    (Emotion::Tears, Emotion::Laughter),
    (Emotion::Terror, Emotion::Euphoria),
    (Emotion::Fear, Emotion::Excitement),
    (Emotion::Anxiety, Emotion::Felicity),
    (Emotion::Anger, Emotion::Sadness),
    (Emotion::Rage, Emotion::Melancholy),
];

/// Near-neighbors that barely register as a mask.
const CLOSE_PAIRS: &[(Emotion, Emotion)] = &[
    (Emotion::Smile, Emotion::Laughter),
    (Emotion::Laughter, Emotion::Excitement),
    (Emotion::Sadness, Emotion::Melancholy),
    (Emotion::Sadness, Emotion::Tears),
    (Emotion::Tears, Emotion::Depression),
    (Emotion::Fear, Emotion::Terror),
    (Emotion::Fear, Emotion::Anxiety),
    (Emotion::Anxiety, Emotion::Despair),
    (Emotion::Anger, Emotion::Rage),
];

/// Symmetric distance between two emotions: 0 identical, 1.0 opposite,
/// 0.3 close, 0.6 otherwise.
pub fn emotion_distance(a: Emotion, b: Emotion) -> f32 {
    if a == b {
        return 0.0;
    }
    if OPPOSITES
        .iter()
        .any(|&(x, y)| (a == x && b == y) || (a == y && b == x))
    {
        return 1.0;
    }
    if CLOSE_PAIRS
        .iter()
        .any(|&(x, y)| (a == x && b == y) || (a == y && b == x))
    {
        return 0.3;
    }
    0.6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> MaskingModel {
        MaskingModel::default()
    }

    #[test]
    fn test_no_masking_below_threshold() {
        let inputs = SocialInputs {
            joy: 0.19,
            sadness: 0.1,
            ..Default::default()
        };
        let v = model().compute(Emotion::Sadness, 0.8, &inputs);
        assert_eq!(v.displayed, Emotion::Sadness);
        assert!((v.displayed_intensity - 0.8).abs() < 1e-6);
        assert!(!v.is_masking);
        assert_eq!(v.effort, 0.0);
    }

    #[test]
    fn test_tier_selection_joy() {
        let m = model();
        let low = SocialInputs {
            joy: 0.3,
            ..Default::default()
        };
        assert_eq!(m.compute(Emotion::Neutral, 0.0, &low).displayed, Emotion::Smile);

        let mid = SocialInputs {
            joy: 0.6,
            ..Default::default()
        };
        assert_eq!(
            m.compute(Emotion::Neutral, 0.0, &mid).displayed,
            Emotion::Laughter
        );

        let high = SocialInputs {
            joy: 0.9,
            ..Default::default()
        };
        assert_eq!(
            m.compute(Emotion::Neutral, 0.0, &high).displayed,
            Emotion::Excitement
        );
    }

    #[test]
    fn test_two_rung_ladders_saturate() {
        let m = model();
        // Anger's ladder has two rungs; mid and high both land on Rage.
        let mid = SocialInputs {
            anger: 0.6,
            ..Default::default()
        };
        assert_eq!(m.compute(Emotion::Neutral, 0.0, &mid).displayed, Emotion::Rage);
        let high = SocialInputs {
            anger: 0.95,
            ..Default::default()
        };
        assert_eq!(
            m.compute(Emotion::Neutral, 0.0, &high).displayed,
            Emotion::Rage
        );
        let low = SocialInputs {
            anger: 0.3,
            ..Default::default()
        };
        assert_eq!(
            m.compute(Emotion::Neutral, 0.0, &low).displayed,
            Emotion::Anger
        );
    }

    #[test]
    fn test_masking_even_when_mask_matches_feeling() {
        // Feeling smile, shown smile: effort is zero but the mask is
        // still actively held.
        let inputs = SocialInputs {
            joy: 0.3,
            ..Default::default()
        };
        let v = model().compute(Emotion::Smile, 0.5, &inputs);
        assert_eq!(v.displayed, Emotion::Smile);
        assert!(v.is_masking);
        assert_eq!(v.effort, 0.0);
    }

    #[test]
    fn test_effort_formula() {
        // Internal felicity 0.6, joy input 0.9 → displayed excitement.
        // felicity/excitement is neither opposite nor close → 0.6.
        let inputs = SocialInputs {
            joy: 0.9,
            ..Default::default()
        };
        let v = model().compute(Emotion::Felicity, 0.6, &inputs);
        assert_eq!(v.displayed, Emotion::Excitement);
        assert!(v.is_masking);
        assert!((v.effort - 0.6 * 0.9 * 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_effort_opposite_pair_costs_full_distance() {
        // Crying inside, forced to laugh: tears/laughter is an opposite
        // pair.
        let inputs = SocialInputs {
            joy: 0.7,
            ..Default::default()
        };
        let v = model().compute(Emotion::Tears, 1.0, &inputs);
        assert_eq!(v.displayed, Emotion::Laughter);
        assert!((v.effort - 1.0 * 0.7 * 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dominance_tie_resolves_in_channel_order() {
        let inputs = SocialInputs {
            joy: 0.6,
            sadness: 0.6,
            ..Default::default()
        };
        let v = model().compute(Emotion::Neutral, 0.0, &inputs);
        assert_eq!(v.displayed, Emotion::Laughter, "joy wins the tie");
    }

    #[test]
    fn test_distance_table() {
        assert_eq!(emotion_distance(Emotion::Fear, Emotion::Fear), 0.0);
        assert_eq!(emotion_distance(Emotion::Despair, Emotion::Euphoria), 1.0);
        assert_eq!(emotion_distance(Emotion::Euphoria, Emotion::Despair), 1.0);
        assert_eq!(emotion_distance(Emotion::Smile, Emotion::Laughter), 0.3);
        assert_eq!(emotion_distance(Emotion::Laughter, Emotion::Smile), 0.3);
        assert_eq!(emotion_distance(Emotion::Felicity, Emotion::Excitement), 0.6);
    }
}
