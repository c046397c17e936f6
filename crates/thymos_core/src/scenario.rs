//! The scenario catalog: a priority-ranked table of emotional rules.
//!
//! Each scenario pairs a trigger condition tree and an intensity
//! expression with a priority, a palette pair, and a declarative set of
//! visual modifiers. Triggers and intensities are plain data evaluated by
//! a fixed dispatch — no closures in the table, so the catalog can be
//! inspected, serialized, and tested as values.

use crate::channel::{Channel, ChannelBank};
use crate::palette::{self, Palette};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Emotion identity
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Neutral,
    Sleep,
    Pain,
    Despair,
    Terror,
    Rage,
    Euphoria,
    Excitement,
    Tears,
    Fear,
    Anger,
    Laughter,
    Felicity,
    Smile,
    Anxiety,
    Sadness,
    Melancholy,
    Depression,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Emotion::Neutral => "neutral",
            Emotion::Sleep => "sleep",
            Emotion::Pain => "pain",
            Emotion::Despair => "despair",
            Emotion::Terror => "terror",
            Emotion::Rage => "rage",
            Emotion::Euphoria => "euphoria",
            Emotion::Excitement => "excitement",
            Emotion::Tears => "tears",
            Emotion::Fear => "fear",
            Emotion::Anger => "anger",
            Emotion::Laughter => "laughter",
            Emotion::Felicity => "felicity",
            Emotion::Smile => "smile",
            Emotion::Anxiety => "anxiety",
            Emotion::Sadness => "sadness",
            Emotion::Melancholy => "melancholy",
            Emotion::Depression => "depression",
        };
        f.write_str(name)
    }
}

/// Render-side concerns a dominant scenario can veto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressTag {
    Felicity,
    Fear,
    Breath,
    Rotation,
    Stress,
    Expansion,
}

// ============================================================================
// Trigger and intensity expressions
// ============================================================================

/// Evaluation context: the smoothed channel values plus the sleep
/// sub-state, which scenarios may reference but not mutate.
#[derive(Debug, Clone, Copy)]
pub struct EvalCtx<'a> {
    pub channels: &'a ChannelBank,
    /// True whenever the sleep transition is above zero, so the sleep
    /// scenario holds all the way through falling asleep and waking.
    pub sleep_active: bool,
    /// Sleep transition progress in [0, 1].
    pub sleep_depth: f32,
}

/// Condition tree over the state vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Trigger {
    /// `value > threshold`
    Above(Channel, f32),
    /// `value < threshold`
    Below(Channel, f32),
    /// `lo < value <= hi`
    Within(Channel, f32, f32),
    /// `lo < value < hi`
    WithinOpen(Channel, f32, f32),
    Asleep,
    All(Vec<Trigger>),
    Any(Vec<Trigger>),
}

impl Trigger {
    pub fn eval(&self, ctx: &EvalCtx<'_>) -> bool {
        match self {
            Trigger::Above(ch, k) => ctx.channels.get(*ch) > *k,
            Trigger::Below(ch, k) => ctx.channels.get(*ch) < *k,
            Trigger::Within(ch, lo, hi) => {
                let v = ctx.channels.get(*ch);
                v > *lo && v <= *hi
            }
            Trigger::WithinOpen(ch, lo, hi) => {
                let v = ctx.channels.get(*ch);
                v > *lo && v < *hi
            }
            Trigger::Asleep => ctx.sleep_active,
            Trigger::All(parts) => parts.iter().all(|t| t.eval(ctx)),
            Trigger::Any(parts) => parts.iter().any(|t| t.eval(ctx)),
        }
    }
}

/// Intensity expression, evaluated against the same context and then
/// clamped to [0, 1] by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intensity {
    Chan(Channel),
    /// `1 - value`
    Complement(Channel),
    /// `max(0, value - offset)`
    ExcessOver(Channel, f32),
    Mul(Box<Intensity>, Box<Intensity>),
    Max(Vec<Intensity>),
    Min(Vec<Intensity>),
    SleepDepth,
}

impl Intensity {
    pub fn eval(&self, ctx: &EvalCtx<'_>) -> f32 {
        match self {
            Intensity::Chan(ch) => ctx.channels.get(*ch),
            Intensity::Complement(ch) => 1.0 - ctx.channels.get(*ch),
            Intensity::ExcessOver(ch, k) => (ctx.channels.get(*ch) - *k).max(0.0),
            Intensity::Mul(a, b) => a.eval(ctx) * b.eval(ctx),
            Intensity::Max(parts) => parts
                .iter()
                .map(|e| e.eval(ctx))
                .fold(f32::NEG_INFINITY, f32::max),
            Intensity::Min(parts) => parts
                .iter()
                .map(|e| e.eval(ctx))
                .fold(f32::INFINITY, f32::min),
            Intensity::SleepDepth => ctx.sleep_depth,
        }
    }
}

// ============================================================================
// Visual modifier sets
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jitter {
    pub amplitude: f32,
    pub frequency: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shake {
    pub amplitude: f32,
    pub frequency: f32,
}

/// How a scenario reshapes the membrane's overall motion speed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembraneMotion {
    #[default]
    Keep,
    Slow(f32),
    Multiplier(f32),
    Freeze,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathFx {
    #[default]
    Normal,
    /// Breath pinned near this floor value.
    Minimal(f32),
    /// Breath amplitude wobbles by this factor.
    Irregular(f32),
}

/// Declarative membrane modifiers. All scalar fields blend through
/// `lerp(baseline, value, intensity * transition)` in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MembraneFx {
    pub motion: MembraneMotion,
    pub jitter: Option<Jitter>,
    pub shake: Option<Shake>,
    pub breath: BreathFx,
    pub expansion_boost: f32,
    pub collapse: f32,
    pub compression: Option<f32>,
    pub heaviness: f32,
    pub gravity_pull: f32,
    pub desaturation: f32,
    pub opacity_loss: f32,
    pub particle_death: f32,
    pub softness: Option<f32>,
    pub warmth: Option<f32>,
    pub saturation: Option<f32>,
    pub mist: bool,
    pub streaks: bool,
    pub burst: bool,
}

/// How a scenario reshapes the core's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreRotation {
    #[default]
    Keep,
    Stop,
    Multiplier(f32),
    Factor(f32),
    Slow(f32),
    Erratic,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulseFx {
    #[default]
    None,
    /// Sinusoidal pulse at this frequency.
    Frequency(f32),
    /// Gentle low-amplitude pulse.
    Soft(f32),
    /// Rectified rhythm (laughter).
    Rhythm(f32),
    /// Sharpened sob envelope (tears).
    Sob(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlowFx {
    #[default]
    None,
    Boost(f32),
    Gentle(f32),
    Soft(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoreFx {
    pub rotation: CoreRotation,
    pub compression: Option<f32>,
    pub pulse: PulseFx,
    pub glow: GlowFx,
    pub dimming: f32,
    pub gray_wash: f32,
    pub flicker: bool,
    pub brightness_variation: Option<f32>,
    pub void_center: bool,
}

/// Generic scenarios carry declarative modifiers; legacy scenarios keep
/// their hand-authored render behavior and skip generic blending entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Generic { membrane: MembraneFx, core: CoreFx },
    Legacy,
}

// ============================================================================
// Scenario
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub emotion: Emotion,
    pub trigger: Trigger,
    pub intensity: Intensity,
    pub priority: u32,
    pub suppresses: Vec<SuppressTag>,
    pub palette_membrane: Palette,
    pub palette_core: Palette,
    pub behavior: Behavior,
}

impl Scenario {
    pub fn suppresses(&self, tag: SuppressTag) -> bool {
        self.suppresses.contains(&tag)
    }

    /// The declarative modifier sets, or `None` for legacy scenarios.
    pub fn generic_fx(&self) -> Option<(&MembraneFx, &CoreFx)> {
        match &self.behavior {
            Behavior::Generic { membrane, core } => Some((membrane, core)),
            Behavior::Legacy => None,
        }
    }
}

/// The fixed, priority-sorted rule set.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    // Sorted by priority descending; selection walks front to back.
    scenarios: Vec<Scenario>,
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScenarioCatalog {
    /// Build the standard catalog. Priorities are pairwise distinct so
    /// selection can never tie.
    pub fn standard() -> Self {
        let mut scenarios = standard_scenarios();
        scenarios.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { scenarios }
    }

    /// Scenarios in descending priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn get(&self, emotion: Emotion) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.emotion == emotion)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

fn standard_scenarios() -> Vec<Scenario> {
    use Channel::*;
    use Intensity as I;
    use Trigger as T;

    let chan = |c| I::Chan(c);
    let mul = |a, b| I::Mul(Box::new(a), Box::new(b));

    vec![
        Scenario {
            emotion: Emotion::Sleep,
            trigger: T::Asleep,
            intensity: I::SleepDepth,
            priority: 105,
            suppresses: vec![],
            palette_membrane: palette::PAL_SLEEP_MEM,
            palette_core: palette::PAL_SLEEP_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    motion: MembraneMotion::Slow(0.3),
                    compression: Some(0.85),
                    desaturation: 0.3,
                    breath: BreathFx::Minimal(0.1),
                    ..Default::default()
                },
                core: CoreFx {
                    dimming: 0.4,
                    rotation: CoreRotation::Slow(0.2),
                    compression: Some(0.9),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Pain,
            trigger: T::Above(Stress, 0.7),
            intensity: chan(Stress),
            priority: 100,
            suppresses: vec![
                SuppressTag::Felicity,
                SuppressTag::Fear,
                SuppressTag::Breath,
                SuppressTag::Rotation,
            ],
            palette_membrane: palette::PAL_PAIN_MEM,
            palette_core: palette::PAL_PAIN_CORE,
            behavior: Behavior::Legacy,
        },
        Scenario {
            emotion: Emotion::Despair,
            trigger: T::All(vec![
                T::Below(Energy, 0.15),
                T::Above(Fear, 0.5),
                T::Below(JoyInput, 0.3),
                T::Below(SadnessInput, 0.3),
                T::Below(AngerInput, 0.3),
            ]),
            intensity: mul(chan(Fear), I::Complement(Energy)),
            priority: 97,
            suppresses: vec![
                SuppressTag::Felicity,
                SuppressTag::Rotation,
                SuppressTag::Breath,
                SuppressTag::Stress,
            ],
            palette_membrane: palette::PAL_DESPAIR_MEM,
            palette_core: palette::PAL_DESPAIR_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    collapse: 0.7,
                    motion: MembraneMotion::Freeze,
                    particle_death: 0.8,
                    opacity_loss: 0.7,
                    ..Default::default()
                },
                core: CoreFx {
                    void_center: true,
                    rotation: CoreRotation::Stop,
                    dimming: 0.95,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Terror,
            trigger: T::Any(vec![
                T::Above(FearInput, 0.8),
                T::All(vec![T::Above(Fear, 0.85), T::Above(Stress, 0.4)]),
            ]),
            intensity: I::Max(vec![chan(FearInput), chan(Fear)]),
            priority: 96,
            suppresses: vec![
                SuppressTag::Felicity,
                SuppressTag::Rotation,
                SuppressTag::Breath,
            ],
            palette_membrane: palette::PAL_TERROR_MEM,
            palette_core: palette::PAL_TERROR_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    motion: MembraneMotion::Freeze,
                    jitter: Some(Jitter {
                        amplitude: 0.15,
                        frequency: 35.0,
                    }),
                    collapse: 0.5,
                    ..Default::default()
                },
                core: CoreFx {
                    rotation: CoreRotation::Stop,
                    dimming: 0.3,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Rage,
            trigger: T::Any(vec![
                T::Above(AngerInput, 0.7),
                T::All(vec![T::Above(AngerInput, 0.5), T::Above(Energy, 0.7)]),
            ]),
            intensity: chan(AngerInput),
            priority: 95,
            suppresses: vec![SuppressTag::Felicity, SuppressTag::Fear],
            palette_membrane: palette::PAL_RAGE_MEM,
            palette_core: palette::PAL_RAGE_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    jitter: Some(Jitter {
                        amplitude: 0.12,
                        frequency: 40.0,
                    }),
                    expansion_boost: 0.3,
                    ..Default::default()
                },
                core: CoreFx {
                    rotation: CoreRotation::Erratic,
                    flicker: true,
                    pulse: PulseFx::Frequency(12.0),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Euphoria,
            trigger: T::All(vec![
                T::Above(Felicity, 0.8),
                T::Above(Energy, 0.9),
                T::Below(JoyInput, 0.3),
            ]),
            intensity: I::Min(vec![chan(Felicity), chan(Energy)]),
            priority: 92,
            suppresses: vec![SuppressTag::Fear, SuppressTag::Stress],
            palette_membrane: palette::PAL_EUPHORIA_MEM,
            palette_core: palette::PAL_EUPHORIA_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    expansion_boost: 0.5,
                    burst: true,
                    motion: MembraneMotion::Multiplier(3.0),
                    saturation: Some(3.0),
                    ..Default::default()
                },
                core: CoreFx {
                    pulse: PulseFx::Frequency(10.0),
                    glow: GlowFx::Boost(2.5),
                    rotation: CoreRotation::Multiplier(3.5),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Excitement,
            trigger: T::Any(vec![
                T::Above(JoyInput, 0.8),
                T::All(vec![
                    T::Above(Felicity, 0.75),
                    T::Above(Energy, 0.85),
                    T::Above(Speed, 1.2),
                ]),
            ]),
            intensity: I::Max(vec![chan(JoyInput), mul(chan(Felicity), chan(Energy))]),
            priority: 91,
            suppresses: vec![SuppressTag::Fear, SuppressTag::Stress],
            palette_membrane: palette::PAL_EXCITEMENT_MEM,
            palette_core: palette::PAL_EXCITEMENT_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    burst: true,
                    jitter: Some(Jitter {
                        amplitude: 0.08,
                        frequency: 30.0,
                    }),
                    motion: MembraneMotion::Multiplier(2.8),
                    ..Default::default()
                },
                core: CoreFx {
                    pulse: PulseFx::Frequency(15.0),
                    glow: GlowFx::Boost(2.2),
                    rotation: CoreRotation::Erratic,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Tears,
            trigger: T::Any(vec![
                T::All(vec![
                    T::Below(Energy, 0.25),
                    T::WithinOpen(Stress, 0.3, 0.6),
                    T::Below(SadnessInput, 0.3),
                ]),
                T::Above(SadnessInput, 0.7),
            ]),
            intensity: I::Max(vec![
                mul(chan(Stress), I::Complement(Energy)),
                chan(SadnessInput),
            ]),
            priority: 88,
            suppresses: vec![SuppressTag::Felicity],
            palette_membrane: palette::PAL_TEARS_MEM,
            palette_core: palette::PAL_TEARS_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    streaks: true,
                    gravity_pull: 0.5,
                    ..Default::default()
                },
                core: CoreFx {
                    pulse: PulseFx::Sob(2.5),
                    compression: Some(0.85),
                    dimming: 0.6,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Fear,
            trigger: T::Any(vec![
                T::All(vec![
                    T::WithinOpen(Fear, 0.6, 0.85),
                    T::Below(Stress, 0.7),
                    T::Below(FearInput, 0.3),
                ]),
                T::Within(FearInput, 0.3, 0.8),
            ]),
            intensity: I::Max(vec![chan(Fear), chan(FearInput)]),
            priority: 85,
            suppresses: vec![SuppressTag::Felicity, SuppressTag::Expansion],
            palette_membrane: palette::PAL_FEAR_MEM,
            palette_core: palette::PAL_FEAR_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    collapse: 0.4,
                    jitter: Some(Jitter {
                        amplitude: 0.05,
                        frequency: 20.0,
                    }),
                    ..Default::default()
                },
                core: CoreFx {
                    dimming: 0.7,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Anger,
            trigger: T::Within(AngerInput, 0.2, 0.7),
            intensity: chan(AngerInput),
            priority: 82,
            suppresses: vec![SuppressTag::Felicity],
            palette_membrane: palette::PAL_ANGER_MEM,
            palette_core: palette::PAL_ANGER_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    jitter: Some(Jitter {
                        amplitude: 0.07,
                        frequency: 28.0,
                    }),
                    ..Default::default()
                },
                core: CoreFx {
                    rotation: CoreRotation::Erratic,
                    flicker: true,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Laughter,
            trigger: T::Any(vec![
                T::All(vec![
                    T::Above(Felicity, 0.7),
                    T::Above(Energy, 0.7),
                    T::Below(Stress, 0.2),
                    T::Below(JoyInput, 0.3),
                ]),
                T::Within(JoyInput, 0.5, 0.8),
            ]),
            intensity: I::Max(vec![mul(chan(Felicity), chan(Energy)), chan(JoyInput)]),
            priority: 78,
            suppresses: vec![SuppressTag::Fear, SuppressTag::Stress],
            palette_membrane: palette::PAL_LAUGHTER_MEM,
            palette_core: palette::PAL_LAUGHTER_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    shake: Some(Shake {
                        amplitude: 0.1,
                        frequency: 7.0,
                    }),
                    ..Default::default()
                },
                core: CoreFx {
                    pulse: PulseFx::Rhythm(7.0),
                    brightness_variation: Some(1.8),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Felicity,
            trigger: T::All(vec![
                T::Above(Felicity, 0.5),
                T::Below(Fear, 0.3),
                T::Below(Stress, 0.5),
                T::Below(JoyInput, 0.3),
            ]),
            intensity: chan(Felicity),
            priority: 75,
            suppresses: vec![SuppressTag::Fear],
            palette_membrane: palette::PAL_FELICITY_MEM,
            palette_core: palette::PAL_FELICITY_CORE,
            behavior: Behavior::Legacy,
        },
        Scenario {
            emotion: Emotion::Smile,
            trigger: T::Any(vec![
                T::All(vec![
                    T::WithinOpen(Felicity, 0.3, 0.8),
                    T::Above(Energy, 0.6),
                    T::Below(Stress, 0.3),
                    T::Below(JoyInput, 0.3),
                ]),
                T::Within(JoyInput, 0.2, 0.5),
            ]),
            intensity: I::Max(vec![mul(chan(Felicity), chan(Energy)), chan(JoyInput)]),
            priority: 70,
            suppresses: vec![SuppressTag::Fear],
            palette_membrane: palette::PAL_SMILE_MEM,
            palette_core: palette::PAL_SMILE_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    warmth: Some(1.5),
                    expansion_boost: 0.2,
                    ..Default::default()
                },
                core: CoreFx {
                    glow: GlowFx::Gentle(1.6),
                    pulse: PulseFx::Soft(2.0),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Anxiety,
            trigger: T::All(vec![
                T::WithinOpen(Fear, 0.4, 0.6),
                T::Any(vec![
                    T::Above(Pressure, 1.2),
                    T::Above(Noise, 0.6),
                    T::Above(Cpu, 0.7),
                ]),
                T::Below(FearInput, 0.3),
            ]),
            intensity: mul(
                chan(Fear),
                I::Max(vec![I::ExcessOver(Pressure, 1.0), chan(Noise), chan(Cpu)]),
            ),
            priority: 65,
            suppresses: vec![],
            palette_membrane: palette::PAL_ANXIETY_MEM,
            palette_core: palette::PAL_ANXIETY_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    jitter: Some(Jitter {
                        amplitude: 0.04,
                        frequency: 18.0,
                    }),
                    breath: BreathFx::Irregular(0.7),
                    ..Default::default()
                },
                core: CoreFx {
                    flicker: true,
                    rotation: CoreRotation::Erratic,
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Sadness,
            trigger: T::Any(vec![
                T::All(vec![
                    T::Below(Energy, 0.3),
                    T::Below(Fear, 0.4),
                    T::Below(Stress, 0.3),
                    T::Below(Felicity, 0.2),
                    T::Below(SadnessInput, 0.3),
                ]),
                T::Within(SadnessInput, 0.2, 0.7),
            ]),
            intensity: I::Max(vec![I::Complement(Energy), chan(SadnessInput)]),
            priority: 60,
            suppresses: vec![SuppressTag::Felicity],
            palette_membrane: palette::PAL_SADNESS_MEM,
            palette_core: palette::PAL_SADNESS_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    gravity_pull: 0.4,
                    motion: MembraneMotion::Slow(0.6),
                    desaturation: 0.4,
                    compression: Some(0.8),
                    ..Default::default()
                },
                core: CoreFx {
                    dimming: 0.5,
                    rotation: CoreRotation::Slow(0.5),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Melancholy,
            trigger: T::All(vec![
                T::Below(Energy, 0.5),
                T::Below(Fear, 0.3),
                T::Above(Humidity, 0.6),
                T::Below(Felicity, 0.3),
                T::Below(SadnessInput, 0.3),
            ]),
            intensity: mul(I::Complement(Energy), chan(Humidity)),
            priority: 55,
            suppresses: vec![],
            palette_membrane: palette::PAL_MELANCHOLY_MEM,
            palette_core: palette::PAL_MELANCHOLY_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    mist: true,
                    softness: Some(2.0),
                    ..Default::default()
                },
                core: CoreFx {
                    glow: GlowFx::Soft(0.7),
                    ..Default::default()
                },
            },
        },
        Scenario {
            emotion: Emotion::Depression,
            trigger: T::All(vec![
                T::Below(Energy, 0.2),
                T::Below(Fear, 0.4),
                T::Below(Stress, 0.2),
                T::Below(Felicity, 0.1),
                T::Below(Light, 0.3),
                T::Below(SadnessInput, 0.3),
            ]),
            intensity: mul(I::Complement(Energy), I::Complement(Light)),
            priority: 50,
            suppresses: vec![SuppressTag::Felicity, SuppressTag::Breath],
            palette_membrane: palette::PAL_DEPRESSION_MEM,
            palette_core: palette::PAL_DEPRESSION_CORE,
            behavior: Behavior::Generic {
                membrane: MembraneFx {
                    motion: MembraneMotion::Freeze,
                    opacity_loss: 0.6,
                    breath: BreathFx::Minimal(0.15),
                    heaviness: 0.95,
                    ..Default::default()
                },
                core: CoreFx {
                    rotation: CoreRotation::Factor(0.08),
                    gray_wash: 0.85,
                    dimming: 0.85,
                    ..Default::default()
                },
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ctx(bank: &ChannelBank) -> EvalCtx<'_> {
        EvalCtx {
            channels: bank,
            sleep_active: false,
            sleep_depth: 0.0,
        }
    }

    #[test]
    fn test_priorities_pairwise_distinct() {
        let catalog = ScenarioCatalog::standard();
        let priorities: HashSet<u32> = catalog.iter().map(|s| s.priority).collect();
        assert_eq!(priorities.len(), catalog.len());
    }

    #[test]
    fn test_catalog_sorted_by_priority_desc() {
        let catalog = ScenarioCatalog::standard();
        let priorities: Vec<u32> = catalog.iter().map(|s| s.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
        assert_eq!(priorities[0], 105);
        assert_eq!(*priorities.last().unwrap(), 50);
    }

    #[test]
    fn test_catalog_has_all_emotions() {
        let catalog = ScenarioCatalog::standard();
        assert_eq!(catalog.len(), 17);
        assert!(catalog.get(Emotion::Pain).is_some());
        assert!(catalog.get(Emotion::Depression).is_some());
        assert!(catalog.get(Emotion::Neutral).is_none());
    }

    #[test]
    fn test_legacy_scenarios_have_no_generic_fx() {
        let catalog = ScenarioCatalog::standard();
        assert!(catalog.get(Emotion::Pain).unwrap().generic_fx().is_none());
        assert!(catalog
            .get(Emotion::Felicity)
            .unwrap()
            .generic_fx()
            .is_none());
        assert!(catalog.get(Emotion::Terror).unwrap().generic_fx().is_some());
    }

    #[test]
    fn test_trigger_within_bounds_semantics() {
        let mut bank = ChannelBank::default();
        let t = Trigger::Within(Channel::AngerInput, 0.2, 0.7);

        bank.set(Channel::AngerInput, 0.2);
        assert!(!t.eval(&ctx(&bank)), "lower bound is exclusive");
        bank.set(Channel::AngerInput, 0.7);
        assert!(t.eval(&ctx(&bank)), "upper bound is inclusive");
        bank.set(Channel::AngerInput, 0.71);
        assert!(!t.eval(&ctx(&bank)));
    }

    #[test]
    fn test_trigger_pain_fires_above_threshold() {
        let catalog = ScenarioCatalog::standard();
        let pain = catalog.get(Emotion::Pain).unwrap();
        let mut bank = ChannelBank::default();

        bank.set(Channel::Stress, 0.9);
        assert!(pain.trigger.eval(&ctx(&bank)));
        assert!((pain.intensity.eval(&ctx(&bank)) - 0.9).abs() < 1e-6);

        bank.set(Channel::Stress, 0.5);
        assert!(!pain.trigger.eval(&ctx(&bank)));
    }

    #[test]
    fn test_intensity_anxiety_expression() {
        let catalog = ScenarioCatalog::standard();
        let anxiety = catalog.get(Emotion::Anxiety).unwrap();
        let mut bank = ChannelBank::default();
        bank.set(Channel::Fear, 0.5);
        bank.set(Channel::Pressure, 1.4);
        bank.set(Channel::Noise, 0.1);
        bank.set(Channel::Cpu, 0.2);

        // fear * max(pressure - 1.0, noise, cpu) = 0.5 * 0.4
        let v = anxiety.intensity.eval(&ctx(&bank));
        assert!((v - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_sleep_trigger_tracks_context() {
        let catalog = ScenarioCatalog::standard();
        let sleep = catalog.get(Emotion::Sleep).unwrap();
        let bank = ChannelBank::default();

        let awake = EvalCtx {
            channels: &bank,
            sleep_active: false,
            sleep_depth: 0.0,
        };
        assert!(!sleep.trigger.eval(&awake));

        let dozing = EvalCtx {
            channels: &bank,
            sleep_active: true,
            sleep_depth: 0.4,
        };
        assert!(sleep.trigger.eval(&dozing));
        assert!((sleep.intensity.eval(&dozing) - 0.4).abs() < 1e-6);
    }
}
