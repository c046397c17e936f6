//! # Thymos Core
//!
//! Shared data model for the Thymos avatar: the continuous state vector,
//! the emotional palettes, the priority-ranked scenario catalog, and the
//! engine configuration. This crate holds data and pure evaluation only —
//! the tick loop, arbitration, and masking live in `thymos_engine`.

pub mod channel;
pub mod config;
pub mod palette;
pub mod scenario;

pub use channel::{Channel, ChannelBank, StateVector};
pub use config::{EngineConfig, MaskingConfig, SleepConfig, ThymosConfig, VisualConfig};
pub use palette::{lerp, lerp_palette, lerp_rgb, Background, Palette, Rgb};
pub use scenario::{
    Behavior, BreathFx, CoreFx, CoreRotation, Emotion, EvalCtx, GlowFx, Intensity, Jitter,
    MembraneFx, MembraneMotion, PulseFx, Scenario, ScenarioCatalog, Shake, SuppressTag, Trigger,
};
