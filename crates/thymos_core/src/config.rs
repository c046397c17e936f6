//! Engine configuration, TOML-loadable with defaults for every field.

use crate::palette::Background;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThymosConfig {
    pub engine: EngineConfig,
    pub sleep: SleepConfig,
    pub masking: MaskingConfig,
    pub visual: VisualConfig,
}

impl ThymosConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let config: ThymosConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return
    /// defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks per second the engine is driven at.
    pub tick_rate: f32,
    /// Smoothing window (in ticks) for sensor and social channels.
    pub sensor_window: f32,
    /// Faster smoothing window for the stress channel.
    pub stress_window: f32,
    /// Stress targets bleed off by this much every tick — stress events
    /// are impulses, not levels.
    pub stress_target_decay: f32,
    /// Felicity target self-decay per tick while positive.
    pub felicity_decay: f32,
    /// Fixed smoothing factor for the morph-blend channel.
    pub morph_smoothing: f32,
    /// Per-tick increment of the emotion transition ramp.
    pub transition_step: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: 25.0,
            sensor_window: 10.0,
            stress_window: 3.0,
            stress_target_decay: 0.35,
            felicity_decay: 0.005,
            morph_smoothing: 0.05,
            transition_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SleepConfig {
    /// Seconds to go from awake to fully asleep.
    pub fall_asleep_secs: f64,
    /// Seconds to wake back up (shorter — waking is abrupt).
    pub wake_secs: f64,
    /// Minimum sleep transition before dreams or nightmares may start.
    pub deep_threshold: f64,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            fall_asleep_secs: 2.0,
            wake_secs: 1.0,
            deep_threshold: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// Below this dominant social input, no mask is worn at all.
    pub threshold: f32,
    /// Dominant input above this picks the middle mask tier.
    pub mid_tier: f32,
    /// Dominant input above this picks the strongest mask tier.
    pub high_tier: f32,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            mid_tier: 0.5,
            high_tier: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Fraction of scale lost at full stress.
    pub stress_retraction: f32,
    /// Breath cycle period in seconds.
    pub breath_period: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub background: Background,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            stress_retraction: 0.75,
            breath_period: 4.0,
            scale_min: 1.0,
            scale_max: 1.32,
            background: Background::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
