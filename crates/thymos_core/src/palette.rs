//! Emotional color palettes and blending helpers.
//!
//! Colors are linear RGB triples; values above 1.0 are deliberate (the
//! render shell uses additive blending, so hot palettes overdrive).

use serde::{Deserialize, Serialize};

pub type Rgb = [f32; 3];

/// A three-stop gradient the renderer cycles through.
pub type Palette = [Rgb; 3];

pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a * (1.0 - f) + b * f
}

pub fn lerp_rgb(a: Rgb, b: Rgb, f: f32) -> Rgb {
    [
        lerp(a[0], b[0], f),
        lerp(a[1], b[1], f),
        lerp(a[2], b[2], f),
    ]
}

pub fn lerp_palette(a: &Palette, b: &Palette, f: f32) -> Palette {
    [
        lerp_rgb(a[0], b[0], f),
        lerp_rgb(a[1], b[1], f),
        lerp_rgb(a[2], b[2], f),
    ]
}

// ============================================================================
// Base morph pair (A = cool violet, B = amber) and temperature extremes
// ============================================================================

pub const MEMBRANE_A: Palette = [[0.0, 0.4, 1.0], [0.5, 0.2, 0.8], [0.3, 0.0, 0.7]];
pub const CORE_A: Palette = [[0.8, 0.1, 0.6], [0.5, 0.0, 0.5], [0.4, 0.1, 0.8]];
pub const MEMBRANE_B: Palette = [[1.2, 0.8, 0.0], [1.5, 1.2, 0.2], [1.8, 0.6, 0.0]];
pub const CORE_B: Palette = [[1.3, 0.1, 0.1], [1.0, 0.3, 0.0], [0.8, 0.4, 0.0]];

pub const MEMBRANE_GLACIER: Palette = [[0.6, 1.2, 3.5], [0.4, 1.0, 3.0], [0.3, 0.8, 2.5]];
pub const CORE_GLACIER: Palette = [[0.4, 1.0, 3.0], [0.3, 0.8, 2.5], [0.2, 0.6, 2.0]];
pub const MEMBRANE_LAVA: Palette = [[4.0, 0.4, 0.0], [3.5, 0.3, 0.0], [3.0, 0.2, 0.0]];
pub const CORE_LAVA: Palette = [[4.5, 0.3, 0.1], [4.0, 0.2, 0.0], [3.5, 0.1, 0.0]];

// ============================================================================
// Per-scenario palettes
// ============================================================================

pub const PAL_SMILE_MEM: Palette = [[2.5, 2.0, 0.9], [2.2, 1.8, 0.7], [1.9, 1.5, 0.5]];
pub const PAL_SMILE_CORE: Palette = [[2.8, 2.2, 1.0], [2.5, 1.9, 0.8], [2.2, 1.6, 0.6]];
pub const PAL_LAUGHTER_MEM: Palette = [[3.2, 2.4, 0.8], [2.8, 2.0, 0.6], [2.4, 1.7, 0.9]];
pub const PAL_LAUGHTER_CORE: Palette = [[3.5, 2.6, 0.9], [3.0, 2.2, 0.7], [2.6, 1.8, 1.0]];
pub const PAL_EUPHORIA_MEM: Palette = [[3.5, 1.8, 3.0], [3.0, 2.0, 2.5], [2.5, 1.5, 2.0]];
pub const PAL_EUPHORIA_CORE: Palette = [[4.0, 2.0, 3.5], [3.5, 2.2, 3.0], [3.0, 1.8, 2.5]];
pub const PAL_FELICITY_MEM: Palette = [[3.5, 2.5, 1.0], [3.0, 2.2, 0.7], [2.5, 1.8, 0.4]];
pub const PAL_FELICITY_CORE: Palette = [[4.0, 2.8, 1.2], [3.5, 2.5, 0.9], [3.0, 2.0, 0.6]];
pub const PAL_EXCITEMENT_MEM: Palette = [[3.0, 2.5, 2.5], [2.5, 2.0, 2.0], [2.0, 1.8, 1.8]];
pub const PAL_EXCITEMENT_CORE: Palette = [[3.5, 3.0, 3.0], [3.0, 2.5, 2.5], [2.5, 2.0, 2.0]];

pub const PAL_SADNESS_MEM: Palette = [[0.4, 0.6, 1.8], [0.3, 0.5, 1.5], [0.2, 0.4, 1.2]];
pub const PAL_SADNESS_CORE: Palette = [[0.3, 0.5, 1.5], [0.2, 0.4, 1.2], [0.15, 0.3, 1.0]];
pub const PAL_TEARS_MEM: Palette = [[0.5, 0.9, 2.5], [0.4, 0.7, 2.2], [0.3, 0.6, 1.9]];
pub const PAL_TEARS_CORE: Palette = [[0.4, 0.7, 2.2], [0.3, 0.6, 1.9], [0.2, 0.5, 1.6]];
pub const PAL_MELANCHOLY_MEM: Palette = [[0.7, 0.6, 1.8], [0.6, 0.5, 1.5], [0.5, 0.4, 1.2]];
pub const PAL_MELANCHOLY_CORE: Palette = [[0.6, 0.5, 1.6], [0.5, 0.4, 1.3], [0.4, 0.3, 1.0]];
pub const PAL_DEPRESSION_MEM: Palette = [[0.3, 0.3, 0.5], [0.2, 0.2, 0.4], [0.15, 0.15, 0.3]];
pub const PAL_DEPRESSION_CORE: Palette = [[0.2, 0.2, 0.4], [0.15, 0.15, 0.3], [0.1, 0.1, 0.25]];

pub const PAL_TERROR_MEM: Palette = [[4.0, 4.0, 4.5], [3.5, 3.5, 4.0], [3.0, 3.0, 3.5]];
pub const PAL_TERROR_CORE: Palette = [[4.5, 4.5, 5.0], [4.0, 4.0, 4.5], [3.5, 3.5, 4.0]];
pub const PAL_FEAR_MEM: Palette = [[0.2, 0.2, 0.6], [0.15, 0.15, 0.5], [0.3, 0.3, 0.8]];
pub const PAL_FEAR_CORE: Palette = [[0.25, 0.2, 0.5], [0.15, 0.1, 0.4], [0.1, 0.05, 0.3]];
pub const PAL_ANXIETY_MEM: Palette = [[0.6, 1.0, 0.6], [0.5, 0.8, 0.5], [0.4, 0.6, 0.4]];
pub const PAL_ANXIETY_CORE: Palette = [[0.5, 0.8, 0.5], [0.4, 0.6, 0.4], [0.3, 0.5, 0.3]];
pub const PAL_DESPAIR_MEM: Palette = [[0.2, 0.1, 0.2], [0.15, 0.05, 0.15], [0.1, 0.02, 0.1]];
pub const PAL_DESPAIR_CORE: Palette = [[0.15, 0.05, 0.15], [0.1, 0.02, 0.1], [0.08, 0.0, 0.08]];

pub const PAL_ANGER_MEM: Palette = [[3.5, 0.4, 0.0], [3.2, 0.3, 0.0], [2.9, 0.5, 0.2]];
pub const PAL_ANGER_CORE: Palette = [[4.0, 0.3, 0.0], [3.7, 0.2, 0.0], [3.4, 0.4, 0.1]];
pub const PAL_RAGE_MEM: Palette = [[4.0, 0.5, 0.0], [3.5, 0.8, 0.3], [3.0, 0.4, 0.0]];
pub const PAL_RAGE_CORE: Palette = [[4.5, 0.4, 0.0], [4.0, 0.9, 0.4], [3.5, 0.3, 0.0]];

pub const PAL_PAIN_MEM: Palette = [[10.0, 10.0, 10.0], [9.0, 9.0, 9.0], [8.0, 8.0, 8.0]];
pub const PAL_PAIN_CORE: Palette = [[12.0, 12.0, 12.0], [11.0, 11.0, 11.0], [10.0, 10.0, 10.0]];

pub const PAL_SLEEP_MEM: Palette = [[0.5, 0.8, 2.0], [0.4, 0.6, 1.6], [0.3, 0.5, 1.3]];
pub const PAL_SLEEP_CORE: Palette = [[0.4, 0.6, 1.6], [0.3, 0.5, 1.3], [0.25, 0.4, 1.0]];

// ============================================================================
// Background
// ============================================================================

/// Two-stop background gradient, modulated by ambient light and sleep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub colors: Vec<Rgb>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            colors: vec![[0.0, 0.005, 0.02], [0.01, 0.02, 0.05]],
        }
    }
}

impl Background {
    /// Background colors darkened by low light and by sleep (never fully
    /// black — 30% brightness floor so the scene stays legible).
    pub fn shade(&self, light: f32, sleep_factor: f32) -> Vec<Rgb> {
        let brightness = light * (1.0 - sleep_factor * 0.6).max(0.3);
        self.colors
            .iter()
            .map(|c| [c[0] * brightness, c[1] * brightness, c[2] * brightness])
            .collect()
    }
}
