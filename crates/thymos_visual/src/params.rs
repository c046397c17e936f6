//! The resolved parameter set one frame of rendering consumes.
//!
//! Everything here is a plain scalar or palette: the render shell applies
//! them to its own geometry (point sphere, core mesh) without touching the
//! engine. Per-point variation (seeds, sparkle phase) stays shell-side;
//! the resolver only fixes the amplitudes and frequencies.

use serde::Serialize;
use thymos_core::{Jitter, Palette, Rgb};

/// One translucent point layer of the membrane (the wide halo and the
/// fine skin share the same controls at different scales).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointLayer {
    pub size: f32,
    pub alpha: f32,
    /// Color boost the gradient applies to this layer.
    pub boost: f32,
    /// Fraction of points faded out by a particle-death modifier.
    pub death: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembraneParams {
    pub palette: Palette,
    /// 0..1 breathing envelope, already frozen/stretched as needed.
    pub breath_factor: f32,
    pub scale: f32,
    /// Accumulated rotation angles, degrees.
    pub rotation: [f32; 3],
    /// Slow positional drift of the whole body.
    pub drift: [f32; 2],
    /// Random wobble offset (cpu, fear, noise driven).
    pub wobble: [f32; 3],
    /// Extra tremor while a costly mask is being held.
    pub tremor: [f32; 3],
    /// Violent shake above the stress threshold.
    pub stress_shake: [f32; 3],
    /// Rhythmic scenario shake (laughter), x and y.
    pub shake: [f32; 2],
    pub softness: f32,
    pub sparkle_frequency: f32,
    /// Point-level jitter with intensity already folded into amplitude.
    pub jitter: Option<Jitter>,
    pub halo: PointLayer,
    pub fine: PointLayer,
    /// Downward pull on the lower hemisphere points.
    pub gravity_pull: f32,
    /// Falling vertical streak strength on the lower hemisphere.
    pub streaks: f32,
    /// Per-point brightness burst strength (rage).
    pub particle_burst: f32,
    pub mist: bool,
    /// Whiteout factor mixed toward overbright on stress.
    pub stress_glow: f32,
    /// Scan line height while charging, if charging.
    pub charge_scan: Option<f32>,
    /// Full-energy burst flare.
    pub burst_active: bool,
    /// Blood-red recolor strength during deep nightmares.
    pub blood_tint: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreParams {
    pub palette: Palette,
    pub rotation: [f32; 3],
    /// Jitter added to the first rotation axis (stress, cpu, noise).
    pub rotation_jitter: f32,
    /// REM drift / nightmare jolt offset.
    pub rem_offset: [f32; 2],
    pub scale: f32,
    pub brightness: f32,
    pub dimming: f32,
    pub desaturation: f32,
    /// Amplitude of the fast color flicker, zero when inactive.
    pub flicker: f32,
    /// Amplitude of the slow brightness wave, zero when inactive.
    pub brightness_variation: f32,
    /// Amplitude of the dream shimmer pulse.
    pub dream_pulse: f32,
    /// Equatorial darkening strength.
    pub void_center: f32,
    pub alpha: f32,
    pub stress_glow: f32,
    pub blood_tint: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderParams {
    pub membrane: MembraneParams,
    pub core: CoreParams,
    pub background: Vec<Rgb>,
}
