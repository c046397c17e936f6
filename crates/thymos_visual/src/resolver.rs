//! Turns an engine frame into concrete render parameters.
//!
//! The resolver carries the few bits of presentation state that survive
//! between frames (rotation angles, REM drift) and samples all cosmetic
//! randomness from an injected RNG, so the engine itself stays
//! deterministic and a seeded run replays pixel motion exactly.

use crate::params::{CoreParams, MembraneParams, PointLayer, RenderParams};
use rand::Rng;
use thymos_core::palette::{
    CORE_A, CORE_B, CORE_GLACIER, CORE_LAVA, MEMBRANE_A, MEMBRANE_B, MEMBRANE_GLACIER,
    MEMBRANE_LAVA,
};
use thymos_core::{
    lerp, lerp_palette, BreathFx, Channel, CoreFx, CoreRotation, GlowFx, Jitter, MembraneFx,
    MembraneMotion, Palette, PulseFx, ScenarioCatalog, SuppressTag, VisualConfig,
};
use thymos_engine::Frame;

/// REM eye drift: saccade-like jumps while dreaming, decaying jolts
/// during nightmares.
#[derive(Debug, Clone, Copy, Default)]
struct RemDrift {
    x: f32,
    y: f32,
    next_jump: f32,
}

pub struct Resolver {
    config: VisualConfig,
    catalog: ScenarioCatalog,
    membrane_rot: [f32; 3],
    core_rot: [f32; 3],
    core_drift: [f32; 3],
    rem: RemDrift,
}

impl Resolver {
    pub fn new<R: Rng>(config: VisualConfig, rng: &mut R) -> Self {
        Self {
            config,
            catalog: ScenarioCatalog::standard(),
            membrane_rot: [0.0; 3],
            core_rot: [
                rng.gen_range(0.0..360.0),
                rng.gen_range(0.0..360.0),
                rng.gen_range(0.0..360.0),
            ],
            core_drift: [
                rng.gen_range(0.8..1.2),
                rng.gen_range(0.8..1.2),
                rng.gen_range(0.8..1.2),
            ],
            rem: RemDrift::default(),
        }
    }

    /// Resolve one frame at engine time `t` seconds.
    pub fn resolve<R: Rng>(&mut self, frame: &Frame, t: f32, rng: &mut R) -> RenderParams {
        let emo = &frame.emotional;
        let ch = &frame.channels;
        let sleep = frame.sleep_factor;

        // Modifier weight for each side of the mask.
        let w_shown = emo.displayed_intensity * emo.transition;
        let w_felt = emo.internal_intensity * emo.transition;

        let mem_fx = self
            .catalog
            .get(emo.displayed)
            .and_then(|s| s.generic_fx())
            .map(|(m, _)| *m)
            .unwrap_or_default();
        let core_fx = self
            .catalog
            .get(emo.internal)
            .and_then(|s| s.generic_fx())
            .map(|(_, c)| *c)
            .unwrap_or_default();

        tracing::trace!(
            displayed = %emo.displayed,
            internal = %emo.internal,
            w_shown,
            w_felt,
            "resolving frame"
        );

        let (mem_pal, core_pal) = self.resolve_palettes(frame, w_shown, w_felt);
        let membrane =
            self.resolve_membrane(frame, t, rng, &mem_fx, mem_pal, w_shown);
        let core = self.resolve_core(frame, t, rng, &core_fx, core_pal, w_felt);
        let background = self
            .config
            .background
            .shade(ch.get(Channel::Light), sleep);

        RenderParams {
            membrane,
            core,
            background,
        }
    }

    // ========================================================================
    // Palettes
    // ========================================================================

    /// Morph base blend, temperature pull, then the scenario pull. The
    /// membrane wears the *displayed* emotion's colors while the core
    /// betrays the *internal* one.
    fn resolve_palettes(&self, frame: &Frame, w_shown: f32, w_felt: f32) -> (Palette, Palette) {
        let emo = &frame.emotional;
        let morph = frame.channels.get(Channel::Morph);

        let base_mem = lerp_palette(&MEMBRANE_A, &MEMBRANE_B, morph);
        let base_core = lerp_palette(&CORE_A, &CORE_B, morph);

        let mut target_mem = self
            .catalog
            .get(emo.displayed)
            .map(|s| s.palette_membrane)
            .unwrap_or(MEMBRANE_A);
        let mut target_core = self
            .catalog
            .get(emo.internal)
            .map(|s| s.palette_core)
            .unwrap_or(CORE_A);

        // 0.0 reads glacier, 1.0 reads lava; the dead zone around the
        // neutral midpoint leaves the scenario colors alone.
        let f_temp = (frame.channels.get(Channel::Temperature) - 0.5) * 2.0;
        if f_temp.abs() > 0.3 {
            let pull = (f_temp.abs() * 1.5).min(1.0);
            if f_temp > 0.0 {
                target_mem = lerp_palette(&target_mem, &MEMBRANE_LAVA, pull);
                target_core = lerp_palette(&target_core, &CORE_LAVA, pull);
            } else {
                target_mem = lerp_palette(&target_mem, &MEMBRANE_GLACIER, pull);
                target_core = lerp_palette(&target_core, &CORE_GLACIER, pull);
            }
        }

        (
            lerp_palette(&base_mem, &target_mem, w_shown),
            lerp_palette(&base_core, &target_core, w_felt),
        )
    }

    // ========================================================================
    // Membrane
    // ========================================================================

    fn resolve_membrane<R: Rng>(
        &mut self,
        frame: &Frame,
        t: f32,
        rng: &mut R,
        fx: &MembraneFx,
        palette: Palette,
        w: f32,
    ) -> MembraneParams {
        let emo = &frame.emotional;
        let ch = &frame.channels;
        let sleep = frame.sleep_factor;

        let energy = ch.get(Channel::Energy);
        let stress = ch.get(Channel::Stress);
        let fear = ch.get(Channel::Fear);
        let felicity = ch.get(Channel::Felicity);
        let noise = ch.get(Channel::Noise);
        let cpu = ch.get(Channel::Cpu);
        let ram = ch.get(Channel::Ram);
        let humidity = ch.get(Channel::Humidity);

        let suppress_breath = self.suppressed(frame, SuppressTag::Breath);
        let suppress_rotation = self.suppressed(frame, SuppressTag::Rotation);

        // Breath envelope
        let breath_factor = if stress > 0.8 || suppress_breath {
            1.0
        } else {
            let mut base = if sleep > 0.0 {
                let period = self.config.breath_period * (1.0 + sleep * 3.0);
                (t * std::f32::consts::PI / period).sin().abs() * (1.0 - sleep * 0.7)
            } else {
                (t * std::f32::consts::PI / self.config.breath_period)
                    .sin()
                    .abs()
            };
            match fx.breath {
                BreathFx::Minimal(floor) => base = lerp(base, floor, w),
                BreathFx::Irregular(k) => {
                    base *= 1.0 + (t * 4.0).sin().abs() * k * w;
                }
                BreathFx::Normal => {}
            }
            base
        };

        // Scale
        let mut scale = self.config.scale_min
            + (self.config.scale_max - self.config.scale_min)
                * (breath_factor * (0.5 + 0.5 * energy));
        scale *= 1.0 - stress * self.config.stress_retraction;
        scale *= 1.0 - fear * 0.15 + felicity * 0.22;
        scale *= lerp(1.5, 0.7, ch.get(Channel::Pressure) / 1.8);

        if fx.expansion_boost > 0.0 {
            scale *= lerp(1.0, 1.0 + fx.expansion_boost, w);
        } else if fx.collapse > 0.0 {
            scale *= lerp(1.0, 1.0 - fx.collapse, w);
        }
        if let Some(c) = fx.compression {
            scale *= lerp(1.0, c, w);
        } else if fx.heaviness > 0.0 {
            scale *= lerp(1.0, 1.0 - fx.heaviness * 0.12, w);
        }

        // Whole-body offsets
        let drift = [(t * 0.4).sin() * 0.12, (t * 0.3).cos() * 0.12];
        let wobble_amp = 0.04 * cpu + 0.03 * fear + 0.025 * noise;
        let wobble = sample3(rng, wobble_amp);

        let tremor = if emo.is_masking && emo.effort > 0.3 {
            sample3(rng, emo.effort * 0.05 * 0.5)
        } else {
            [0.0; 3]
        };

        let stress_shake = if stress > 0.5 {
            sample3(rng, stress * 0.08)
        } else {
            [0.0; 3]
        };

        let shake = match fx.shake {
            Some(s) => {
                let off = (t * s.frequency).sin() * s.amplitude * w;
                [off, off * 0.5]
            }
            None => [0.0; 2],
        };

        // Rotation
        let mut speed = ch.get(Channel::Speed) * 1.5 * energy * (1.0 - fear * 0.35 + felicity * 0.25);
        speed *= 1.0 + noise * 0.5;
        if sleep > 0.0 {
            speed *= 1.0 - sleep * 0.9;
        }
        match fx.motion {
            MembraneMotion::Freeze => speed *= 1.0 - w * 0.98,
            MembraneMotion::Multiplier(m) => speed *= lerp(1.0, m, w),
            MembraneMotion::Slow(s) => speed *= lerp(1.0, s, w),
            MembraneMotion::Keep => {}
        }
        if !(stress > 0.8 || suppress_rotation) {
            for axis in &mut self.membrane_rot {
                *axis += speed;
            }
        }

        // Surface texture
        let mut softness = lerp(0.01, 0.25, humidity);
        if let Some(s) = fx.softness {
            softness *= lerp(1.0, s, w);
        }
        let mut sparkle_frequency = lerp(5.0, 50.0, humidity) * energy;
        if sleep > 0.0 {
            sparkle_frequency *= 1.0 - sleep * 0.8;
        }

        let jitter = fx.jitter.map(|j| Jitter {
            amplitude: j.amplitude * w,
            frequency: j.frequency,
        });

        // Point layers: wide halo and fine skin
        let death = fx.particle_death * w;
        let size_swell = 1.0 + ram * 1.8 + stress * 0.8 + felicity * 0.6;
        let noise_swell = 1.0 + noise * 0.4;

        let mut halo_size = 20.0 * size_swell * (1.0 - death) * noise_swell;
        if fx.mist {
            halo_size *= lerp(1.0, 2.5, w);
        }
        let fine_size = 2.5 * size_swell * noise_swell;

        let alpha_swell = 1.0 + ram + stress + felicity;
        let mut halo_alpha = 0.07 * alpha_swell;
        let mut fine_alpha = 0.35 * alpha_swell;
        if sleep > 0.0 {
            halo_alpha = (halo_alpha * (1.0 - sleep * 0.4)).max(0.15);
            fine_alpha = (fine_alpha * (1.0 - sleep * 0.4)).max(0.15);
        }
        if fx.opacity_loss > 0.0 {
            let keep = 1.0 - fx.opacity_loss * w;
            halo_alpha *= keep;
            fine_alpha *= keep;
        }
        if fx.mist {
            halo_alpha *= 0.35;
        }

        let blood_tint = if frame.nightmare && sleep > 0.8 {
            frame.nightmare_intensity * 0.6
        } else {
            0.0
        };

        MembraneParams {
            palette,
            breath_factor,
            scale,
            rotation: self.membrane_rot,
            drift,
            wobble,
            tremor,
            stress_shake,
            shake,
            softness,
            sparkle_frequency,
            jitter,
            halo: PointLayer {
                size: halo_size,
                alpha: halo_alpha,
                boost: 0.8,
                death,
            },
            fine: PointLayer {
                size: fine_size,
                alpha: fine_alpha,
                boost: 1.3,
                death: 0.0,
            },
            gravity_pull: fx.gravity_pull * w,
            streaks: if fx.streaks { w } else { 0.0 },
            particle_burst: if fx.burst { w } else { 0.0 },
            mist: fx.mist,
            stress_glow: stress * stress,
            charge_scan: frame.is_charging.then(|| (t * 3.5).sin()),
            burst_active: energy > 0.99,
            blood_tint,
        }
    }

    // ========================================================================
    // Core
    // ========================================================================

    fn resolve_core<R: Rng>(
        &mut self,
        frame: &Frame,
        t: f32,
        rng: &mut R,
        fx: &CoreFx,
        palette: Palette,
        w: f32,
    ) -> CoreParams {
        let ch = &frame.channels;
        let sleep = frame.sleep_factor;

        let energy = ch.get(Channel::Energy);
        let stress = ch.get(Channel::Stress);
        let fear = ch.get(Channel::Fear);
        let felicity = ch.get(Channel::Felicity);
        let noise = ch.get(Channel::Noise);
        let cpu = ch.get(Channel::Cpu);
        let temperature = ch.get(Channel::Temperature);
        let light = ch.get(Channel::Light);

        // Rotation
        let mut speed = ch.get(Channel::Speed) * 1.4 * 0.7 * (0.4 + temperature * 0.6) * energy;
        if sleep > 0.0 {
            speed *= 1.0 - sleep * 0.8;
        }
        match fx.rotation {
            CoreRotation::Stop => speed *= 1.0 - w,
            CoreRotation::Multiplier(m) => speed *= lerp(1.0, m, w),
            CoreRotation::Factor(f) => speed *= lerp(1.0, f, w),
            CoreRotation::Slow(s) => speed *= lerp(1.0, s, w),
            CoreRotation::Erratic => speed *= 1.0 + (t * 15.0).sin() * 0.5 * w,
            CoreRotation::Keep => {}
        }
        speed *= 1.0 - fear * 0.5 + felicity * 0.2;
        speed *= 1.0 + noise * 0.3;
        if stress < 0.8 {
            for (axis, drift) in self.core_rot.iter_mut().zip(self.core_drift) {
                *axis += drift * speed;
            }
        }

        let rotation_jitter = (rng.gen::<f32>() - 0.5) * (stress * 20.0)
            + (rng.gen::<f32>() - 0.5) * (cpu * 8.0)
            + (rng.gen::<f32>() - 0.5) * (noise * 5.0);

        // REM drift and nightmare jolts
        if frame.dreaming && sleep > 0.8 {
            if t >= self.rem.next_jump {
                self.rem.x = rng.gen_range(-0.15..0.15) * frame.dream_intensity;
                self.rem.y = rng.gen_range(-0.08..0.08) * frame.dream_intensity;
                self.rem.next_jump = t + rng.gen_range(0.1..0.4);
            }
        } else if frame.nightmare && sleep > 0.8 {
            if rng.gen::<f32>() < 0.15 * frame.nightmare_intensity {
                self.rem.x = rng.gen_range(-0.25..0.25) * frame.nightmare_intensity;
                self.rem.y = rng.gen_range(-0.25..0.25) * frame.nightmare_intensity;
            }
            self.rem.x *= 0.85;
            self.rem.y *= 0.85;
        } else {
            self.rem.x = 0.0;
            self.rem.y = 0.0;
        }

        // Scale
        let mut scale =
            1.0 - stress * self.config.stress_retraction - fear * 0.2 + felicity * 0.25;
        if sleep > 0.0 {
            scale *= 1.0 - sleep * 0.15;
        }
        if frame.nightmare && sleep > 0.8 {
            scale *= 1.0 - frame.nightmare_intensity * 0.2;
        }
        if let Some(c) = fx.compression {
            scale *= lerp(1.0, c, w);
        }
        scale += match fx.pulse {
            PulseFx::Frequency(f) => (t * f).sin() * 0.12 * w,
            PulseFx::Soft(f) => (t * f).sin() * 0.05 * w,
            PulseFx::Rhythm(f) => (t * f).sin().abs() * 0.1 * w,
            PulseFx::Sob(f) => (t * f).sin().abs().powi(4) * 0.15 * w,
            PulseFx::None => 0.0,
        };

        // Color
        let mut brightness = (0.8 * light).max(0.3);
        if sleep > 0.0 {
            brightness = (brightness * (1.0 - sleep * 0.4)).max(0.3);
        }
        match fx.glow {
            GlowFx::Boost(v) | GlowFx::Gentle(v) | GlowFx::Soft(v) => {
                brightness *= lerp(1.0, v, w);
            }
            GlowFx::None => {}
        }
        if let Some(var) = fx.brightness_variation {
            brightness *= lerp(1.0, (t * 7.0).sin().abs() * var, w);
        }

        let mut desaturation = fx.gray_wash * w;
        if sleep > 0.0 {
            desaturation = (desaturation + sleep * 0.3).min(0.5);
        }

        let dream_pulse = if frame.dreaming && sleep > 0.8 {
            0.3 * frame.dream_intensity
        } else {
            0.0
        };

        let blood_tint = if frame.nightmare && sleep > 0.8 {
            frame.nightmare_intensity * 0.6
        } else {
            0.0
        };

        CoreParams {
            palette,
            rotation: self.core_rot,
            rotation_jitter,
            rem_offset: [self.rem.x, self.rem.y],
            scale,
            brightness,
            dimming: fx.dimming * w,
            desaturation,
            flicker: if fx.flicker { 0.4 * w } else { 0.0 },
            brightness_variation: fx.brightness_variation.map_or(0.0, |v| v * w),
            dream_pulse,
            void_center: if fx.void_center { w } else { 0.0 },
            alpha: 0.25 + stress * 0.4,
            stress_glow: stress * stress,
            blood_tint,
        }
    }

    fn suppressed(&self, frame: &Frame, tag: SuppressTag) -> bool {
        thymos_engine::suppresses(&self.catalog, frame.emotional.displayed, tag)
    }
}

fn sample3<R: Rng>(rng: &mut R, amplitude: f32) -> [f32; 3] {
    if amplitude <= 0.0 {
        return [0.0; 3];
    }
    [
        rng.gen_range(-amplitude..amplitude),
        rng.gen_range(-amplitude..amplitude),
        rng.gen_range(-amplitude..amplitude),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use thymos_core::{Emotion, ThymosConfig};
    use thymos_engine::MaskEngine;

    fn setup() -> (MaskEngine, Resolver, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let resolver = Resolver::new(VisualConfig::default(), &mut rng);
        (MaskEngine::new(ThymosConfig::default()), resolver, rng)
    }

    #[test]
    fn test_neutral_frame_resolves_to_base_palettes() {
        let (mut engine, mut resolver, mut rng) = setup();
        engine.tick();
        let params = resolver.resolve(&engine.frame(), 0.04, &mut rng);
        // No emotion, no morph: palettes sit on the A bases.
        assert_eq!(params.membrane.palette, MEMBRANE_A);
        assert_eq!(params.core.palette, CORE_A);
        assert_eq!(params.membrane.blood_tint, 0.0);
        assert_eq!(params.core.rem_offset, [0.0, 0.0]);
    }

    #[test]
    fn test_breath_freezes_under_high_stress() {
        let (mut engine, mut resolver, mut rng) = setup();
        for _ in 0..4 {
            engine.set_target(Channel::Stress, 1.0);
            engine.tick();
        }
        let params = resolver.resolve(&engine.frame(), 1.0, &mut rng);
        assert_eq!(params.membrane.breath_factor, 1.0);
        assert!(params.membrane.stress_shake.iter().any(|v| *v != 0.0));
        assert!(params.core.alpha > 0.5);
    }

    #[test]
    fn test_sleep_damps_motion_and_background() {
        let (mut engine, mut resolver, mut rng) = setup();
        let awake = resolver.resolve(&engine.frame(), 0.0, &mut rng);
        let rot_before = resolver.membrane_rot;

        engine.toggle_sleep();
        for _ in 0..60 {
            engine.tick();
        }
        let asleep = resolver.resolve(&engine.frame(), 2.4, &mut rng);
        let rot_delta = resolver.membrane_rot[0] - rot_before[0];
        // Deep sleep leaves a tenth of the rotation speed.
        assert!(rot_delta < 0.2);
        assert!(asleep.membrane.sparkle_frequency < awake.membrane.sparkle_frequency);
        assert!(asleep.background[0][2] < awake.background[0][2]);
    }

    #[test]
    fn test_nightmare_tints_blood_red() {
        let (mut engine, mut resolver, mut rng) = setup();
        engine.toggle_sleep();
        for _ in 0..60 {
            engine.tick();
        }
        engine.toggle_nightmare();
        engine.tick();
        let params = resolver.resolve(&engine.frame(), 2.5, &mut rng);
        assert!(params.membrane.blood_tint > 0.0);
        assert!(params.core.blood_tint > 0.0);
        assert!(params.core.scale < 1.0);
    }

    #[test]
    fn test_rem_drift_only_while_dreaming() {
        let (mut engine, mut resolver, mut rng) = setup();
        engine.toggle_sleep();
        for _ in 0..60 {
            engine.tick();
        }
        engine.toggle_dream();
        engine.tick();
        let params = resolver.resolve(&engine.frame(), 2.5, &mut rng);
        assert!(params.core.rem_offset[0].abs() <= 0.15);
        assert!(params.core.dream_pulse > 0.0);

        engine.toggle_sleep();
        for _ in 0..30 {
            engine.tick();
        }
        let awake = resolver.resolve(&engine.frame(), 4.0, &mut rng);
        assert_eq!(awake.core.rem_offset, [0.0, 0.0]);
        assert_eq!(awake.core.dream_pulse, 0.0);
    }

    #[test]
    fn test_charging_scan_line() {
        let (mut engine, mut resolver, mut rng) = setup();
        engine.set_target(Channel::Energy, 0.5);
        engine.tick();
        engine.set_target(Channel::Energy, 0.9);
        engine.tick();
        let params = resolver.resolve(&engine.frame(), 1.0, &mut rng);
        assert!(params.membrane.charge_scan.is_some());
    }

    #[test]
    fn test_mask_splits_membrane_and_core_palettes() {
        let (mut engine, mut resolver, mut rng) = setup();
        // Exhausted despair masked by faint joy.
        engine.set_target(Channel::Energy, 0.0);
        engine.set_target(Channel::Cpu, 1.0);
        engine.set_target(Channel::Ram, 1.0);
        engine.set_target(Channel::JoyInput, 0.25);
        for _ in 0..300 {
            engine.tick();
        }
        assert_eq!(engine.emotional().internal, Emotion::Despair);
        let params = resolver.resolve(&engine.frame(), 12.0, &mut rng);
        let membrane = &params.membrane;
        assert_ne!(membrane.palette, MEMBRANE_A, "smile colors on the surface");
        // Core palette pulled toward despair, far darker than the shown face
        assert!(params.core.palette[0][0] < membrane.palette[0][0]);
    }
}
