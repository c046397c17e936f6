//! Named continuous channels and the current/target state vector.
//!
//! Every input the engine reacts to is one of these channels. The input
//! shell only ever writes *targets*; the temporal blender moves the
//! *current* values toward them, so the avatar never jumps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One continuous input channel.
///
/// Physiological and environmental channels live in `[0, 1]` except
/// `Pressure`, which spans `[0, 1.8]` (atmospheres, loosely). The four
/// `*Input` channels are the raw social signals feeding the masking model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    // Physiological
    Energy,
    Stress,
    Fear,
    Felicity,
    Temperature,
    Humidity,
    Speed,
    // Environmental
    Light,
    Noise,
    Cpu,
    Ram,
    Pressure,
    // Social inputs
    JoyInput,
    SadnessInput,
    AngerInput,
    FearInput,
    // Meta
    Morph,
}

impl Channel {
    pub const COUNT: usize = 17;

    pub const ALL: [Channel; Self::COUNT] = [
        Channel::Energy,
        Channel::Stress,
        Channel::Fear,
        Channel::Felicity,
        Channel::Temperature,
        Channel::Humidity,
        Channel::Speed,
        Channel::Light,
        Channel::Noise,
        Channel::Cpu,
        Channel::Ram,
        Channel::Pressure,
        Channel::JoyInput,
        Channel::SadnessInput,
        Channel::AngerInput,
        Channel::FearInput,
        Channel::Morph,
    ];

    /// Channels smoothed with the standard sensor window each tick.
    /// Stress has its own faster window and Morph its own fixed factor.
    pub const SMOOTHED: [Channel; 15] = [
        Channel::Pressure,
        Channel::Temperature,
        Channel::Humidity,
        Channel::Speed,
        Channel::Energy,
        Channel::Felicity,
        Channel::Fear,
        Channel::Light,
        Channel::Noise,
        Channel::Cpu,
        Channel::Ram,
        Channel::JoyInput,
        Channel::SadnessInput,
        Channel::AngerInput,
        Channel::FearInput,
    ];

    /// Valid range for target writes; anything outside is clamped.
    pub fn range(self) -> (f32, f32) {
        match self {
            Channel::Pressure => (0.0, 1.8),
            _ => (0.0, 1.0),
        }
    }

    /// Resting value the avatar starts from (and resets to).
    pub fn baseline(self) -> f32 {
        match self {
            Channel::Pressure => 1.0,
            Channel::Temperature | Channel::Humidity => 0.5,
            Channel::Speed | Channel::Energy | Channel::Light => 1.0,
            _ => 0.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Energy => "energy",
            Channel::Stress => "stress",
            Channel::Fear => "fear",
            Channel::Felicity => "felicity",
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
            Channel::Speed => "speed",
            Channel::Light => "light",
            Channel::Noise => "noise",
            Channel::Cpu => "cpu",
            Channel::Ram => "ram",
            Channel::Pressure => "pressure",
            Channel::JoyInput => "joy_input",
            Channel::SadnessInput => "sadness_input",
            Channel::AngerInput => "anger_input",
            Channel::FearInput => "fear_input",
            Channel::Morph => "morph",
        };
        f.write_str(name)
    }
}

/// Fixed-size bank of channel values, indexed by [`Channel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelBank([f32; Channel::COUNT]);

impl Default for ChannelBank {
    fn default() -> Self {
        let mut bank = [0.0; Channel::COUNT];
        for ch in Channel::ALL {
            bank[ch.index()] = ch.baseline();
        }
        Self(bank)
    }
}

impl ChannelBank {
    pub fn get(&self, ch: Channel) -> f32 {
        self.0[ch.index()]
    }

    /// Set a value, clamped to the channel's valid range.
    pub fn set(&mut self, ch: Channel, value: f32) {
        let (lo, hi) = ch.range();
        self.0[ch.index()] = value.clamp(lo, hi);
    }

    /// Set a value without range clamping. Reserved for derived channels
    /// (fear) whose producer already guarantees the range.
    pub fn set_raw(&mut self, ch: Channel, value: f32) {
        self.0[ch.index()] = value;
    }
}

/// The current/target pair driving the whole engine.
///
/// Invariant: `current` only ever moves toward `target` under the
/// exponential smoothing in the blender — it never overshoots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateVector {
    pub current: ChannelBank,
    pub target: ChannelBank,
}

impl StateVector {
    /// Write a target value (clamped). This is the only entry point the
    /// input shell gets; out-of-range writes are absorbed, never rejected.
    pub fn set_target(&mut self, ch: Channel, value: f32) {
        self.target.set(ch, value);
    }

    /// Apply a delta to a target value, clamped to the channel range.
    pub fn nudge_target(&mut self, ch: Channel, delta: f32) {
        let v = self.target.get(ch) + delta;
        self.target.set(ch, v);
    }

    pub fn current(&self, ch: Channel) -> f32 {
        self.current.get(ch)
    }

    pub fn target(&self, ch: Channel) -> f32 {
        self.target.get(ch)
    }

    /// One exponential smoothing step: move current 1/window of the way
    /// toward target.
    pub fn approach(&mut self, ch: Channel, window: f32) {
        let cur = self.current.get(ch);
        let tgt = self.target.get(ch);
        self.current.set_raw(ch, cur + (tgt - cur) / window);
    }

    /// Restore every channel (current and target) to its baseline.
    pub fn reset(&mut self) {
        self.current = ChannelBank::default();
        self.target = ChannelBank::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_bank() {
        let bank = ChannelBank::default();
        assert_eq!(bank.get(Channel::Energy), 1.0);
        assert_eq!(bank.get(Channel::Pressure), 1.0);
        assert_eq!(bank.get(Channel::Temperature), 0.5);
        assert_eq!(bank.get(Channel::Stress), 0.0);
        assert_eq!(bank.get(Channel::JoyInput), 0.0);
    }

    #[test]
    fn test_set_target_clamps_to_range() {
        let mut sv = StateVector::default();
        sv.set_target(Channel::Energy, 4.2);
        assert_eq!(sv.target(Channel::Energy), 1.0);

        sv.set_target(Channel::Energy, -1.0);
        assert_eq!(sv.target(Channel::Energy), 0.0);

        // Pressure has the one widened range
        sv.set_target(Channel::Pressure, 2.5);
        assert_eq!(sv.target(Channel::Pressure), 1.8);
    }

    #[test]
    fn test_nudge_target_clamps() {
        let mut sv = StateVector::default();
        sv.set_target(Channel::Noise, 0.95);
        sv.nudge_target(Channel::Noise, 0.1);
        assert_eq!(sv.target(Channel::Noise), 1.0);
        sv.nudge_target(Channel::Noise, -2.0);
        assert_eq!(sv.target(Channel::Noise), 0.0);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let mut sv = StateVector::default();
        sv.set_target(Channel::Noise, 1.0);
        let mut prev = sv.current(Channel::Noise);
        for _ in 0..200 {
            sv.approach(Channel::Noise, 10.0);
            let cur = sv.current(Channel::Noise);
            assert!(cur >= prev, "current moved away from target");
            assert!(cur <= 1.0 + 1e-6, "current overshot target");
            prev = cur;
        }
        assert!((prev - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut sv = StateVector::default();
        sv.set_target(Channel::Stress, 1.0);
        sv.approach(Channel::Stress, 3.0);
        sv.reset();
        assert_eq!(sv.current(Channel::Stress), 0.0);
        assert_eq!(sv.target(Channel::Stress), 0.0);
    }
}
