//! The single-letter command set of the interactive shell.

use thymos_core::Channel;

/// One parsed shell command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Point the `+`/`-` adjustments at a channel.
    Focus(Channel),
    /// Adjust the focused channel (or the active dream/nightmare
    /// intensity) in the given direction.
    Adjust(f32),
    ToggleSleep,
    ToggleDream,
    ToggleNightmare,
    /// Slam the stress target to 1.0.
    StressSpike,
    /// Flip the morph target between the two base palettes.
    MorphToggle,
    Reset,
    /// Print the full diagnostic snapshot.
    Debug,
    Help,
    Quit,
}

/// Map one input line to a command. Unknown input yields `None`.
pub fn parse(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "p" => Some(Command::Focus(Channel::Pressure)),
        "t" => Some(Command::Focus(Channel::Temperature)),
        "h" => Some(Command::Focus(Channel::Humidity)),
        "v" => Some(Command::Focus(Channel::Speed)),
        "e" => Some(Command::Focus(Channel::Energy)),
        "f" => Some(Command::Focus(Channel::Felicity)),
        "l" => Some(Command::Focus(Channel::Light)),
        "w" => Some(Command::Focus(Channel::Noise)),
        "c" => Some(Command::Focus(Channel::Cpu)),
        "r" => Some(Command::Focus(Channel::Ram)),
        "j" => Some(Command::Focus(Channel::JoyInput)),
        "u" => Some(Command::Focus(Channel::SadnessInput)),
        "g" => Some(Command::Focus(Channel::AngerInput)),
        "i" => Some(Command::Focus(Channel::FearInput)),
        "+" | "up" => Some(Command::Adjust(1.0)),
        "-" | "down" => Some(Command::Adjust(-1.0)),
        "z" => Some(Command::ToggleSleep),
        "o" => Some(Command::ToggleDream),
        "n" => Some(Command::ToggleNightmare),
        "s" => Some(Command::StressSpike),
        "m" => Some(Command::MorphToggle),
        "d" => Some(Command::Reset),
        "b" => Some(Command::Debug),
        "?" | "help" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Adjustment step for a focused channel. Felicity and light move in
/// finer steps than the rest.
pub fn step_for(channel: Channel) -> f32 {
    match channel {
        Channel::Felicity | Channel::Light => 0.05,
        _ => 0.1,
    }
}

pub const HELP: &str = "\
channels:  [p]ressure [t]emperature [h]umidity [v]elocity [e]nergy
           [f]elicity [l]ight [w]noise [c]pu [r]am
social:    [j]oy [u]sadness [g]anger [i]fear
adjust:    +/- nudge focused channel (or active dream/nightmare intensity)
states:    [z] sleep  [o] dream  [n] nightmare
triggers:  [s] stress spike  [m] morph toggle  [d] reset
misc:      [b] debug snapshot  [?] help  [q] quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_focus_keys() {
        assert_eq!(parse("p"), Some(Command::Focus(Channel::Pressure)));
        assert_eq!(parse("w"), Some(Command::Focus(Channel::Noise)));
        assert_eq!(parse("J"), Some(Command::Focus(Channel::JoyInput)));
        assert_eq!(parse(" i "), Some(Command::Focus(Channel::FearInput)));
    }

    #[test]
    fn test_parse_adjust_and_toggles() {
        assert_eq!(parse("+"), Some(Command::Adjust(1.0)));
        assert_eq!(parse("-"), Some(Command::Adjust(-1.0)));
        assert_eq!(parse("z"), Some(Command::ToggleSleep));
        assert_eq!(parse("o"), Some(Command::ToggleDream));
        assert_eq!(parse("n"), Some(Command::ToggleNightmare));
        assert_eq!(parse("quit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("xyzzy"), None);
        assert_eq!(parse("++"), None);
    }

    #[test]
    fn test_fine_steps() {
        assert_eq!(step_for(Channel::Felicity), 0.05);
        assert_eq!(step_for(Channel::Light), 0.05);
        assert_eq!(step_for(Channel::Stress), 0.1);
        assert_eq!(step_for(Channel::Pressure), 0.1);
    }
}
