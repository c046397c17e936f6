//! CLI smoke tests — verify basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_thymos"))
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
}

#[test]
fn test_headless_run_prints_snapshot() {
    let output = cli_bin()
        .args(["--headless", "--ticks", "50", "--seed", "7"])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let snapshot: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("snapshot should be valid JSON");
    assert_eq!(snapshot["internal_emotion"], "neutral");
    assert_eq!(snapshot["sleep_active"], false);
}

#[test]
fn test_headless_runs_are_reproducible() {
    let run = || {
        let output = cli_bin()
            .args(["--ticks", "100", "--seed", "42"])
            .output()
            .expect("failed to run");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let output = cli_bin()
        .args([
            "--config",
            "/tmp/nonexistent_thymos_config_12345.toml",
            "--ticks",
            "1",
        ])
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}
