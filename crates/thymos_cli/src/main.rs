use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::json;
use thymos_core::{Channel, ThymosConfig};
use thymos_engine::MaskEngine;
use thymos_monitor::MonitorHub;
use thymos_visual::Resolver;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Command;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "thymos.toml", env = "THYMOS_CONFIG")]
    config: String,

    /// Seed for the cosmetic RNG (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured tick rate
    #[arg(long)]
    fps: Option<f32>,

    /// Run without the REPL for this many ticks, then print a snapshot
    #[arg(long)]
    ticks: Option<u64>,

    /// Shorthand for `--ticks` with its default count
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for snapshots.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = ThymosConfig::load_or_default(&args.config);
    if let Some(fps) = args.fps {
        config.engine.tick_rate = fps;
    }
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, tick_rate = config.engine.tick_rate, "starting thymos");

    if args.headless || args.ticks.is_some() {
        let ticks = args.ticks.unwrap_or(250);
        run_headless(config, seed, ticks)?;
        return Ok(());
    }

    run_interactive(config, seed).await
}

/// Drive the engine for a fixed number of ticks and print the final
/// diagnostic snapshot as JSON.
fn run_headless(config: ThymosConfig, seed: u64, ticks: u64) -> Result<()> {
    let visual = config.visual.clone();
    let tick_rate = config.engine.tick_rate;
    let mut engine = MaskEngine::new(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut resolver = Resolver::new(visual, &mut rng);

    for i in 0..ticks {
        engine.tick();
        let t = i as f32 / tick_rate;
        let _ = resolver.resolve(&engine.frame(), t, &mut rng);
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

async fn run_interactive(config: ThymosConfig, seed: u64) -> Result<()> {
    let tick_rate = config.engine.tick_rate;
    let visual = config.visual.clone();
    let mut engine = MaskEngine::new(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut resolver = Resolver::new(visual, &mut rng);
    let monitor = MonitorHub::default();

    let (tx, mut rx) = mpsc::channel::<Command>(32);

    // The REPL blocks on stdin, so it lives on its own thread.
    let repl = tokio::task::spawn_blocking(move || repl_loop(tx));

    println!("thymos online. Type ? for the command list, q to quit.");

    let mut focus = Channel::Energy;
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs_f32(1.0 / tick_rate));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                engine.tick();
                let t = engine.elapsed() as f32;
                let _ = resolver.resolve(&engine.frame(), t, &mut rng);
            }
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                monitor.record("shell/command", json!(format!("{cmd:?}")));
                if !apply_command(cmd, &mut engine, &mut focus, &monitor) {
                    break;
                }
            }
        }
    }

    repl.await??;
    Ok(())
}

fn repl_loop(tx: mpsc::Sender<Command>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed)?;
                match commands::parse(trimmed) {
                    Some(cmd) => {
                        let quit = cmd == Command::Quit;
                        if tx.blocking_send(cmd).is_err() || quit {
                            return Ok(());
                        }
                    }
                    None => println!("unknown command {trimmed:?} (? for help)"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                let _ = tx.blocking_send(Command::Quit);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Apply one command to the engine. Returns false on quit.
fn apply_command(
    cmd: Command,
    engine: &mut MaskEngine,
    focus: &mut Channel,
    monitor: &MonitorHub,
) -> bool {
    match cmd {
        Command::Focus(channel) => {
            *focus = channel;
            println!(">> focus: {channel}");
        }
        Command::Adjust(direction) => {
            // While a dream or nightmare runs, +/- tunes its intensity
            // instead of the focused channel.
            let sleep = engine.sleep();
            let (nightmare, dream) = (sleep.nightmare_active, sleep.dream_active);
            if nightmare {
                engine.adjust_nightmare_intensity(direction * 0.1);
                println!(
                    ">> nightmare intensity: {:.2}",
                    engine.sleep().nightmare_intensity
                );
            } else if dream {
                engine.adjust_dream_intensity(direction * 0.1);
                println!(">> dream intensity: {:.2}", engine.sleep().dream_intensity);
            } else {
                engine.nudge_target(*focus, direction * commands::step_for(*focus));
                println!(">> {}: {:.2}", focus, engine.target(*focus));
            }
        }
        Command::ToggleSleep => engine.toggle_sleep(),
        Command::ToggleDream => engine.toggle_dream(),
        Command::ToggleNightmare => engine.toggle_nightmare(),
        Command::StressSpike => {
            engine.set_target(Channel::Stress, 1.0);
            println!(">> stress spike");
        }
        Command::MorphToggle => {
            let next = if engine.target(Channel::Morph) == 0.0 { 1.0 } else { 0.0 };
            engine.set_target(Channel::Morph, next);
            println!(">> morph target: {next:.0}");
        }
        Command::Reset => {
            engine.reset();
            println!(">> reset to baseline");
        }
        Command::Debug => {
            match serde_json::to_string_pretty(&engine.snapshot()) {
                Ok(snap) => println!("{snap}"),
                Err(e) => println!("snapshot failed: {e}"),
            }
            for snap in monitor.snapshots() {
                println!(
                    "{}: {} msgs, {:.1} Hz",
                    snap.topic, snap.message_count, snap.frequency
                );
            }
        }
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => return false,
    }
    true
}
