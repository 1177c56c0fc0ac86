//! Replays a recorded gesture trace through the runtime with in-memory
//! collaborators and prints every decision.

mod logging;
mod trace;

use std::{path::PathBuf, process};

use anyhow::{bail, Result};
use clap::Parser;
use drone_rescue::{
    active_config,
    dispatch::{FixedLocation, MemorySink, RecordingNotifier},
    runtime::HostSource,
    BridgeOutcome, GestureKind, GestureRuntime, InputEvent,
};
use log::LevelFilter;

use logging::ReplayLogger;
use trace::{parse_expected, parse_trace, TraceLine};

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replay accelerometer/key traces through the gesture runtime")]
struct Cli {
    trace: PathBuf,
    /// File with one `kind:outcome` per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long = "long", default_value_t = 0.0, allow_hyphen_values = true)]
    longitude: f64,
    /// Replay as if no location fix were available.
    #[arg(long)]
    no_location: bool,
    /// Make every dispatch write fail with this message.
    #[arg(long)]
    fail_sink: Option<String>,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
    /// Print the detector trace for every gesture input.
    #[arg(long)]
    verbose: bool,
}

type ReplayRuntime = GestureRuntime<MemorySink, RecordingNotifier, FixedLocation>;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    ReplayLogger::from_env(cli.log_level)?.install()?;

    let lines = parse_trace(&cli.trace)?;
    let location = if cli.no_location {
        FixedLocation::unknown()
    } else {
        FixedLocation::at(cli.lat, cli.longitude)
    };
    let mut sink = MemorySink::new();
    if let Some(message) = &cli.fail_sink {
        sink.fail_with(message.clone());
    }

    let config = *active_config();
    let mut runtime: ReplayRuntime =
        GestureRuntime::new(config, sink, RecordingNotifier::new(), location);
    if config.shake.enabled {
        runtime.attach_shake(Box::new(HostSource::new()))?;
    }
    if config.volume_sequence.enabled {
        runtime.attach_button_sequence(Box::new(HostSource::new()))?;
    }

    println!("decision,ms,kind,outcome,detail");
    let mut actual: Vec<String> = Vec::new();
    for line in &lines {
        let event = match *line {
            TraceLine::Accel(sample) => InputEvent::Motion(sample),
            TraceLine::Key(key) => InputEvent::Key(key),
            TraceLine::Presence { presence, .. } => InputEvent::Presence(presence),
            TraceLine::Manual { ms, emergency_type } => {
                let outcome = runtime.dispatch_manual(emergency_type);
                print_decision(ms, "manual", &outcome);
                actual.push(format!("manual:{}", outcome.label()));
                continue;
            }
        };

        runtime.submit(event)?;
        for decision in runtime.pump() {
            print_decision(
                decision.confirmed.at_ms,
                decision.confirmed.kind.label(),
                &decision.outcome,
            );
            actual.push(format!(
                "{}:{}",
                decision.confirmed.kind.label(),
                decision.outcome.label()
            ));
        }

        if cli.verbose {
            print_trace(&runtime, line);
        }
    }

    println!("counters,{}", serde_json::to_string(&runtime.counters())?);

    if let Some(expect_path) = &cli.expect {
        let expected = parse_expected(expect_path)?;
        if actual != expected {
            eprintln!("expected: {}", expected.join(","));
            eprintln!("actual:   {}", actual.join(","));
            bail!("decision sequence mismatch");
        }
    }
    Ok(())
}

fn print_decision(ms: u64, kind: &str, outcome: &BridgeOutcome) {
    let detail = match outcome {
        BridgeOutcome::AlertRaised => String::new(),
        BridgeOutcome::Dispatched(event) => event.emergency_type.label().to_string(),
        BridgeOutcome::DispatchFailed(err) => err.to_string(),
    };
    println!("decision,{ms},{kind},{},{detail}", outcome.label());
}

fn print_trace(runtime: &ReplayRuntime, line: &TraceLine) {
    let kind = match line {
        TraceLine::Accel(_) => GestureKind::Shake,
        TraceLine::Key(_) => GestureKind::ButtonSequence,
        _ => return,
    };
    let Some(sample) = runtime.last_trace(kind) else {
        return;
    };
    println!(
        "trace,{},{},{},{},{},{},{},{:.3},{}",
        sample.now_ms,
        kind.label(),
        sample.state_id.label(),
        sample.reject_reason.label(),
        sample.window_len,
        sample.cooldown_active,
        sample.fired,
        sample.magnitude,
        sample.key_code
    );
}
