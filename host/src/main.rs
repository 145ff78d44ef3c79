use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use slither_core::{hash_frames, hash_seed, ReplayInput, RoundController, MAX_FRAME_MS};
use tracing::{debug, info, warn};

/// Replay a recorded race headlessly and report the outcome.
#[derive(Debug, Parser)]
#[command(name = "slither-host", version)]
struct Cli {
    /// Replay transcript JSON. Reads stdin when omitted.
    transcript: Option<PathBuf>,
    /// Override the seed stored in the transcript.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final snapshot as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_input(path: Option<&PathBuf>) -> Result<ReplayInput> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read transcript from stdin")?;
            buf
        }
    };
    serde_json::from_str(&json).context("failed to parse ReplayInput JSON")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut input = load_input(cli.transcript.as_ref())?;
    if cli.seed.is_some() {
        input.config.seed = cli.seed;
    }
    let Some(seed) = input.config.seed else {
        anyhow::bail!("transcript has no seed; pass --seed to replay it");
    };
    info!(frames = input.frames.len(), seed, "transcript loaded");
    let oversized = input.frames.iter().filter(|f| f.dt_ms > MAX_FRAME_MS).count();
    if oversized > 0 {
        warn!(oversized, max_ms = MAX_FRAME_MS, "frame deltas above the limit will be clamped");
    }

    let mut round = RoundController::new(input.config.clone()).context("invalid match config")?;

    let mut played = 0usize;
    for frame in &input.frames {
        let events = round.tick(&frame.inputs, frame.dt_ms);
        played += 1;
        for (slot, golden) in &events.eaten {
            debug!(slot, golden, now = round.now_ms(), "apple eaten");
        }
        if events.round_decided {
            break;
        }
    }

    let snapshot = round.state.snapshot();
    if snapshot.winner_text.is_none() {
        warn!(played, now = round.now_ms(), "transcript ended before the round was decided");
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("failed to serialize snapshot")?
        );
        return Ok(());
    }

    println!("=== Replay Result ===");
    println!(
        "Outcome: {}",
        snapshot.winner_text.as_deref().unwrap_or("Undecided")
    );
    println!(
        "Scores: {}={}, {}={}",
        snapshot.snakes[0].name, snapshot.scores[0], snapshot.snakes[1].name, snapshot.scores[1]
    );
    println!("Frames played: {}/{}", played, input.frames.len());
    println!("Clock: {} ms", round.now_ms());
    for view in &snapshot.snakes {
        println!(
            "  {}: alive={} steps={} apples={} head={:?}",
            view.name,
            view.alive,
            view.steps,
            view.apples_collected,
            view.body.first().map(|c| (c.x, c.y))
        );
    }
    println!("Transcript hash: {}", hex::encode(hash_frames(&input.frames)));
    println!("Seed commit: {}", hex::encode(hash_seed(seed)));
    Ok(())
}
