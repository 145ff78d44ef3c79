//! Generates replay transcript JSON files for the headless runner.
//!
//! Usage:
//!   cargo run -p slither-core --example gen-transcript -- [idle|weave|short] > transcript.json

use slither_core::*;

/// ~60 fps frame delta.
const FRAME_MS: Millis = 16;

fn frames_for(mode: &str, count: usize) -> Option<Vec<Frame>> {
    let frames = match mode {
        // Straight race; decided by obstacles or the finish line.
        "idle" => vec![
            Frame {
                dt_ms: FRAME_MS,
                inputs: [NULL_STEER; 2],
            };
            count
        ],
        // P1 drifts left and right every second, P2 runs straight.
        "weave" => (0..count)
            .map(|i| {
                let p1 = match i % 120 {
                    0 => SteerInput::LEFT,
                    60 => SteerInput::RIGHT,
                    _ => NULL_STEER,
                };
                Frame {
                    dt_ms: FRAME_MS,
                    inputs: [p1, NULL_STEER],
                }
            })
            .collect(),
        "short" => vec![
            Frame {
                dt_ms: FRAME_MS,
                inputs: [NULL_STEER; 2],
            };
            100
        ],
        _ => return None,
    };
    Some(frames)
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "idle".to_string());

    let config = default_config(Some(42));
    // Enough frames to reach the finish line at base speed, with headroom.
    let count = (config.finish_line_y.unsigned_abs() as u64 * config.step_ms / FRAME_MS) as usize * 2;

    let Some(frames) = frames_for(&mode, count) else {
        eprintln!("Unknown mode: {}. Use 'idle', 'weave', or 'short'", mode);
        std::process::exit(1);
    };

    // Verify by running the sim
    let mut round = RoundController::new(config.clone()).unwrap();
    let mut played = 0;
    for frame in &frames {
        played += 1;
        if round.tick(&frame.inputs, frame.dt_ms).round_decided {
            break;
        }
    }

    let state = &round.state;
    eprintln!("=== Sim result ({} mode) ===", mode);
    eprintln!("Frames played: {}/{}", played, frames.len());
    eprintln!("Clock: {} ms", round.now_ms());
    eprintln!(
        "Outcome: {}",
        state.winner_text.as_deref().unwrap_or("Undecided")
    );
    eprintln!("Scores: P1={}, P2={}", state.scores[0], state.scores[1]);
    eprintln!(
        "Steps: P1={}, P2={}",
        state.snakes[0].steps, state.snakes[1].steps
    );

    let input = ReplayInput { config, frames };
    println!("{}", serde_json::to_string(&input).unwrap());
}
