use rand::Rng;
use tracing::{debug, info};

use crate::constants::{MAX_FRAME_MS, OBSTACLE_MAX_SPAN};
use crate::error::ConfigError;
use crate::snake::Snake;
use crate::state::GameState;
use crate::types::*;

/// Clock and per-player step accumulators. Both accumulators receive every
/// frame delta; each drains at its own snake's current step duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepTimers {
    pub now_ms: Millis,
    pub acc_ms: [Millis; 2],
}

/// Per-frame transition. `dt_ms` is clamped to `MAX_FRAME_MS`, which bounds
/// the steps taken per frame.
///
/// Sub-step order:
///  0. Early return once the round is decided
///  1. Advance the clock, latch steering
///  2. Expire power-ups
///  3. Drain step accumulators (snakes move, walls/self checked)
///  4. Obstacle collisions
///  5. Apple collection
///  6. Apple spawn
///  7. Cameras
///  8. Obstacle spawn
///  9. Win arbitration
/// 10. Offscreen cleanup
pub fn step(
    state: &mut GameState,
    timers: &mut StepTimers,
    inputs: &[SteerInput; 2],
    dt_ms: Millis,
) -> TickEvents {
    let mut events = TickEvents::default();

    // 0. Frozen until reset
    if state.is_round_over() {
        return events;
    }

    let alive_before = [state.snakes[0].alive, state.snakes[1].alive];

    // 1. Clock + steering
    let dt_ms = dt_ms.min(MAX_FRAME_MS);
    timers.now_ms = timers.now_ms.saturating_add(dt_ms);
    let now = timers.now_ms;
    for (snake, input) in state.snakes.iter_mut().zip(inputs) {
        snake.steer(input.left, input.right);
    }

    // 2. Power-up expiry
    for snake in state.snakes.iter_mut() {
        snake.update_powerups(now);
    }

    // 3. Independent movement cadences
    advance_snakes(&mut state.snakes, &mut timers.acc_ms, dt_ms);

    // 4. Obstacles
    resolve_obstacle_collisions(state);

    // 5. Apples
    events.eaten = collect_apples(state, now);

    // 6. Apple spawn
    if state.apples.len() < state.config.max_apples
        && state.rng.gen::<f64>() < state.config.apple_spawn_chance
    {
        state.spawn_apple();
    }

    // 7. Cameras
    state.update_cameras();

    // 8. Obstacle spawn
    for slot in 0..2 {
        spawn_obstacles_for(state, slot);
    }

    // 9. Win arbitration
    events.round_decided = check_win_conditions(state);

    // 10. Cleanup
    state.cleanup_offscreen_items();

    for slot in 0..2 {
        events.crashed[slot] = alive_before[slot] && !state.snakes[slot].alive;
    }
    events
}

/// Feed `dt_ms` to both accumulators and step each snake once per whole
/// multiple of its current step duration. Step durations are never zero:
/// the base is validated and the boosted duration is at least 1 ms.
pub fn advance_snakes(snakes: &mut [Snake; 2], acc_ms: &mut [Millis; 2], dt_ms: Millis) {
    for (snake, acc) in snakes.iter_mut().zip(acc_ms.iter_mut()) {
        *acc = acc.saturating_add(dt_ms);
        loop {
            let step_ms = snake.current_step_ms();
            if *acc < step_ms {
                break;
            }
            *acc -= step_ms;
            snake.step();
        }
    }
}

/// Kill any live, non-invincible snake whose head sits on a block.
pub fn resolve_obstacle_collisions(state: &mut GameState) {
    let obstacles = &state.obstacles;
    for snake in state.snakes.iter_mut() {
        if snake.alive && !snake.is_invincible() && obstacles.collides(snake.head()) {
            snake.alive = false;
            debug!(snake = %snake.name(), x = snake.head().x, y = snake.head().y, "hit obstacle");
        }
    }
}

/// Award each apple to the first live snake (P1 before P2) whose head is on
/// it, then drop the claimed apples.
pub fn collect_apples(state: &mut GameState, now: Millis) -> Vec<(PlayerSlot, bool)> {
    let mut eaten = Vec::new();
    let mut claimed = vec![false; state.apples.len()];

    for (i, apple) in state.apples.iter().enumerate() {
        let pos = apple.position();
        let Some(slot) = (0..2).find(|&s| {
            let snake = &state.snakes[s];
            snake.alive && snake.head() == pos
        }) else {
            continue;
        };

        let snake = &mut state.snakes[slot];
        if apple.is_golden {
            snake.collect_golden_apple(now);
        } else {
            snake.collect_apple(now);
        }
        claimed[i] = true;
        eaten.push((slot, apple.is_golden));
    }

    let mut idx = 0;
    state.apples.retain(|_| {
        let keep = !claimed[idx];
        idx += 1;
        keep
    });
    eaten
}

/// Every `obstacle_spawn_every_steps` steps, maybe drop a 1-3 cell row
/// ahead of a live snake. No occupancy check: rows may overlap apples.
pub fn spawn_obstacles_for(state: &mut GameState, slot: PlayerSlot) {
    let snake = &state.snakes[slot];
    if !snake.alive || snake.steps % state.config.obstacle_spawn_every_steps != 0 {
        return;
    }
    let head = snake.head();
    let pane = snake.pane;

    if state.rng.gen::<f64>() >= state.config.obstacle_spawn_chance {
        return;
    }

    let (ahead_min, ahead_max) = state.config.spawn_ahead;
    let ahead = state.rng.gen_range(ahead_min..=ahead_max);
    let y = head.y - ahead;
    let span = state.rng.gen_range(1..=OBSTACLE_MAX_SPAN).min(pane.width());
    let start_x = state.rng.gen_range(pane.x0()..=pane.x1() - (span - 1));

    for i in 0..span {
        state.obstacles.add(start_x + i, y);
    }
}

fn win_text(snake: &Snake) -> String {
    format!("{} wins", snake.name().to_uppercase())
}

/// Decide the round if it is not decided yet. Returns true only on the call
/// that decides it.
///
/// Priority: P1 at the finish, P2 at the finish, P1 crashed, P2 crashed,
/// both crashed (draw, no score).
pub fn check_win_conditions(state: &mut GameState) -> bool {
    if state.winner_text.is_some() {
        return false;
    }

    let finish = state.config.finish_line_y;
    let [s1, s2] = &state.snakes;
    let finished = |s: &Snake| s.alive && s.head().y <= finish;

    let winner: Option<PlayerSlot> = if finished(s1) {
        Some(0)
    } else if finished(s2) {
        Some(1)
    } else if !s1.alive && s2.alive {
        Some(1)
    } else if !s2.alive && s1.alive {
        Some(0)
    } else if !s1.alive && !s2.alive {
        None
    } else {
        return false;
    };

    let text = match winner {
        Some(slot) => {
            state.scores[slot] += 1;
            win_text(&state.snakes[slot])
        }
        None => "Draw".to_string(),
    };
    info!(outcome = %text, score_p1 = state.scores[0], score_p2 = state.scores[1], "round decided");
    state.winner_text = Some(text);
    true
}

/// Owns the game state and its timers; the entry point for the outer loop.
#[derive(Clone, Debug)]
pub struct RoundController {
    pub state: GameState,
    pub timers: StepTimers,
}

impl RoundController {
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(config)?,
            timers: StepTimers::default(),
        })
    }

    pub fn tick(&mut self, inputs: &[SteerInput; 2], dt_ms: Millis) -> TickEvents {
        step(&mut self.state, &mut self.timers, inputs, dt_ms)
    }

    /// New round, same scores. The clock keeps running.
    pub fn restart(&mut self) {
        self.state.reset();
        self.timers.acc_ms = [0; 2];
    }

    pub fn now_ms(&self) -> Millis {
        self.timers.now_ms
    }
}
