use serde::{Deserialize, Serialize};

use crate::powerup::PowerUp;

// ── Primitives ──────────────────────────────────────────────

/// Milliseconds on the injected simulation clock.
pub type Millis = u64;

/// Player slot index: 0 = P1 (left pane), 1 = P2 (right pane).
pub type PlayerSlot = usize;

pub type Rgb = [u8; 3];

/// One grid cell. `y` decreases as snakes advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

// ── Input ───────────────────────────────────────────────────

/// Lateral steering sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteerInput {
    pub left: bool,
    pub right: bool,
}

pub const NULL_STEER: SteerInput = SteerInput {
    left: false,
    right: false,
};

impl SteerInput {
    pub const LEFT: SteerInput = SteerInput {
        left: true,
        right: false,
    };
    pub const RIGHT: SteerInput = SteerInput {
        left: false,
        right: true,
    };
}

// ── Apple ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apple {
    pub x: i32,
    pub y: i32,
    pub is_golden: bool,
}

impl Apple {
    pub fn red(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            is_golden: false,
        }
    }

    pub fn golden(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            is_golden: true,
        }
    }

    pub fn position(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

// ── Profiles ────────────────────────────────────────────────

/// Cosmetic identity of one player. Read once per round reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub body_color: Rgb,
    pub head_color: Rgb,
}

// ── Config ──────────────────────────────────────────────────

/// Inclusive column range of one pane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneBounds {
    pub x0: i32,
    pub x1: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// RNG seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub panes: [PaneBounds; 2],
    pub snake_len: usize,
    pub step_ms: Millis,
    pub speed_boost_ms: Millis,
    pub invincibility_ms: Millis,
    pub apples_for_speed_boost: u32,
    pub finish_line_y: i32,
    pub visible_rows: i32,
    pub obstacle_seed_count: usize,
    /// Inclusive y range for obstacles seeded at round start.
    pub obstacle_seed_y: (i32, i32),
    pub obstacle_spawn_every_steps: u32,
    pub obstacle_spawn_chance: f64,
    /// Inclusive lookahead range for spawned obstacle rows.
    pub spawn_ahead: (i32, i32),
    pub apple_spawn_chance: f64,
    pub golden_apple_chance: f64,
    pub max_apples: usize,
    pub initial_apples: usize,
    pub initial_apple_y: (i32, i32),
    pub profiles: [PlayerProfile; 2],
}

// ── Replay ──────────────────────────────────────────────────

/// One frame delivered by the outer loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub dt_ms: Millis,
    pub inputs: [SteerInput; 2],
}

/// Input to the headless runner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayInput {
    pub config: MatchConfig,
    pub frames: Vec<Frame>,
}

// ── Observables ─────────────────────────────────────────────

/// What happened during one tick, for the render/audio shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// `(slot, is_golden)` per apple eaten, in collection order.
    pub eaten: Vec<(PlayerSlot, bool)>,
    /// Players that went from alive to dead this tick.
    pub crashed: [bool; 2],
    /// True only on the tick that set the winner text.
    pub round_decided: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeView {
    pub name: String,
    pub body: Vec<Cell>,
    pub alive: bool,
    pub steps: u32,
    pub apples_collected: u32,
    pub active_powerup: PowerUp,
    pub current_step_ms: Millis,
}

/// Serializable copy of everything rendering reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub snakes: [SnakeView; 2],
    /// Sorted by `(x, y)`.
    pub obstacles: Vec<Cell>,
    pub apples: Vec<Apple>,
    pub cameras: [f64; 2],
    pub winner_text: Option<String>,
    pub scores: [u32; 2],
}
