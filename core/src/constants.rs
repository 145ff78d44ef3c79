use crate::types::Millis;

// Grid units are cells; times are milliseconds of the injected clock.

// Lanes
pub const PANE_COLS: i32 = 20;
pub const PANE1_X0: i32 = 0;
pub const PANE1_X1: i32 = PANE_COLS - 1;
pub const PANE2_X0: i32 = PANE_COLS;
pub const PANE2_X1: i32 = PANE_COLS * 2 - 1;

/// Rows visible in one pane; drives camera lead and cleanup margins.
pub const GRID_H: i32 = 30;

// Snake
pub const SNAKE_LEN: usize = 12;
pub const STEP_MS: Millis = 100;
pub const START_Y: i32 = 0;
/// Longest frame delta `step` will consume; larger deltas are clamped.
pub const MAX_FRAME_MS: Millis = 1000;

// Power-ups
pub const SPEED_BOOST_DURATION_MS: Millis = 5000;
pub const INVINCIBILITY_DURATION_MS: Millis = 5000;
pub const APPLES_FOR_SPEED_BOOST: u32 = 3;
/// Step duration multiplier while boosted (30% faster).
pub const SPEED_BOOST_FACTOR: f64 = 0.7;

// Boom effect (render-only intensity curve)
pub const BOOM_DURATION_MS: Millis = 300;
pub const BOOM_WARNING_WINDOW_MS: Millis = 900;
pub const BOOM_PULSE_PERIOD_MS: Millis = 300;
pub const BOOM_PULSE_ON_MS: Millis = 150;
pub const BOOM_PULSE_PEAK: f64 = 0.7;

// Finish line (snakes run toward negative y)
pub const FINISH_LINE_DISTANCE: i32 = -1000;

// Obstacles
pub const OBSTACLE_SEED_COUNT: usize = 40;
pub const OBSTACLE_SEED_Y_MIN: i32 = -80;
pub const OBSTACLE_SEED_Y_MAX: i32 = -30;
pub const OBSTACLE_SPAWN_EVERY_STEPS: u32 = 4;
pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.6;
pub const SPAWN_AHEAD_MIN: i32 = 25;
pub const SPAWN_AHEAD_MAX: i32 = 45;
pub const OBSTACLE_MAX_SPAN: i32 = 3;

// Apples
pub const APPLE_SPAWN_CHANCE: f64 = 0.08;
pub const GOLDEN_APPLE_SPAWN_CHANCE: f64 = 0.1;
pub const MAX_APPLES: usize = 50;
pub const INITIAL_APPLES: usize = 10;
pub const INITIAL_APPLE_Y_MIN: i32 = -100;
pub const INITIAL_APPLE_Y_MAX: i32 = -10;
/// Spawn window relative to the lead snake's head: `[lead - FAR, lead - NEAR]`.
pub const APPLE_AHEAD_FAR: i32 = 60;
pub const APPLE_AHEAD_NEAR: i32 = 10;

/// Rejection-sampling budget for `Pane::get_empty_cell`.
pub const EMPTY_CELL_ATTEMPTS: usize = 50;

// Camera
pub const CAMERA_LERP: f64 = 0.2;
pub const CAMERA_LEAD: f64 = 0.75;
pub const OBSTACLE_CLEANUP_MARGIN: i32 = 5;
pub const APPLE_CLEANUP_MARGIN: f64 = 5.0;

// Profiles
pub const MAX_NAME_LEN: usize = 16;
pub const P1_BODY: [u8; 3] = [40, 220, 120];
pub const P1_HEAD: [u8; 3] = [20, 255, 160];
pub const P2_BODY: [u8; 3] = [80, 150, 255];
pub const P2_HEAD: [u8; 3] = [120, 200, 255];
