use rand::{rngs::SmallRng, SeedableRng};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::*;

/// Stock identities: `P1` green, `P2` blue.
pub fn default_profiles() -> [PlayerProfile; 2] {
    [
        PlayerProfile {
            name: "P1".to_string(),
            body_color: P1_BODY,
            head_color: P1_HEAD,
        },
        PlayerProfile {
            name: "P2".to_string(),
            body_color: P2_BODY,
            head_color: P2_HEAD,
        },
    ]
}

/// Default match config built from `constants`.
pub fn default_config(seed: Option<u64>) -> MatchConfig {
    MatchConfig {
        seed,
        panes: [
            PaneBounds {
                x0: PANE1_X0,
                x1: PANE1_X1,
            },
            PaneBounds {
                x0: PANE2_X0,
                x1: PANE2_X1,
            },
        ],
        snake_len: SNAKE_LEN,
        step_ms: STEP_MS,
        speed_boost_ms: SPEED_BOOST_DURATION_MS,
        invincibility_ms: INVINCIBILITY_DURATION_MS,
        apples_for_speed_boost: APPLES_FOR_SPEED_BOOST,
        finish_line_y: FINISH_LINE_DISTANCE,
        visible_rows: GRID_H,
        obstacle_seed_count: OBSTACLE_SEED_COUNT,
        obstacle_seed_y: (OBSTACLE_SEED_Y_MIN, OBSTACLE_SEED_Y_MAX),
        obstacle_spawn_every_steps: OBSTACLE_SPAWN_EVERY_STEPS,
        obstacle_spawn_chance: OBSTACLE_SPAWN_CHANCE,
        spawn_ahead: (SPAWN_AHEAD_MIN, SPAWN_AHEAD_MAX),
        apple_spawn_chance: APPLE_SPAWN_CHANCE,
        golden_apple_chance: GOLDEN_APPLE_SPAWN_CHANCE,
        max_apples: MAX_APPLES,
        initial_apples: INITIAL_APPLES,
        initial_apple_y: (INITIAL_APPLE_Y_MIN, INITIAL_APPLE_Y_MAX),
        profiles: default_profiles(),
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        default_config(None)
    }
}

impl PlayerProfile {
    /// Name clipped to `MAX_NAME_LEN` characters.
    pub fn sanitized(&self) -> Self {
        Self {
            name: self.name.chars().take(MAX_NAME_LEN).collect(),
            ..self.clone()
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Probability { name, value })
    }
}

fn check_range(name: &'static str, (min, max): (i32, i32)) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pane, b) in self.panes.iter().enumerate() {
            if b.x0 > b.x1 {
                return Err(ConfigError::InvertedPane {
                    pane,
                    x0: b.x0,
                    x1: b.x1,
                });
            }
        }
        let [a, b] = self.panes;
        if a.x0 <= b.x1 && b.x0 <= a.x1 {
            return Err(ConfigError::OverlappingPanes {
                a0: a.x0,
                a1: a.x1,
                b0: b.x0,
                b1: b.x1,
            });
        }
        if self.snake_len == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.step_ms == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.apples_for_speed_boost == 0 {
            return Err(ConfigError::ZeroBoostInterval);
        }
        if self.obstacle_spawn_every_steps == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        check_probability("obstacle_spawn_chance", self.obstacle_spawn_chance)?;
        check_probability("apple_spawn_chance", self.apple_spawn_chance)?;
        check_probability("golden_apple_chance", self.golden_apple_chance)?;
        check_range("obstacle_seed_y", self.obstacle_seed_y)?;
        check_range("spawn_ahead", self.spawn_ahead)?;
        check_range("initial_apple_y", self.initial_apple_y)?;
        if self.spawn_ahead.0 <= 0 {
            return Err(ConfigError::NonPositiveLookahead(self.spawn_ahead.0));
        }
        Ok(())
    }

    /// RNG for a new game: the configured seed, or one drawn from entropy.
    pub fn seeded_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}
