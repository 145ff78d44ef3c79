use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{info, trace};

use crate::constants::*;
use crate::error::ConfigError;
use crate::obstacles::Obstacles;
use crate::pane::Pane;
use crate::snake::{Snake, SnakeTuning};
use crate::types::*;

/// Aggregate root for one match. Scores outlive `reset`; everything else
/// belongs to the current round.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: MatchConfig,
    pub panes: [Pane; 2],
    pub snakes: [Snake; 2],
    pub obstacles: Obstacles,
    pub apples: Vec<Apple>,
    /// Smoothed camera top row per player.
    pub cameras: [f64; 2],
    /// `Some` once the round is decided; frozen until the next reset.
    pub winner_text: Option<String>,
    pub scores: [u32; 2],
    pub rng: SmallRng,
}

fn build_snakes(config: &MatchConfig, panes: &[Pane; 2]) -> [Snake; 2] {
    let tuning = SnakeTuning::from_config(config);
    let make = |slot: PlayerSlot| {
        let pane = panes[slot];
        Snake::new(
            pane,
            Cell::new(pane.center_x(), START_Y),
            config.profiles[slot].sanitized(),
            tuning,
        )
    };
    [make(0), make(1)]
}

impl GameState {
    /// Validate `config` and start the first round.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.panes;
        let pane = |i: usize| {
            Pane::new(bounds[i].x0, bounds[i].x1).ok_or(ConfigError::InvertedPane {
                pane: i,
                x0: bounds[i].x0,
                x1: bounds[i].x1,
            })
        };
        let panes = [pane(0)?, pane(1)?];
        let snakes = build_snakes(&config, &panes);
        let rng = config.seeded_rng();

        let mut state = Self {
            config,
            panes,
            snakes,
            obstacles: Obstacles::new(),
            apples: Vec::new(),
            cameras: [0.0; 2],
            winner_text: None,
            scores: [0; 2],
            rng,
        };
        state.reset();
        Ok(state)
    }

    /// Start a fresh round. Scores are kept.
    pub fn reset(&mut self) {
        self.snakes = build_snakes(&self.config, &self.panes);

        self.obstacles = Obstacles::new();
        let (y_min, y_max) = self.config.obstacle_seed_y;
        for _ in 0..self.config.obstacle_seed_count {
            let pane = self.random_pane();
            let x = pane.rand_x(&mut self.rng);
            let y = self.rng.gen_range(y_min..=y_max);
            self.obstacles.add(x, y);
        }

        // Initial apples only avoid obstacles, not each other.
        self.apples.clear();
        let occupied: HashSet<Cell> = self.obstacles.blocks().collect();
        let (y_min, y_max) = self.config.initial_apple_y;
        for _ in 0..self.config.initial_apples {
            let pane = self.random_pane();
            if let Some(cell) = pane.get_empty_cell(&occupied, y_min, y_max, &mut self.rng) {
                self.apples.push(Apple::red(cell.x, cell.y));
            }
        }

        self.cameras = [0.0; 2];
        self.winner_text = None;

        info!(
            obstacles = self.obstacles.len(),
            apples = self.apples.len(),
            score_p1 = self.scores[0],
            score_p2 = self.scores[1],
            "round reset"
        );
    }

    /// Profiles take effect at the next `reset`.
    pub fn set_profiles(&mut self, profiles: [PlayerProfile; 2]) {
        self.config.profiles = profiles;
    }

    pub fn is_round_over(&self) -> bool {
        self.winner_text.is_some()
    }

    fn random_pane(&mut self) -> Pane {
        if self.rng.gen::<f64>() < 0.5 {
            self.panes[0]
        } else {
            self.panes[1]
        }
    }

    /// Place one apple ahead of the lead snake, clear of obstacles and other
    /// apples. No-op if sampling runs out of attempts.
    pub fn spawn_apple(&mut self) {
        let pane = self.random_pane();
        let mut occupied: HashSet<Cell> = self.obstacles.blocks().collect();
        occupied.extend(self.apples.iter().map(Apple::position));

        let lead_y = self.snakes[0].head().y.min(self.snakes[1].head().y);
        let Some(cell) = pane.get_empty_cell(
            &occupied,
            lead_y - APPLE_AHEAD_FAR,
            lead_y - APPLE_AHEAD_NEAR,
            &mut self.rng,
        ) else {
            trace!(lead_y, "apple spawn found no free cell");
            return;
        };

        let is_golden = self.rng.gen::<f64>() < self.config.golden_apple_chance;
        self.apples.push(Apple {
            x: cell.x,
            y: cell.y,
            is_golden,
        });
    }

    /// Ease each camera toward a point that keeps its snake in the lower
    /// quarter of the pane.
    pub fn update_cameras(&mut self) {
        let lead = self.config.visible_rows as f64 * CAMERA_LEAD;
        for (camera, snake) in self.cameras.iter_mut().zip(&self.snakes) {
            let target = snake.head().y as f64 - lead;
            *camera += (target - *camera) * CAMERA_LERP;
        }
    }

    /// Garbage-collect content scrolled away from both players.
    pub fn cleanup_offscreen_items(&mut self) {
        let trailing = self.cameras[0].max(self.cameras[1]);
        let bottom = trailing + (self.config.visible_rows + OBSTACLE_CLEANUP_MARGIN) as f64;
        self.obstacles.cleanup(bottom.ceil() as i32);

        let leading = self.cameras[0].min(self.cameras[1]);
        self.apples
            .retain(|a| a.y as f64 > leading - APPLE_CLEANUP_MARGIN);
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            snakes: [self.snakes[0].view(), self.snakes[1].view()],
            obstacles: self.obstacles.blocks().collect(),
            apples: self.apples.clone(),
            cameras: self.cameras,
            winner_text: self.winner_text.clone(),
            scores: self.scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::default_config;

    fn state() -> GameState {
        GameState::new(default_config(Some(42))).unwrap()
    }

    #[test]
    fn initial_round() {
        let s = state();
        assert_eq!(s.snakes[0].name(), "P1");
        assert_eq!(s.snakes[1].name(), "P2");
        assert!(s.snakes.iter().all(|sn| sn.alive));
        assert!(s.panes[0].contains(s.snakes[0].head()));
        assert!(s.panes[1].contains(s.snakes[1].head()));
        assert_eq!(s.snakes[0].head(), Cell::new(9, 0));
        assert_eq!(s.snakes[1].head(), Cell::new(29, 0));
        assert!(!s.obstacles.is_empty());
        assert!(!s.apples.is_empty());
        assert!(s.apples.len() <= INITIAL_APPLES);
        assert_eq!(s.cameras, [0.0, 0.0]);
        assert_eq!(s.winner_text, None);
        assert_eq!(s.scores, [0, 0]);
    }

    #[test]
    fn seeded_content_in_range() {
        let s = state();
        for c in s.obstacles.blocks() {
            assert!((OBSTACLE_SEED_Y_MIN..=OBSTACLE_SEED_Y_MAX).contains(&c.y));
            assert!(s.panes.iter().any(|p| p.contains(c)));
        }
        for a in &s.apples {
            assert!((INITIAL_APPLE_Y_MIN..=INITIAL_APPLE_Y_MAX).contains(&a.y));
            assert!(!s.obstacles.collides(a.position()));
            assert!(!a.is_golden);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = default_config(Some(1));
        config.panes[0].x0 = 50;
        assert!(GameState::new(config).is_err());
    }

    #[test]
    fn reset_keeps_scores_only() {
        let mut s = state();
        s.scores = [5, 3];
        s.winner_text = Some("P1 wins".to_string());
        s.cameras = [-40.0, -12.5];
        s.snakes[0].alive = false;
        for _ in 0..20 {
            s.snakes[1].step();
        }
        s.reset();
        assert_eq!(s.scores, [5, 3]);
        assert_eq!(s.winner_text, None);
        assert_eq!(s.cameras, [0.0, 0.0]);
        assert!(s.snakes[0].alive);
        assert_eq!(s.snakes[1].head(), Cell::new(29, 0));
        assert_eq!(s.snakes[1].steps, 0);
    }

    #[test]
    fn profiles_apply_on_reset() {
        let mut s = state();
        let mut profiles = crate::init::default_profiles();
        profiles[1].name = "Viper".to_string();
        s.set_profiles(profiles);
        assert_eq!(s.snakes[1].name(), "P2");
        s.reset();
        assert_eq!(s.snakes[1].name(), "Viper");
    }

    #[test]
    fn spawned_apple_is_ahead_and_free() {
        let mut s = state();
        let before = s.apples.len();
        for _ in 0..40 {
            s.spawn_apple();
        }
        let lead = s.snakes[0].head().y.min(s.snakes[1].head().y);
        let spawned = &s.apples[before..];
        assert!(!spawned.is_empty());
        for a in spawned {
            assert!(a.y >= lead - APPLE_AHEAD_FAR && a.y <= lead - APPLE_AHEAD_NEAR);
            assert!(!s.obstacles.collides(a.position()));
        }
        let cells: HashSet<Cell> = spawned.iter().map(Apple::position).collect();
        assert_eq!(cells.len(), spawned.len());
    }

    #[test]
    fn spawn_no_op_when_window_is_full() {
        let mut config = default_config(Some(3));
        config.panes = [PaneBounds { x0: 0, x1: 0 }, PaneBounds { x0: 1, x1: 1 }];
        config.initial_apples = 0;
        config.obstacle_seed_count = 0;
        let mut s = GameState::new(config).unwrap();
        for x in 0..=1 {
            for y in -APPLE_AHEAD_FAR..=-APPLE_AHEAD_NEAR {
                s.obstacles.add(x, y);
            }
        }
        s.spawn_apple();
        assert!(s.apples.is_empty());
    }

    #[test]
    fn golden_chance_extremes() {
        let mut config = default_config(Some(11));
        config.golden_apple_chance = 1.0;
        config.initial_apples = 0;
        let mut s = GameState::new(config).unwrap();
        s.spawn_apple();
        assert!(s.apples.iter().all(|a| a.is_golden));

        s.config.golden_apple_chance = 0.0;
        s.apples.clear();
        s.spawn_apple();
        assert!(s.apples.iter().all(|a| !a.is_golden));
    }

    #[test]
    fn cameras_ease_toward_target() {
        let mut s = state();
        s.update_cameras();
        let target = -(GRID_H as f64) * CAMERA_LEAD;
        assert!((s.cameras[0] - target * CAMERA_LERP).abs() < 1e-9);
        for _ in 0..200 {
            s.update_cameras();
        }
        assert!((s.cameras[1] - target).abs() < 1e-6);
    }

    #[test]
    fn cleanup_drops_trailing_obstacles() {
        let mut s = state();
        s.obstacles = Obstacles::new();
        s.cameras = [-10.5, -50.0];
        // Trailing camera -10.5 + 35 = 24.5 -> blocks at y >= 25 go.
        s.obstacles.add(1, 24);
        s.obstacles.add(2, 25);
        s.obstacles.add(3, 100);
        s.obstacles.add(4, -500);
        s.cleanup_offscreen_items();
        let left: Vec<Cell> = s.obstacles.blocks().collect();
        assert_eq!(left, vec![Cell::new(1, 24), Cell::new(4, -500)]);
    }

    #[test]
    fn cleanup_apples_against_leading_camera() {
        let mut s = state();
        s.cameras = [-10.0, -50.0];
        s.apples = vec![Apple::red(1, -56), Apple::red(1, -55), Apple::red(2, -54), Apple::red(3, 20)];
        s.cleanup_offscreen_items();
        assert_eq!(s.apples, vec![Apple::red(2, -54), Apple::red(3, 20)]);
    }
}
