use std::collections::VecDeque;

use tracing::debug;

use crate::constants::*;
use crate::pane::Pane;
use crate::powerup::{PowerUp, PowerUpDurations, PowerUpState};
use crate::types::*;

/// Forward motion is fixed: one row toward negative y per step.
pub const DY: i32 = -1;

/// Result of one `Snake::step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Already dead; nothing moved.
    Frozen,
    Moved,
    /// Head would have left the pane. Body is left where it was.
    HitWall,
    /// Head landed on a trailing segment.
    HitSelf,
}

/// Per-snake tunables, normally taken from a validated `MatchConfig`:
/// `len`, `base_step_ms` and `apples_for_speed_boost` are all positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeTuning {
    pub len: usize,
    pub base_step_ms: Millis,
    pub apples_for_speed_boost: u32,
    pub durations: PowerUpDurations,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            len: SNAKE_LEN,
            base_step_ms: STEP_MS,
            apples_for_speed_boost: APPLES_FOR_SPEED_BOOST,
            durations: PowerUpDurations::default(),
        }
    }
}

impl SnakeTuning {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            len: config.snake_len,
            base_step_ms: config.step_ms,
            apples_for_speed_boost: config.apples_for_speed_boost,
            durations: PowerUpDurations {
                speed_boost_ms: config.speed_boost_ms,
                invincibility_ms: config.invincibility_ms,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    /// Copy of the owning lane's bounds; used for wall checks only.
    pub pane: Pane,
    /// Fixed length; index 0 is the head.
    pub body: Vec<Cell>,
    /// Past head positions, oldest first. Holds at most `body.len() + 1`.
    pub history: VecDeque<Cell>,
    /// One-shot lateral request, consumed by the next step.
    pub pending_dx: i32,
    pub alive: bool,
    pub steps: u32,
    pub apples_collected: u32,
    pub powerup: PowerUpState,
    pub profile: PlayerProfile,
    tuning: SnakeTuning,
}

impl Snake {
    /// Head at `start`, tail laid out straight behind it (increasing y).
    pub fn new(pane: Pane, start: Cell, profile: PlayerProfile, tuning: SnakeTuning) -> Self {
        let len = tuning.len;
        let body: Vec<Cell> = (0..len as i32)
            .map(|i| Cell::new(start.x, start.y + i))
            .collect();
        let mut history = VecDeque::with_capacity(len + 2);
        history.push_back(start);
        Self {
            pane,
            body,
            history,
            pending_dx: 0,
            alive: true,
            steps: 0,
            apples_collected: 0,
            powerup: PowerUpState::new(tuning.base_step_ms),
            profile,
            tuning,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn active_powerup(&self) -> PowerUp {
        self.powerup.active
    }

    pub fn current_step_ms(&self) -> Millis {
        self.powerup.current_step_ms
    }

    pub fn is_invincible(&self) -> bool {
        self.powerup.is_invincible()
    }

    /// Record a lane change for the next step. Left wins if both are held;
    /// neither leaves any earlier request for this step in place.
    pub fn steer(&mut self, left: bool, right: bool) {
        if left {
            self.pending_dx = -1;
        } else if right {
            self.pending_dx = 1;
        }
    }

    /// Advance one row. The trailing body replays the recorded head path,
    /// so lane changes ripple down the body cell by cell.
    pub fn step(&mut self) -> StepOutcome {
        if !self.alive {
            return StepOutcome::Frozen;
        }

        self.steps += 1;

        let head = self.head();
        self.history.push_back(head);

        let dx = std::mem::take(&mut self.pending_dx);
        let new_head = Cell::new(head.x + dx, head.y + DY);

        if !self.pane.contains(new_head) {
            self.alive = false;
            debug!(snake = %self.profile.name, x = new_head.x, y = new_head.y, "hit pane wall");
            return StepOutcome::HitWall;
        }

        self.body[0] = new_head;

        // Segment i sits where the head was i steps ago. While history is
        // still short at round start, the tail stacks on the last known cell.
        let recorded = self.history.len();
        for i in 1..self.body.len() {
            self.body[i] = if i <= recorded {
                self.history[recorded - i]
            } else {
                self.body[i - 1]
            };
        }

        let cap = self.body.len() + 1;
        while self.history.len() > cap {
            self.history.pop_front();
        }

        if self.body[1..].contains(&new_head) {
            self.alive = false;
            debug!(snake = %self.profile.name, x = new_head.x, y = new_head.y, "ran into itself");
            return StepOutcome::HitSelf;
        }

        StepOutcome::Moved
    }

    /// Red apple: every `apples_for_speed_boost`-th one grants a speed boost.
    pub fn collect_apple(&mut self, now: Millis) {
        self.apples_collected += 1;
        if self.apples_collected % self.tuning.apples_for_speed_boost == 0 {
            self.activate_powerup(PowerUp::SpeedBoost, now);
        }
    }

    pub fn collect_golden_apple(&mut self, now: Millis) {
        self.activate_powerup(PowerUp::Invincibility, now);
    }

    pub fn activate_powerup(&mut self, kind: PowerUp, now: Millis) {
        self.powerup.activate(kind, now, &self.tuning.durations);
        debug!(snake = %self.profile.name, ?kind, until = self.powerup.end_ms, "power-up activated");
    }

    pub fn update_powerups(&mut self, now: Millis) {
        if let Some(expired) = self.powerup.update(now) {
            debug!(snake = %self.profile.name, ?expired, now, "power-up expired");
        }
    }

    pub fn boom_intensity(&self, now: Millis) -> f64 {
        self.powerup.invincibility_boom(now)
    }

    pub fn speed_boost_boom_intensity(&self, now: Millis) -> f64 {
        self.powerup.speed_boost_boom(now)
    }

    pub fn view(&self) -> SnakeView {
        SnakeView {
            name: self.profile.name.clone(),
            body: self.body.clone(),
            alive: self.alive,
            steps: self.steps,
            apples_collected: self.apples_collected,
            active_powerup: self.powerup.active,
            current_step_ms: self.powerup.current_step_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::default_profiles;

    fn snake_at(x: i32, y: i32) -> Snake {
        let [p1, _] = default_profiles();
        Snake::new(
            Pane::new(0, 20).unwrap(),
            Cell::new(x, y),
            p1,
            SnakeTuning::default(),
        )
    }

    #[test]
    fn initial_layout() {
        let s = snake_at(10, 10);
        assert!(s.alive);
        assert_eq!(s.body.len(), SNAKE_LEN);
        assert_eq!(s.head(), Cell::new(10, 10));
        assert_eq!(s.body[SNAKE_LEN - 1], Cell::new(10, 10 + SNAKE_LEN as i32 - 1));
        assert_eq!(s.apples_collected, 0);
        assert_eq!(s.active_powerup(), PowerUp::None);
        assert_eq!(s.current_step_ms(), STEP_MS);
    }

    #[test]
    fn length_comes_from_tuning() {
        let [p1, _] = default_profiles();
        let tuning = SnakeTuning {
            len: 1,
            ..SnakeTuning::default()
        };
        let mut s = Snake::new(Pane::new(0, 20).unwrap(), Cell::new(10, 10), p1, tuning);
        assert_eq!(s.body, vec![Cell::new(10, 10)]);
        for _ in 0..5 {
            assert_eq!(s.step(), StepOutcome::Moved);
            assert_eq!(s.body.len(), 1);
        }
        assert_eq!(s.history.len(), 2);
    }

    #[test]
    fn zero_length_never_reaches_a_snake() {
        let mut config = crate::init::default_config(Some(1));
        config.snake_len = 0;
        assert!(crate::state::GameState::new(config).is_err());
        let config = crate::init::default_config(Some(1));
        assert_eq!(SnakeTuning::from_config(&config).len, SNAKE_LEN);
    }

    #[test]
    fn moves_up_one_row() {
        let mut s = snake_at(10, 10);
        assert_eq!(s.step(), StepOutcome::Moved);
        assert_eq!(s.head(), Cell::new(10, 9));
        assert_eq!(s.steps, 1);
    }

    #[test]
    fn steering_is_one_shot() {
        let mut s = snake_at(10, 10);
        s.steer(true, false);
        assert_eq!(s.pending_dx, -1);
        s.step();
        assert_eq!(s.head(), Cell::new(9, 9));
        assert_eq!(s.pending_dx, 0);
        s.step();
        assert_eq!(s.head(), Cell::new(9, 8));

        s.steer(false, true);
        s.step();
        assert_eq!(s.head(), Cell::new(10, 7));
    }

    #[test]
    fn left_wins_when_both_held() {
        let mut s = snake_at(10, 10);
        s.steer(true, true);
        assert_eq!(s.pending_dx, -1);
    }

    #[test]
    fn no_input_keeps_earlier_request() {
        let mut s = snake_at(10, 10);
        s.steer(false, true);
        s.steer(false, false);
        assert_eq!(s.pending_dx, 1);
    }

    #[test]
    fn wall_kills_without_moving_body() {
        let mut s = snake_at(0, 10);
        let before = s.body.clone();
        s.steer(true, false);
        assert_eq!(s.step(), StepOutcome::HitWall);
        assert!(!s.alive);
        assert_eq!(s.body, before);
        assert_eq!(s.body.len(), SNAKE_LEN);
    }

    #[test]
    fn right_wall_is_inclusive() {
        let mut s = snake_at(19, 10);
        s.steer(false, true);
        assert_eq!(s.step(), StepOutcome::Moved);
        assert_eq!(s.head().x, 20);
        s.steer(false, true);
        assert_eq!(s.step(), StepOutcome::HitWall);
    }

    #[test]
    fn dead_snake_is_frozen() {
        let mut s = snake_at(10, 10);
        s.alive = false;
        let before = s.body.clone();
        assert_eq!(s.step(), StepOutcome::Frozen);
        assert_eq!(s.body, before);
        assert_eq!(s.steps, 0);
    }

    #[test]
    fn body_retraces_head_path() {
        let mut s = snake_at(10, 10);
        let mut heads = vec![s.head()];
        for i in 0..30 {
            if i % 5 == 0 {
                s.steer(i % 10 == 0, i % 10 != 0);
            }
            s.step();
            heads.push(s.head());
            assert_eq!(s.body.len(), SNAKE_LEN);
        }
        // Once history is full, segment i is the head from i steps ago.
        let n = heads.len();
        for i in 0..SNAKE_LEN {
            assert_eq!(s.body[i], heads[n - 1 - i], "segment {i}");
        }
        assert!(s.history.len() <= SNAKE_LEN + 1);
    }

    #[test]
    fn tail_stacks_while_history_fills() {
        let mut s = snake_at(10, 10);
        s.step();
        // History holds the spawn head twice: the seed entry and the pre-move record.
        assert_eq!(s.body[0], Cell::new(10, 9));
        assert_eq!(s.body[1], Cell::new(10, 10));
        assert_eq!(s.body[2], Cell::new(10, 10));
        assert!(s.body[3..].iter().all(|&c| c == Cell::new(10, 10)));
        assert!(s.alive);
    }

    #[test]
    fn history_stays_bounded() {
        let mut s = snake_at(10, 10);
        for _ in 0..500 {
            s.step();
        }
        assert!(s.alive);
        assert_eq!(s.history.len(), SNAKE_LEN + 1);
    }

    #[test]
    fn self_collision_kills() {
        let mut s = snake_at(10, 10);
        for _ in 0..3 {
            s.step();
        }
        // Plant the cell the head is about to enter two entries back in the
        // recorded path; the rebuilt body will cover it.
        let next = Cell::new(s.head().x, s.head().y - 1);
        s.history.push_back(next);
        assert_eq!(s.step(), StepOutcome::HitSelf);
        assert!(!s.alive);
        assert_eq!(s.head(), next);
        assert_eq!(s.body.len(), SNAKE_LEN);
    }

    #[test]
    fn speed_boost_every_third_apple() {
        let mut s = snake_at(10, 10);
        for n in 1..=9u32 {
            s.powerup.active = PowerUp::None;
            s.collect_apple(0);
            assert_eq!(s.apples_collected, n);
            let boosted = s.active_powerup() == PowerUp::SpeedBoost;
            assert_eq!(boosted, n % 3 == 0, "apple {n}");
        }
    }

    #[test]
    fn golden_apple_grants_invincibility_without_counting() {
        let mut s = snake_at(10, 10);
        s.collect_apple(0);
        s.collect_apple(0);
        s.collect_golden_apple(0);
        assert!(s.is_invincible());
        assert_eq!(s.apples_collected, 2);
        s.collect_apple(10);
        assert_eq!(s.active_powerup(), PowerUp::SpeedBoost);
    }

    #[test]
    fn powerup_lapses_on_injected_clock() {
        let mut s = snake_at(10, 10);
        s.activate_powerup(PowerUp::SpeedBoost, 1_000);
        assert_eq!(s.current_step_ms(), 70);
        s.update_powerups(1_000 + SPEED_BOOST_DURATION_MS - 1);
        assert_eq!(s.active_powerup(), PowerUp::SpeedBoost);
        s.update_powerups(1_000 + SPEED_BOOST_DURATION_MS);
        assert_eq!(s.active_powerup(), PowerUp::None);
        assert_eq!(s.current_step_ms(), STEP_MS);
    }
}
