use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Millis;

/// At most one power-up is active per snake; activating another replaces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    #[default]
    None,
    SpeedBoost,
    Invincibility,
}

/// Per-snake power-up timer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpState {
    pub active: PowerUp,
    /// Absolute clock time at which `active` lapses. Zero when nothing is active.
    pub end_ms: Millis,
    pub base_step_ms: Millis,
    pub current_step_ms: Millis,
    pub invincibility_boom_at: Option<Millis>,
    pub speed_boost_boom_at: Option<Millis>,
}

/// Durations a snake needs to run its power-up machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUpDurations {
    pub speed_boost_ms: Millis,
    pub invincibility_ms: Millis,
}

impl Default for PowerUpDurations {
    fn default() -> Self {
        Self {
            speed_boost_ms: SPEED_BOOST_DURATION_MS,
            invincibility_ms: INVINCIBILITY_DURATION_MS,
        }
    }
}

/// Step duration while boosted, truncated to whole milliseconds and never zero.
pub fn boosted_step_ms(base_step_ms: Millis) -> Millis {
    ((base_step_ms as f64 * SPEED_BOOST_FACTOR) as Millis).max(1)
}

impl PowerUpState {
    pub fn new(base_step_ms: Millis) -> Self {
        Self {
            active: PowerUp::None,
            end_ms: 0,
            base_step_ms,
            current_step_ms: base_step_ms,
            invincibility_boom_at: None,
            speed_boost_boom_at: None,
        }
    }

    /// Enter `kind` at `now`, discarding whatever was running.
    pub fn activate(&mut self, kind: PowerUp, now: Millis, durations: &PowerUpDurations) {
        self.active = kind;
        match kind {
            PowerUp::SpeedBoost => {
                self.end_ms = now + durations.speed_boost_ms;
                self.current_step_ms = boosted_step_ms(self.base_step_ms);
                self.speed_boost_boom_at = Some(now);
            }
            PowerUp::Invincibility => {
                self.end_ms = now + durations.invincibility_ms;
                self.current_step_ms = self.base_step_ms;
                self.invincibility_boom_at = Some(now);
            }
            PowerUp::None => {
                self.end_ms = 0;
                self.current_step_ms = self.base_step_ms;
            }
        }
    }

    /// Lapse the active power-up once `now` reaches its end time.
    /// Returns the power-up that expired, if any.
    pub fn update(&mut self, now: Millis) -> Option<PowerUp> {
        if self.active == PowerUp::None || now < self.end_ms {
            return None;
        }
        let expired = self.active;
        self.active = PowerUp::None;
        self.current_step_ms = self.base_step_ms;
        Some(expired)
    }

    pub fn is_invincible(&self) -> bool {
        self.active == PowerUp::Invincibility
    }

    pub fn invincibility_boom(&self, now: Millis) -> f64 {
        boom_intensity(
            self.invincibility_boom_at,
            self.active == PowerUp::Invincibility,
            self.end_ms,
            now,
        )
    }

    pub fn speed_boost_boom(&self, now: Millis) -> f64 {
        boom_intensity(
            self.speed_boost_boom_at,
            self.active == PowerUp::SpeedBoost,
            self.end_ms,
            now,
        )
    }
}

/// Render-only intensity in `[0, 1]`: a linear fade right after activation,
/// then short warning pulses while the matching power-up is about to lapse.
fn boom_intensity(started_at: Option<Millis>, active: bool, end_ms: Millis, now: Millis) -> f64 {
    if let Some(start) = started_at {
        let elapsed = now.saturating_sub(start);
        if now >= start && elapsed < BOOM_DURATION_MS {
            return 1.0 - elapsed as f64 / BOOM_DURATION_MS as f64;
        }
    }

    if active && now < end_ms {
        let remaining = end_ms - now;
        if remaining <= BOOM_WARNING_WINDOW_MS {
            let into_warning = BOOM_WARNING_WINDOW_MS - remaining;
            let phase = into_warning % BOOM_PULSE_PERIOD_MS;
            if phase < BOOM_PULSE_ON_MS {
                return BOOM_PULSE_PEAK * (1.0 - phase as f64 / BOOM_PULSE_ON_MS as f64);
            }
        }
    }

    0.0
}
