pub mod constants;
pub mod error;
pub mod hash;
pub mod init;
pub mod obstacles;
pub mod pane;
pub mod powerup;
pub mod snake;
pub mod state;
pub mod step;
pub mod types;

pub use constants::*;
pub use error::ConfigError;
pub use hash::*;
pub use init::*;
pub use obstacles::Obstacles;
pub use pane::Pane;
pub use powerup::{PowerUp, PowerUpDurations, PowerUpState};
pub use snake::{Snake, SnakeTuning, StepOutcome};
pub use state::GameState;
pub use step::{step, RoundController, StepTimers};
pub use types::*;
