use thiserror::Error;

/// Reasons a `MatchConfig` cannot produce a playable round.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pane {pane} has inverted bounds: x0={x0} > x1={x1}")]
    InvertedPane { pane: usize, x0: i32, x1: i32 },
    #[error("panes overlap: [{a0}, {a1}] and [{b0}, {b1}]")]
    OverlappingPanes { a0: i32, a1: i32, b0: i32, b1: i32 },
    #[error("snake length must be at least 1")]
    EmptySnake,
    #[error("base step duration must be positive")]
    ZeroStep,
    #[error("apples_for_speed_boost must be positive")]
    ZeroBoostInterval,
    #[error("obstacle_spawn_every_steps must be positive")]
    ZeroSpawnInterval,
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("{name} range is inverted: ({min}, {max})")]
    InvertedRange { name: &'static str, min: i32, max: i32 },
    #[error("spawn lookahead must be positive, got {0}")]
    NonPositiveLookahead(i32),
}
