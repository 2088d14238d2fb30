//! Error types for configuration and player input.

use thiserror::Error;

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("gridSize must be between 1 and {max}, got {got}")]
    GridSize { got: usize, max: usize },

    #[error("stages must be at least 1")]
    NoStages,

    #[error("initialLives must be at least 1")]
    NoLives,

    #[error("stageTimeSecs must be at least 1")]
    NoStageTime,

    #[error("maxSequenceLen must be at least 1")]
    EmptySequence,

    #[error("maxSequenceLen must be at most {max}, got {got}")]
    SequenceTooLong { got: usize, max: usize },

    #[error("sequenceBaseLen must be at most {max}, got {got}")]
    BaseLenTooLong { got: usize, max: usize },

    #[error("{field} must be at most {max}, got {got}")]
    TimingTooLong { field: &'static str, got: u64, max: u64 },

    #[error("tickMs must be greater than 0")]
    ZeroTick,

    #[error("flashMs ({flash_ms}) must not exceed stepMs ({step_ms})")]
    FlashLongerThanStep { flash_ms: u64, step_ms: u64 },
}

/// Errors surfaced by the game controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell {cell} is outside the {grid_size}-cell grid")]
    CellOutOfRange { cell: usize, grid_size: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
