//! Game constants and playback timing.
//!
//! The defaults reproduce the browser game: a 16-cell grid, 5 stages,
//! 3 lives and 10 seconds per stage. The host may override any field by
//! passing a camelCase JS object; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cells on a 4x4 grid.
pub const GRID_SIZE: usize = 16;
/// Stages in a full game.
pub const STAGES: u32 = 5;
/// Lives at the start of a game.
pub const INITIAL_LIVES: u32 = 3;
/// Seconds allowed per stage.
pub const STAGE_TIME: u32 = 10;

/// Largest grid the controller accepts.
const MAX_GRID_SIZE: usize = 256;
/// Upper bound for `maxSequenceLen` and `sequenceBaseLen`.
const MAX_SEQUENCE_LEN: usize = 64;
/// Upper bound for every timing field.
const MAX_TIMING_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub grid_size: usize,
    pub stages: u32,
    pub initial_lives: u32,
    pub stage_time_secs: u32,
    /// Added to the stage number to get the sequence length.
    pub sequence_base_len: usize,
    pub max_sequence_len: usize,

    /// How long a cell stays lit during playback.
    pub flash_ms: u64,
    /// Distance between consecutive highlight starts.
    pub step_ms: u64,
    /// Pause after the last highlight before input opens.
    pub settle_ms: u64,
    /// Pause between clearing a stage and replaying the next sequence.
    pub advance_delay_ms: u64,
    /// Countdown period.
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            stages: STAGES,
            initial_lives: INITIAL_LIVES,
            stage_time_secs: STAGE_TIME,
            sequence_base_len: 2,
            max_sequence_len: 8,
            flash_ms: 400,
            step_ms: 600,
            settle_ms: 500,
            advance_delay_ms: 1000,
            tick_ms: 1000,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridSize {
                got: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.stages == 0 {
            return Err(ConfigError::NoStages);
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.stage_time_secs == 0 {
            return Err(ConfigError::NoStageTime);
        }
        if self.max_sequence_len == 0 {
            return Err(ConfigError::EmptySequence);
        }
        if self.max_sequence_len > MAX_SEQUENCE_LEN {
            return Err(ConfigError::SequenceTooLong {
                got: self.max_sequence_len,
                max: MAX_SEQUENCE_LEN,
            });
        }
        if self.sequence_base_len > MAX_SEQUENCE_LEN {
            return Err(ConfigError::BaseLenTooLong {
                got: self.sequence_base_len,
                max: MAX_SEQUENCE_LEN,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        for (field, got) in [
            ("flashMs", self.flash_ms),
            ("stepMs", self.step_ms),
            ("settleMs", self.settle_ms),
            ("advanceDelayMs", self.advance_delay_ms),
            ("tickMs", self.tick_ms),
        ] {
            if got > MAX_TIMING_MS {
                return Err(ConfigError::TimingTooLong {
                    field,
                    got,
                    max: MAX_TIMING_MS,
                });
            }
        }
        if self.flash_ms > self.step_ms {
            return Err(ConfigError::FlashLongerThanStep {
                flash_ms: self.flash_ms,
                step_ms: self.step_ms,
            });
        }
        Ok(())
    }

    /// Sequence length for `stage`: `min(stage + base, max)`.
    pub fn sequence_length(&self, stage: u32) -> usize {
        (stage as usize)
            .saturating_add(self.sequence_base_len)
            .min(self.max_sequence_len)
    }

    /// Total playback time for a sequence of `len` cells, settle included.
    pub fn playback_ms(&self, len: usize) -> u64 {
        (len as u64)
            .saturating_mul(self.step_ms)
            .saturating_add(self.settle_ms)
    }
}
