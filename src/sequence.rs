//! Stage sequence generation.

use crate::config::GameConfig;
use crate::rng::GameRng;

/// Build the target sequence for `stage`.
///
/// Length is `min(stage + base, max)`; every element is an independent
/// uniform draw from the grid, so repeats are allowed.
pub fn generate_sequence(stage: u32, config: &GameConfig, rng: &mut GameRng) -> Vec<usize> {
    let len = config.sequence_length(stage);
    (0..len).map(|_| rng.next_cell(config.grid_size)).collect()
}
