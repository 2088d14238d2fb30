//! Random source for sequence cells.
//!
//! Every stage draws its cells from here. Real games take entropy through
//! `getrandom` (the browser's crypto API on wasm32); tests and `withSeed`
//! replays pin the seed so the same sequences come back.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct GameRng {
    inner: SmallRng,
}

impl GameRng {
    /// Fresh, unpredictable sequences for a real game.
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Reproducible sequences: equal seeds yield equal games.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// One sequence cell, uniform over a grid of `grid_size` cells.
    #[inline(always)]
    pub fn next_cell(&mut self, grid_size: usize) -> usize {
        self.inner.random_range(0..grid_size)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_seeds_replay_the_same_cells() {
        let mut a = GameRng::from_seed(7);
        let mut b = GameRng::from_seed(7);
        let first: Vec<usize> = (0..32).map(|_| a.next_cell(16)).collect();
        let second: Vec<usize> = (0..32).map(|_| b.next_cell(16)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cells_stay_on_grid() {
        let mut rng = GameRng::from_seed(99);
        for _ in 0..1000 {
            assert!(rng.next_cell(16) < 16);
        }
    }

    #[test]
    fn test_every_cell_reachable() {
        let mut rng = GameRng::from_seed(3);
        let mut seen = [false; 16];
        for _ in 0..2000 {
            seen[rng.next_cell(16)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
