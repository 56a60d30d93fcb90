use alloc::vec::Vec;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Uniform placement without replacement.
///
/// Runs a partial Fisher-Yates shuffle over every linear cell index and keeps the shuffled prefix,
/// so each cell is equally likely to hold a mine and no index is picked twice.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws an index in `0..bound`, `bound` must be non-zero.
    pub(crate) fn pick(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Array2<bool>> {
        let total_cells = usize::from(config.total_cells());
        let mine_count = usize::from(config.mines);

        if mine_count > usize::from(config.max_mines()) {
            return Err(GameError::InvalidMineCount {
                requested: mine_count as i64,
                max: config.max_mines(),
            });
        }

        let mut indices: Vec<usize> = (0..total_cells).collect();
        for i in 0..mine_count {
            let j = self.rng.random_range(i..total_cells);
            indices.swap(i, j);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.shape());
        for &index in &indices[..mine_count] {
            let coords = coords_of(index, config.width());
            mine_mask[coords.to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board",
            mine_count,
            config.width(),
            config.height()
        );
        Ok(mine_mask)
    }
}
