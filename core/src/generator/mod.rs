use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;
pub use random::*;

mod random;

/// Decides which cells of a configured board hold mines.
///
/// The returned mask has shape `(height, width)` and is indexed with [`ToNdIndex`].
pub trait MineGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Array2<bool>>;
}

/// Places mines at an explicit list of positions, duplicates collapse into one mine.
///
/// The board adopts the resulting mine count, so the configured count is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: &GameConfig) -> Result<Array2<bool>> {
        let mut mine_mask: Array2<bool> = Array2::default(config.shape());

        for &coords in &self.mines {
            let coords = config.validate_coords(coords)?;
            mine_mask[coords.to_nd_index()] = true;
        }

        let count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let max = config.max_mines();
        if count > usize::from(max) {
            return Err(GameError::InvalidMineCount {
                requested: count as i64,
                max,
            });
        }

        Ok(mine_mask)
    }
}
