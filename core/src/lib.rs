#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Smallest allowed board side.
pub const MIN_SIDE: Coord = 1;
/// Largest allowed board side.
pub const MAX_SIDE: Coord = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a configuration, silently pulling every value into range.
    ///
    /// Sides are clamped to `MIN_SIDE..=MAX_SIDE` and the mine count to `0..=width*height-1`.
    pub fn new(width: i64, height: i64, mines: i64) -> Self {
        let size_x = clamp_side(width);
        let size_y = clamp_side(height);
        if i64::from(size_x) != width || i64::from(size_y) != height {
            log::warn!(
                "Board size {}x{} clamped to {}x{}",
                width,
                height,
                size_x,
                size_y
            );
        }

        let max = max_mines_for(size_x, size_y);
        let clamped_mines = mines.clamp(0, i64::from(max));
        if clamped_mines != mines {
            log::warn!("Mine count {} clamped to {}", mines, clamped_mines);
        }

        // in range after the clamp above
        Self::new_unchecked((size_x, size_y), clamped_mines as CellCount)
    }

    /// Builds a configuration, rejecting anything out of range instead of clamping.
    pub fn try_new(width: i64, height: i64, mines: i64) -> Result<Self> {
        let side_range = i64::from(MIN_SIDE)..=i64::from(MAX_SIDE);
        if !side_range.contains(&width) || !side_range.contains(&height) {
            return Err(GameError::InvalidDimension { width, height });
        }

        let (size_x, size_y) = (width as Coord, height as Coord);
        let max = max_mines_for(size_x, size_y);
        if !(0..=i64::from(max)).contains(&mines) {
            return Err(GameError::InvalidMineCount {
                requested: mines,
                max,
            });
        }

        Ok(Self::new_unchecked((size_x, size_y), mines as CellCount))
    }

    /// Parses raw text fields, then clamps like [`GameConfig::new`].
    pub fn parse(width: &str, height: &str, mines: &str) -> Result<Self> {
        let width = parse_field(width, ConfigField::Width)?;
        let height = parse_field(height, ConfigField::Height)?;
        let mines = parse_field(mines, ConfigField::Mines)?;
        Ok(Self::new(width, height, mines))
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub const fn max_mines(&self) -> CellCount {
        max_mines_for(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    /// `ndarray` shape of a board built from this configuration.
    pub fn shape(&self) -> (usize, usize) {
        (self.size.1.into(), self.size.0.into())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfRangePosition {
                x: coords.0,
                y: coords.1,
            })
        }
    }
}

fn clamp_side(side: i64) -> Coord {
    side.clamp(i64::from(MIN_SIDE), i64::from(MAX_SIDE)) as Coord
}

const fn max_mines_for(size_x: Coord, size_y: Coord) -> CellCount {
    area((size_x, size_y)).saturating_sub(1)
}

fn parse_field(text: &str, field: ConfigField) -> Result<i64> {
    i64::from_str(text.trim()).map_err(|_| GameError::InvalidNumber { field })
}

/// A cell uncovered by a single reveal, with the count the view should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub position: Coord2,
    pub adjacent_mine_count: u8,
}

/// Everything a view needs to refresh after [`GameBoard::reveal`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResult {
    pub triggered_mine: bool,
    pub revealed_cells: Vec<RevealedCell>,
    pub won: bool,
}

impl RevealResult {
    pub fn has_update(&self) -> bool {
        self.triggered_mine || !self.revealed_cells.is_empty()
    }
}
