use serde::{Deserialize, Serialize};

use crate::Coord2;

/// State of one board position, owned by [`GameBoard`](crate::GameBoard).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Coord2,
    is_mine: bool,
    is_revealed: bool,
    adjacent_mine_count: u8,
}

impl Cell {
    pub const fn new(position: Coord2) -> Self {
        Self {
            position,
            is_mine: false,
            is_revealed: false,
            adjacent_mine_count: 0,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// Cached count, only meaningful once the cell is revealed.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    /// True when `other` is one of the 8 cells surrounding this one.
    pub fn is_adjacent_to(&self, other: &Cell) -> bool {
        let dx = self.position.0.abs_diff(other.position.0);
        let dy = self.position.1.abs_diff(other.position.1);
        dx <= 1 && dy <= 1 && !(dx == 0 && dy == 0)
    }

    pub const fn state(&self) -> CellState {
        CellState {
            is_mine: self.is_mine,
            is_revealed: self.is_revealed,
            adjacent_mine_count: self.adjacent_mine_count,
        }
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        self.is_mine = is_mine;
    }

    pub(crate) fn reveal_with_count(&mut self, adjacent_mine_count: u8) {
        self.adjacent_mine_count = adjacent_mine_count;
        self.is_revealed = true;
    }

    pub(crate) fn reveal_mine(&mut self) {
        self.is_revealed = true;
    }
}

/// Read-only snapshot handed to presentation code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub adjacent_mine_count: u8,
}
