use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions {width}x{height}, each side must be within 1..=10")]
    InvalidDimension { width: i64, height: i64 },
    #[error("Invalid mine count {requested}, at most {max} mines fit while leaving a safe cell")]
    InvalidMineCount { requested: i64, max: CellCount },
    #[error("Field `{field}` is not a valid integer")]
    InvalidNumber { field: ConfigField },
    #[error("Mine layout does not match the board shape")]
    InvalidBoardShape,
    #[error("Board is not configured")]
    NotConfigured,
    #[error("Mines have not been placed yet")]
    MinesNotPlaced,
    #[error("Game already started, mines can no longer be placed")]
    AlreadyStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Position ({x}, {y}) is outside the board")]
    OutOfRangePosition { x: Coord, y: Coord },
}

/// Raw text field that failed to parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigField {
    Width,
    Height,
    Mines,
}

impl core::fmt::Display for ConfigField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Mines => "mines",
        })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
