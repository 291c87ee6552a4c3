use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {coords:?} are outside the {size}x{size} board")]
    InvalidCoords { coords: Coord2, size: Coord },
    #[error("Board must be at least 1x1")]
    EmptyBoard,
    #[error("At least one mine is required")]
    NoMines,
    #[error("Too many mines, requested {requested} but the board only fits {capacity}")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
