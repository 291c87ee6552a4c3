#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod snapshot;
mod types;

/// How the random generators treat coinciding draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinePlacement {
    /// Every mine is an independent uniform draw, coinciding draws collapse into one mine.
    #[default]
    Independent,
    /// Exactly `mines` different cells are mined.
    Distinct,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub placement: MinePlacement,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord = 9;

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            placement: MinePlacement::Independent,
        }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Square board with as many mines as cells on a side.
    pub fn square(size: Coord) -> Result<Self> {
        Self::new(size, size.into())
    }

    pub const fn with_placement(self, placement: MinePlacement) -> Self {
        Self { placement, ..self }
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_capacity(self.size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        if self.mines > self.total_cells() {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                capacity: self.total_cells(),
            });
        }
        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords {
                coords,
                size: self.size,
            })
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE as CellCount)
    }
}

/// Mine positions produced by a [`MineGenerator`], before any hint is computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Marks every listed coordinate, repeated coordinates count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).grid_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords { coords, size });
            }
            mine_mask[coords.grid_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord {
        Coord::try_from(self.mine_mask.nrows()).unwrap_or(Coord::MAX)
    }

    /// Distinct mined cells, may be lower than the configured count.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub(crate) fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_nine_by_nine_with_nine_mines() {
        let config = GameConfig::default();

        assert_eq!(config.size, 9);
        assert_eq!(config.mines, 9);
        assert_eq!(config.placement, MinePlacement::Independent);
        assert_eq!(config.total_cells(), 81);
        assert_eq!(GameConfig::square(9), Ok(config));
    }

    #[test]
    fn config_rejects_misconfiguration() {
        assert_eq!(GameConfig::new(0, 1), Err(GameError::EmptyBoard));
        assert_eq!(GameConfig::new(3, 0), Err(GameError::NoMines));
        assert_eq!(
            GameConfig::new(3, 10),
            Err(GameError::TooManyMines {
                requested: 10,
                capacity: 9
            })
        );
        assert!(GameConfig::new(3, 9).is_ok());
    }

    #[test]
    fn coords_are_validated_not_clamped() {
        let config = GameConfig::default();

        assert_eq!(config.validate_coords((8, 0)), Ok((8, 0)));
        assert_eq!(
            config.validate_coords((9, 0)),
            Err(GameError::InvalidCoords {
                coords: (9, 0),
                size: 9
            })
        );
    }

    #[test]
    fn config_loads_from_json_without_placement() {
        let config: GameConfig = serde_json::from_str(r#"{"size":16,"mines":40}"#).unwrap();

        assert_eq!(config, GameConfig::new(16, 40).unwrap());

        let distinct = config.with_placement(MinePlacement::Distinct);
        let json = serde_json::to_string(&distinct).unwrap();
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), distinct);
    }

    #[test]
    fn layout_collapses_repeated_coords() {
        let layout = MineLayout::from_mine_coords(9, &[(0, 0), (0, 0), (3, 4)]).unwrap();

        assert_eq!(layout.size(), 9);
        assert_eq!(layout.mine_count(), 2);
        assert!(layout.contains_mine((3, 4)));
        assert!(!layout.contains_mine((4, 3)));
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine() {
        assert_eq!(
            MineLayout::from_mine_coords(2, &[(2, 0)]),
            Err(GameError::InvalidCoords {
                coords: (2, 0),
                size: 2
            })
        );
    }
}
