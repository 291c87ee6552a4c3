use ndarray::{Array2, ArrayView2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// The whole game state: every cell plus the flag budget.
///
/// A board is created with its mines already placed and its hints computed,
/// afterwards only [`Board::reveal`], [`Board::toggle_flag`] and
/// [`Board::reveal_all`] change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    mine_count: CellCount,
    remaining_flags: CellCount,
}

impl Board {
    /// Square board with `size` mines, seeded from the thread-local generator.
    #[cfg(feature = "std")]
    pub fn new_game(size: Coord) -> Result<Self> {
        Self::with_config(GameConfig::square(size)?)
    }

    #[cfg(feature = "std")]
    pub fn with_config(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(rng))
    }

    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_seed(seed))
    }

    /// Board whose mine draws are exactly `mine_coords`, the flag budget is one per entry.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mines = CellCount::try_from(mine_coords.len()).map_err(|_| GameError::TooManyMines {
            requested: CellCount::MAX,
            capacity: cell_capacity(size),
        })?;
        let config = GameConfig::new(size, mines)?;
        Self::with_generator(config, FixedMineGenerator::new(mine_coords))
    }

    pub fn with_generator<G: MineGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        config.validate()?;
        let layout = generator.generate(&config)?;
        Ok(Self::from_layout(config, &layout))
    }

    fn from_layout(config: GameConfig, layout: &MineLayout) -> Self {
        let mut board = Self {
            config,
            cells: layout.mine_mask().map(|&is_mine| Cell::new(is_mine)),
            mine_count: layout.mine_count(),
            remaining_flags: config.mines,
        };
        board.compute_hints();

        log::debug!(
            "New {0}x{0} board with {1} mines ({2} configured)",
            config.size,
            board.mine_count,
            config.mines
        );
        board
    }

    /// Stores, for every non-mine cell, how many of its neighbors are mines.
    fn compute_hints(&mut self) {
        let size = self.size();
        for x in 0..size {
            for y in 0..size {
                let coords = (x, y);
                if self.cells[coords.grid_index()].is_mine() {
                    continue;
                }

                let adjacent_mines = self
                    .cells
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.grid_index()].is_mine())
                    .count() as u8;
                self.cells[coords.grid_index()].set_adjacent_mines(adjacent_mines);
            }
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    /// Mines actually on the board, coinciding draws counted once.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Mines requested by the config, which is also the full flag budget.
    pub fn configured_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn remaining_flags(&self) -> CellCount {
        self.remaining_flags
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(&self.cells[coords.grid_index()])
    }

    /// Read-only view of the grid, indexed `[x, y]`.
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_board(self)
    }

    pub(crate) fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.grid_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.grid_index()]
    }

    pub(crate) fn grid(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub(crate) fn take_flag(&mut self) -> bool {
        match self.remaining_flags.checked_sub(1) {
            Some(remaining) => {
                self.remaining_flags = remaining;
                true
            }
            None => false,
        }
    }

    pub(crate) fn return_flag(&mut self) {
        debug_assert!(self.remaining_flags < self.config.mines);
        self.remaining_flags = (self.remaining_flags + 1).min(self.config.mines);
    }
}
