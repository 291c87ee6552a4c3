use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Continue,
    MineHit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    NoOp,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Flagged | Self::Unflagged => true,
            Self::NoOp => false,
        }
    }
}

/// A cell whose state changed during an operation, as it is right after the change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedCell {
    pub coords: Coord2,
    pub state: CellState,
    pub adjacent_mines: Option<u8>,
}

impl ChangedCell {
    pub(crate) fn new(coords: Coord2, cell: &Cell) -> Self {
        Self {
            coords,
            state: cell.state(),
            adjacent_mines: cell.adjacent_mines(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub outcome: RevealOutcome,
    /// Cells in the order they were revealed, empty for a no-op.
    pub changed: Vec<ChangedCell>,
}

impl RevealReport {
    pub fn has_update(&self) -> bool {
        !self.changed.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagReport {
    pub outcome: FlagOutcome,
    pub remaining_flags: CellCount,
}

impl Board {
    /// Reveals a hidden cell, cascading through blank cells.
    ///
    /// Revealing a flagged or already revealed cell is a no-op.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        use RevealOutcome::*;

        let coords = self.config().validate_coords(coords)?;
        let target = self.cell_at(coords);

        if target.state() != CellState::Hidden {
            return Ok(RevealReport {
                outcome: Continue,
                changed: Vec::new(),
            });
        }

        let mut changed = vec![self.reveal_single_cell(coords)];

        if target.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            return Ok(RevealReport {
                outcome: MineHit,
                changed,
            });
        }

        log::debug!(
            "Revealed cell at {:?}, adjacent mines: {:?}",
            coords,
            target.adjacent_mines()
        );

        if target.is_blank() {
            self.cascade_from(coords, &mut changed);
        }

        Ok(RevealReport {
            outcome: Continue,
            changed,
        })
    }

    /// Flood fill over blank cells with an explicit stack. Cells are revealed
    /// when pushed, so each one enters the stack at most once.
    fn cascade_from(&mut self, origin: Coord2, changed: &mut Vec<ChangedCell>) {
        let mut to_visit = vec![origin];

        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.grid().iter_neighbors(visit_coords) {
                let neighbor = self.cell_at(pos);
                if neighbor.is_mine() || neighbor.state() != CellState::Hidden {
                    continue;
                }

                changed.push(self.reveal_single_cell(pos));
                log::trace!(
                    "Cascade revealed cell at {:?}, adjacent mines: {:?}",
                    pos,
                    neighbor.adjacent_mines()
                );

                if neighbor.is_blank() {
                    to_visit.push(pos);
                }
            }
        }

        log::debug!(
            "Cascade from {:?} revealed {} cells",
            origin,
            changed.len()
        );
    }

    fn reveal_single_cell(&mut self, coords: Coord2) -> ChangedCell {
        let cell = self.cell_mut(coords);
        cell.set_state(CellState::Revealed);
        ChangedCell::new(coords, cell)
    }

    /// Flags a hidden cell while the budget lasts, or unflags a flagged one.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagReport> {
        use FlagOutcome::*;

        let coords = self.config().validate_coords(coords)?;

        let outcome = match self.cell_at(coords).state() {
            CellState::Flagged => {
                self.cell_mut(coords).set_state(CellState::Hidden);
                self.return_flag();
                Unflagged
            }
            CellState::Hidden if self.take_flag() => {
                self.cell_mut(coords).set_state(CellState::Flagged);
                Flagged
            }
            CellState::Hidden => {
                log::debug!("No flags left for {:?}", coords);
                NoOp
            }
            CellState::Revealed => NoOp,
        };

        Ok(FlagReport {
            outcome,
            remaining_flags: self.remaining_flags(),
        })
    }

    /// Won when every mine is flagged, or when every safe cell is revealed
    /// while no mine is.
    pub fn check_win(&self) -> bool {
        self.all_mines_flagged() || self.only_mines_unrevealed()
    }

    fn all_mines_flagged(&self) -> bool {
        self.grid()
            .iter()
            .filter(|cell| cell.is_mine())
            .all(|cell| cell.state() == CellState::Flagged)
    }

    /// Unrevealed cells are exactly the mines: every safe cell is open and no mine is.
    fn only_mines_unrevealed(&self) -> bool {
        self.grid()
            .iter()
            .all(|cell| cell.is_mine() == cell.state().is_unrevealed())
    }

    /// Reveals every hidden cell, mines included. Flags stay where they are.
    pub fn reveal_all(&mut self) -> Vec<ChangedCell> {
        let size = self.size();
        let mut changed = Vec::new();
        for x in 0..size {
            for y in 0..size {
                let coords = (x, y);
                if self.cell_at(coords).state() == CellState::Hidden {
                    changed.push(self.reveal_single_cell(coords));
                }
            }
        }
        changed
    }

    /// Closes out a won board: hidden safe cells are revealed and hidden mines
    /// flagged, so the board keeps satisfying [`Board::check_win`].
    pub fn settle_win(&mut self) -> Vec<ChangedCell> {
        let size = self.size();
        let mut changed = Vec::new();
        for x in 0..size {
            for y in 0..size {
                let coords = (x, y);
                let cell = self.cell_at(coords);
                if cell.state() != CellState::Hidden {
                    continue;
                }

                if !cell.is_mine() {
                    changed.push(self.reveal_single_cell(coords));
                } else if self.take_flag() {
                    let cell = self.cell_mut(coords);
                    cell.set_state(CellState::Flagged);
                    changed.push(ChangedCell::new(coords, cell));
                } else {
                    log::warn!("No flag left to mark the mine at {:?}", coords);
                }
            }
        }
        changed
    }
}
