use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One grid position. The hint is `None` for mines and for cells whose
/// board has not computed hints yet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    state: CellState,
    adjacent_mines: Option<u8>,
}

impl Cell {
    pub(crate) const fn new(is_mine: bool) -> Self {
        Self {
            is_mine,
            state: CellState::Hidden,
            adjacent_mines: None,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Number of mines among the neighbors, `None` for mine cells.
    pub const fn adjacent_mines(&self) -> Option<u8> {
        self.adjacent_mines
    }

    /// Non-mine cell without any adjacent mine, the seed of a cascade.
    pub const fn is_blank(&self) -> bool {
        matches!(self.adjacent_mines, Some(0))
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        debug_assert!(!self.is_mine, "mines do not carry a hint");
        self.adjacent_mines = Some(count);
    }
}
