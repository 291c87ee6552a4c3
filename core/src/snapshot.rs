use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned copy of a board for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord,
    pub mine_count: CellCount,
    pub remaining_flags: CellCount,
    pub cells: Array2<Cell>,
}

impl Snapshot {
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            mine_count: board.mine_count(),
            remaining_flags: board.remaining_flags(),
            cells: board.cells().to_owned(),
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.grid_index())
    }

    /// Cells in row-major `[x, y]` order with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn count_in_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| cell.state() == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_board_maps_revealed_and_flagged_cells() {
        let mut board = Board::from_mine_coords(2, &[(0, 0)]).unwrap();

        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        let snapshot = board.snapshot();

        assert_eq!(snapshot.mine_count, 1);
        assert_eq!(snapshot.remaining_flags, 0);
        assert_eq!(snapshot.cell((1, 1)).unwrap().adjacent_mines(), Some(1));
        assert_eq!(snapshot.cell((1, 1)).unwrap().state(), CellState::Revealed);
        assert_eq!(snapshot.cell((0, 0)).unwrap().state(), CellState::Flagged);
        assert_eq!(snapshot.cell((2, 0)), None);
        assert_eq!(snapshot.count_in_state(CellState::Hidden), 2);
    }

    #[test]
    fn snapshot_is_detached_from_board() {
        let mut board = Board::from_mine_coords(3, &[(2, 2)]).unwrap();
        let snapshot = board.snapshot();

        board.reveal((0, 0)).unwrap();

        assert_eq!(snapshot.count_in_state(CellState::Hidden), 9);
        assert_ne!(snapshot, board.snapshot());
    }

    #[test]
    fn iter_cells_yields_every_coordinate() {
        let board = Board::from_mine_coords(3, &[(1, 2)]).unwrap();
        let snapshot = board.snapshot();

        assert_eq!(snapshot.iter_cells().count(), 9);
        let mines: alloc::vec::Vec<_> = snapshot
            .iter_cells()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .collect();
        assert_eq!(mines, [(1, 2)]);
    }

    #[test]
    fn snapshot_serializes_for_renderers() {
        let board = Board::from_mine_coords(2, &[(0, 1)]).unwrap();

        let json = serde_json::to_string(&board.snapshot()).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, board.snapshot());
        assert!(json.contains("\"Hidden\""));
    }
}
