use ndarray::Array2;

/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag budgets and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Converts board coordinates into an `ndarray` index.
pub trait GridIndex {
    fn grid_index(self) -> [usize; 2];
}

impl GridIndex for Coord2 {
    fn grid_index(self) -> [usize; 2] {
        [usize::from(self.0), usize::from(self.1)]
    }
}

/// Number of cells on a square board with the given side.
pub const fn cell_capacity(side: Coord) -> CellCount {
    // 255 * 255 still fits a u16
    side as CellCount * side as CellCount
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        // grids are only ever allocated from `Coord` sized configs
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(center, bounds)
    }
}

/// Inclusive `[low, high]` window of one axis around `center`, clipped to `0..bound`.
fn axis_window(center: Coord, bound: Coord) -> Option<(Coord, Coord)> {
    (center < bound).then(|| (center.saturating_sub(1), center.saturating_add(1).min(bound - 1)))
}

/// Walks the 3x3 window around a cell, clipped to the board, skipping the
/// cell itself: 3 neighbors for corners, 5 for edges, 8 otherwise.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    x_window: (Coord, Coord),
    y_window: (Coord, Coord),
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let windows = axis_window(center.0, bounds.0).zip(axis_window(center.1, bounds.1));
        match windows {
            Some((x_window, y_window)) => Self {
                center,
                x_window,
                y_window,
                cursor: Some((x_window.0, y_window.0)),
            },
            None => Self {
                center,
                x_window: (0, 0),
                y_window: (0, 0),
                cursor: None,
            },
        }
    }

    fn advance(&mut self, (x, y): Coord2) {
        self.cursor = if y < self.y_window.1 {
            Some((x, y + 1))
        } else if x < self.x_window.1 {
            Some((x + 1, self.y_window.0))
        } else {
            None
        };
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.cursor {
            self.advance(current);
            if current != self.center {
                return Some(current);
            }
        }
        None
    }
}
