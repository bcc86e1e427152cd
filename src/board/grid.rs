//! Hexagonal board addressed as offset rows.
//!
//! Cells are stored row-major (`row * cols + col`). Rows are offset so each
//! hexagon touches two cells in the row above or below, and which of the two
//! neighboring rows it reaches diagonally depends on row parity: even rows
//! reach up (`row - 1`), odd rows reach down (`row + 1`).

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::cell::Cell;
use crate::core::{ConfigurationError, GameRng, PlayerId, PlayerMap};

/// Board position `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Up to six neighbors of a hexagon.
pub type Neighbors = SmallVec<[Coord; 6]>;

/// Straight offsets shared by every row.
const STRAIGHT: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coord`, returning a value only when it remains in bounds.
fn apply_delta(coord: Coord, delta: (isize, isize), rows: usize, cols: usize) -> Option<Coord> {
    let row = coord.row.checked_add_signed(delta.0)?;
    if row >= rows {
        return None;
    }
    let col = coord.col.checked_add_signed(delta.1)?;
    if col >= cols {
        return None;
    }
    Some(Coord { row, col })
}

/// Fixed-size board of cells.
///
/// Backed by `im::Vector` so that policies can clone a board to try a move
/// without copying every cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vector<Cell>,
}

impl Grid {
    /// Build a board and disable `disabled_count` distinct cells chosen
    /// uniformly at random.
    ///
    /// Sampling draws any cell and retries when it lands on one already
    /// disabled.
    pub fn new(
        rows: usize,
        cols: usize,
        disabled_count: usize,
        rng: &mut GameRng,
    ) -> Result<Self, ConfigurationError> {
        let mut grid = Self::empty(rows, cols)?;
        let capacity = grid.cell_count();
        if disabled_count > capacity {
            log::warn!(
                "Cannot disable {} cells on a {}x{} board",
                disabled_count,
                rows,
                cols
            );
            return Err(ConfigurationError::TooManyDisabledCells {
                requested: disabled_count,
                capacity,
            });
        }

        let mut chosen = FxHashSet::default();
        while chosen.len() < disabled_count {
            let index = rng.gen_index(capacity);
            if chosen.insert(index) {
                grid.cells.set(index, Cell::Disabled);
            }
        }

        log::debug!(
            "Built {}x{} board with {} disabled cells",
            rows,
            cols,
            disabled_count
        );
        Ok(grid)
    }

    /// Build a board with an explicit disabled-cell layout.
    pub fn with_disabled(
        rows: usize,
        cols: usize,
        disabled: &[Coord],
    ) -> Result<Self, ConfigurationError> {
        let mut grid = Self::empty(rows, cols)?;
        for &coord in disabled {
            let index = grid
                .index_of(coord)
                .ok_or(ConfigurationError::DisabledCellOutOfBounds(coord))?;
            if grid.cells[index].is_disabled() {
                return Err(ConfigurationError::DuplicateDisabledCell(coord));
            }
            grid.cells.set(index, Cell::Disabled);
        }
        Ok(grid)
    }

    fn empty(rows: usize, cols: usize) -> Result<Self, ConfigurationError> {
        let capacity = rows
            .checked_mul(cols)
            .filter(|&n| n > 0)
            .ok_or(ConfigurationError::EmptyBoard)?;
        Ok(Self {
            rows,
            cols,
            cells: (0..capacity).map(|_| Cell::Empty).collect(),
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, disabled ones included.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Flat index (`row * cols + col`) of an in-bounds coordinate.
    #[must_use]
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    #[must_use]
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index_of(coord).map(|index| self.cells[index])
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        if let Some(index) = self.index_of(coord) {
            self.cells.set(index, cell);
        }
    }

    /// All cells with their coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &cell)| (self.coord_of(index), cell))
    }

    /// In-bounds hex neighbors of `coord`.
    ///
    /// Order: up, down, left, right, then the two parity-dependent diagonals.
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> Neighbors {
        let diagonal_row = if coord.row % 2 == 0 { -1 } else { 1 };
        let diagonals = [(diagonal_row, -1), (diagonal_row, 1)];

        STRAIGHT
            .iter()
            .chain(diagonals.iter())
            .filter_map(|&delta| apply_delta(coord, delta, self.rows, self.cols))
            .collect()
    }

    /// Cells that are neither disabled nor occupied.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.cells()
            .filter(|(_, cell)| cell.is_playable())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// True when every cell is disabled or occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_playable())
    }

    #[must_use]
    pub fn disabled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_disabled()).count()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Sum of cell values per owner, from a full scan.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        let mut scores = PlayerMap::with_value(0u32);
        for cell in self.cells.iter() {
            if let Cell::Occupied { owner, value } = *cell {
                scores[owner] += value;
            }
        }
        scores
    }

    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> u32 {
        self.scores()[player]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut coords: Neighbors) -> Vec<Coord> {
        coords.sort();
        coords.into_vec()
    }

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_new_disables_exact_count() {
        let mut rng = GameRng::new(42);
        for count in [0, 4, 6, 8, 80] {
            let grid = Grid::new(8, 10, count, &mut rng).unwrap();
            assert_eq!(grid.cell_count(), 80);
            assert_eq!(grid.disabled_count(), count);
            assert_eq!(grid.occupied_count(), 0);
        }
    }

    #[test]
    fn test_new_rejects_overfull() {
        let mut rng = GameRng::new(42);
        assert_eq!(
            Grid::new(2, 2, 5, &mut rng),
            Err(ConfigurationError::TooManyDisabledCells {
                requested: 5,
                capacity: 4,
            })
        );
        assert_eq!(Grid::new(0, 10, 0, &mut rng), Err(ConfigurationError::EmptyBoard));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Grid::new(8, 10, 8, &mut GameRng::new(9)).unwrap();
        let b = Grid::new(8, 10, 8, &mut GameRng::new(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_with_disabled() {
        let grid = Grid::with_disabled(8, 10, &[c(0, 0), c(7, 9)]).unwrap();
        assert_eq!(grid.get(c(0, 0)), Some(Cell::Disabled));
        assert_eq!(grid.get(c(7, 9)), Some(Cell::Disabled));
        assert_eq!(grid.disabled_count(), 2);

        assert_eq!(
            Grid::with_disabled(8, 10, &[c(1, 1), c(1, 1)]),
            Err(ConfigurationError::DuplicateDisabledCell(c(1, 1)))
        );
        assert_eq!(
            Grid::with_disabled(8, 10, &[c(8, 0)]),
            Err(ConfigurationError::DisabledCellOutOfBounds(c(8, 0)))
        );
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::with_disabled(8, 10, &[]).unwrap();
        assert_eq!(grid.index_of(c(3, 4)), Some(34));
        assert_eq!(grid.coord_of(34), c(3, 4));
        assert_eq!(grid.index_of(c(3, 10)), None);
        assert_eq!(grid.get(c(8, 0)), None);
    }

    #[test]
    fn test_neighbors_even_row_reach_up() {
        let grid = Grid::with_disabled(8, 10, &[]).unwrap();
        assert_eq!(
            sorted(grid.neighbors(c(2, 5))),
            vec![c(1, 4), c(1, 5), c(1, 6), c(2, 4), c(2, 6), c(3, 5)]
        );
    }

    #[test]
    fn test_neighbors_odd_row_reach_down() {
        let grid = Grid::with_disabled(8, 10, &[]).unwrap();
        assert_eq!(
            sorted(grid.neighbors(c(3, 5))),
            vec![c(2, 5), c(3, 4), c(3, 6), c(4, 4), c(4, 5), c(4, 6)]
        );
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        let grid = Grid::with_disabled(8, 10, &[]).unwrap();
        // Row 0 is even: its diagonals point off the top edge.
        assert_eq!(sorted(grid.neighbors(c(0, 0))), vec![c(0, 1), c(1, 0)]);
        // Row 7 is odd: its diagonals point off the bottom edge.
        assert_eq!(sorted(grid.neighbors(c(7, 9))), vec![c(6, 9), c(7, 8)]);
        assert_eq!(
            sorted(grid.neighbors(c(1, 0))),
            vec![c(0, 0), c(1, 1), c(2, 0), c(2, 1)]
        );
    }

    #[test]
    fn test_legal_moves_and_full() {
        let mut grid = Grid::with_disabled(1, 3, &[c(0, 1)]).unwrap();
        assert_eq!(grid.legal_moves(), vec![c(0, 0), c(0, 2)]);
        assert!(!grid.is_full());

        grid.set(c(0, 0), Cell::Occupied { owner: PlayerId::FIRST, value: 3 });
        grid.set(c(0, 2), Cell::Occupied { owner: PlayerId::SECOND, value: 4 });
        assert!(grid.legal_moves().is_empty());
        assert!(grid.is_full());
    }

    #[test]
    fn test_scores_full_scan() {
        let mut grid = Grid::with_disabled(2, 2, &[]).unwrap();
        grid.set(c(0, 0), Cell::Occupied { owner: PlayerId::FIRST, value: 3 });
        grid.set(c(0, 1), Cell::Occupied { owner: PlayerId::FIRST, value: 7 });
        grid.set(c(1, 1), Cell::Occupied { owner: PlayerId::SECOND, value: 11 });

        let scores = grid.scores();
        assert_eq!(scores[PlayerId::FIRST], 10);
        assert_eq!(scores[PlayerId::SECOND], 11);
        assert_eq!(grid.score_of(PlayerId::SECOND), 11);
    }
}
