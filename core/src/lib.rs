#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod reveal;
mod session;
mod tile;
mod types;
mod view;

/// Rows of the classic expert board.
pub const DEFAULT_ROWS: Coord = 16;
/// Columns of the classic expert board.
pub const DEFAULT_COLS: Coord = 30;
pub const DEFAULT_MINES: CellCount = 99;

/// Upper bound of the game timer, in seconds.
pub const MAX_ELAPSED: u16 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checked constructor: the grid must be non-empty and keep at least one safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((DEFAULT_ROWS, DEFAULT_COLS), DEFAULT_MINES)
    }
}

/// Rectangular array of cells holding both the mine layout and what the player sees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// Builds a grid from a mine mask, computing adjacency counts for every safe cell.
    ///
    /// Both dimensions must be addressable by a [`Coord`].
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if Coord::try_from(rows).is_err() || Coord::try_from(cols).is_err() {
            return Err(GameError::InvalidCoords);
        }
        Ok(Self::from_valid_mask(mine_mask))
    }

    /// Mask dimensions must already fit in a [`Coord2`].
    pub(crate) fn from_valid_mask(mine_mask: &Array2<bool>) -> Self {
        let mut cells: Array2<Cell> = Array2::default(mine_mask.dim());
        let mut mine_count: CellCount = 0;

        for (index, cell) in cells.indexed_iter_mut() {
            if mine_mask[index] {
                cell.value = CellValue::Mine;
                mine_count += 1;
            }
        }

        let mut grid = Self { cells, mine_count };
        grid.fill_adjacent_counts();
        grid
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_valid_mask(&mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            rows.try_into().expect("grid rows fit in Coord"),
            cols.try_into().expect("grid cols fit in Coord"),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| {
                let coords = (
                    row.try_into().expect("grid rows fit in Coord"),
                    col.try_into().expect("grid cols fit in Coord"),
                );
                (coords, cell)
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub fn count_in_state(&self, state: CellState) -> CellCount {
        self.cells.iter().filter(|cell| cell.state == state).count() as CellCount
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub(crate) fn fill_adjacent_counts(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self[coords].is_mine() {
                    continue;
                }
                let count = self.adjacent_mine_count(coords);
                self.cell_mut(coords).value = CellValue::from_count(count);
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Game not live or timer already at its cap.
    Idle,
    Advanced,
}
