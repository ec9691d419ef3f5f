use serde::{Deserialize, Serialize};

/// Ground truth of a cell, fixed once the grid is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Adjacent(u8),
    Mine,
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Value of a safe cell with `count` mine neighbours.
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Empty,
            n => Self::Adjacent(n),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub state: CellState,
    /// Set only on the mine that ended the game.
    pub highlighted: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.value.is_mine()
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }
}
