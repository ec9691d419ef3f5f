use std::fmt::Write;

use minesweep_core::{Cell, CellState, CellValue, GameState, GameView};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Smile,
    Lost,
    Won,
}

impl Face {
    pub fn for_state(state: GameState) -> Self {
        match state {
            GameState::NotStarted | GameState::InProgress => Self::Smile,
            GameState::Lost => Self::Lost,
            GameState::Won => Self::Won,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smile => ":)",
            Self::Lost => ":(",
            Self::Won => "B)",
        }
    }
}

/// Three character counter, as on the classic seven-segment display.
pub fn counter(value: i32) -> String {
    if value < 0 {
        format!("-{:02}", value.unsigned_abs().min(99))
    } else {
        format!("{:03}", value.min(999))
    }
}

fn cell_glyph(cell: Cell) -> char {
    match (cell.state, cell.value) {
        (CellState::Hidden, _) => '.',
        (CellState::Flagged, _) => 'F',
        (CellState::Revealed, CellValue::Mine) if cell.highlighted => 'X',
        (CellState::Revealed, CellValue::Mine) => '*',
        (CellState::Revealed, CellValue::Empty) => ' ',
        (CellState::Revealed, CellValue::Adjacent(count)) => char::from(b'0' + count),
    }
}

pub fn header(view: &GameView) -> String {
    format!(
        "[{}]  {}  [{}]",
        counter(view.flag_budget),
        Face::for_state(view.state).as_str(),
        counter(view.elapsed.into()),
    )
}

pub fn board(view: &GameView) -> String {
    let (_, cols) = view.size();
    let mut out = header(view);
    out.push('\n');

    out.push_str("   ");
    for col in 0..cols {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for (row, cells) in view.grid.rows().enumerate() {
        let _ = write!(out, "{:>3}", row);
        for &cell in cells.iter() {
            let _ = write!(out, "{:>3}", cell_glyph(cell));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweep_core::{Game, Grid, Placement, RandomGridGenerator};

    fn view_after(mines: &[(u8, u8)], reveals: &[(u8, u8)]) -> GameView {
        let grid = Grid::from_mine_coords((2, 3), mines).unwrap();
        let mut game = Game::with_grid(grid, RandomGridGenerator::new(1, Placement::Rejection));
        for &coords in reveals {
            game.reveal(coords).unwrap();
        }
        GameView::from_game(&game)
    }

    #[test]
    fn counter_pads_and_clamps() {
        assert_eq!(counter(99), "099");
        assert_eq!(counter(0), "000");
        assert_eq!(counter(1000), "999");
        assert_eq!(counter(-5), "-05");
        assert_eq!(counter(-250), "-99");
    }

    #[test]
    fn face_follows_state() {
        assert_eq!(Face::for_state(GameState::NotStarted), Face::Smile);
        assert_eq!(Face::for_state(GameState::Lost), Face::Lost);
        assert_eq!(Face::for_state(GameState::Won), Face::Won);
    }

    #[test]
    fn board_marks_triggered_mine() {
        let view = view_after(&[(0, 0), (0, 2)], &[(1, 1), (0, 0)]);

        let text = board(&view);

        assert!(text.starts_with("[002]  :(  [000]\n"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[2], "  0  X  .  *");
        assert_eq!(lines[3], "  1  .  2  .");
    }
}
