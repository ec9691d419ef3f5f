use serde::{Deserialize, Serialize};

use crate::*;

/// Read model handed to renderers: everything needed to draw a frame, nothing to mutate the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub grid: Grid,
    pub elapsed: u16,
    pub flag_budget: i32,
    pub state: GameState,
    pub is_live: bool,
}

impl GameView {
    pub fn from_game<G: GridGenerator>(game: &Game<G>) -> Self {
        Self {
            grid: game.grid().clone(),
            elapsed: game.elapsed(),
            flag_budget: game.flag_budget(),
            state: game.state(),
            is_live: game.is_live(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_tracks_game() {
        let grid = Grid::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        let mut game = Game::with_grid(grid, RandomGridGenerator::new(0, Placement::Rejection));
        game.reveal((1, 1)).unwrap();
        game.tick();

        let view = GameView::from_game(&game);

        assert_eq!(view.size(), (2, 3));
        assert_eq!(view.state, GameState::InProgress);
        assert!(view.is_live);
        assert_eq!(view.elapsed, 1);
        assert_eq!(view.flag_budget, 1);
        assert_eq!(view.cell_at((1, 1)).state, CellState::Revealed);
    }

    #[test]
    fn view_serializes_cells_for_renderers() {
        let grid = Grid::from_mine_coords((1, 2), &[(0, 1)]).unwrap();
        let game = Game::with_grid(grid, RandomGridGenerator::new(0, Placement::Rejection));

        let json = serde_json::to_value(GameView::from_game(&game)).unwrap();

        assert_eq!(json["state"], "NotStarted");
        assert_eq!(json["flag_budget"], 1);
        assert_eq!(json["is_live"], false);
        let cells = &json["grid"]["cells"]["data"];
        assert_eq!(cells[0]["value"]["Adjacent"], 1);
        assert_eq!(cells[1]["value"], "Mine");
        assert_eq!(cells[1]["state"], "Hidden");
    }
}
