use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Lost,
    Won,
}

impl GameState {
    pub const fn is_not_started(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// Only a game in progress is live: it runs the timer and accepts flags.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Single-player game: owns the grid and mediates every move made on it.
///
/// Moves that make no sense in the current state (revealing a flag, flagging a revealed cell, anything after the game
/// ended) are accepted and reported as `NoChange`. Coordinates outside the grid are rejected with
/// [`GameError::InvalidCoords`].
#[derive(Clone, Debug)]
pub struct Game<G = RandomGridGenerator> {
    config: GameConfig,
    generator: G,
    grid: Grid,
    revealed_count: CellCount,
    flag_budget: i32,
    elapsed: u16,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Game<RandomGridGenerator> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RandomGridGenerator::new(seed, Placement::default()))
    }
}

impl<G: GridGenerator> Game<G> {
    pub fn new(config: GameConfig, mut generator: G) -> Self {
        let grid = generator.generate(config);
        Self::from_parts(config, generator, grid)
    }

    /// Starts from a prepared grid, `generator` is only used on reset or to move a first click off a mine.
    ///
    /// A grid that already has revealed safe cells resumes in progress, with its flags taken off the budget.
    pub fn with_grid(grid: Grid, generator: G) -> Self {
        Self::from_parts(grid.game_config(), generator, grid)
    }

    fn from_parts(config: GameConfig, generator: G, grid: Grid) -> Self {
        let revealed_count = grid
            .iter()
            .filter(|(_, cell)| cell.is_revealed() && !cell.is_mine())
            .count() as CellCount;
        let flagged: i32 = grid.count_in_state(CellState::Flagged).into();
        let state = if revealed_count > 0 {
            GameState::InProgress
        } else {
            GameState::NotStarted
        };

        Self {
            config,
            generator,
            grid,
            revealed_count,
            flag_budget: i32::from(config.mines) - flagged,
            elapsed: 0,
            state,
            triggered_mine: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords]
    }

    /// Displayed mine counter; drops with every flag placed and may go negative.
    pub fn flag_budget(&self) -> i32 {
        self.flag_budget
    }

    pub fn elapsed(&self) -> u16 {
        self.elapsed
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;

        if self.state.is_finished() || !self.grid[coords].is_hidden() {
            return Ok(NoChange);
        }

        if self.state.is_not_started() {
            self.make_safe_start(coords);
            self.state = GameState::InProgress;
            log::debug!("game started at {:?}", coords);
        }

        let cell = self.grid[coords];
        if cell.is_mine() {
            self.lose(coords);
            return Ok(HitMine);
        }

        if cell.value.is_empty() {
            self.revealed_count += open_multiple_cells(&mut self.grid, coords);
        } else {
            self.grid.cell_mut(coords).state = CellState::Revealed;
            self.revealed_count += 1;
        }

        if self.revealed_count >= self.grid.safe_cell_count() {
            self.win();
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.grid.validate_coords(coords)?;

        if !self.state.is_live() {
            log::trace!("flag at {:?} ignored, game is {:?}", coords, self.state);
            return Ok(NoChange);
        }

        let cell = self.grid.cell_mut(coords);
        Ok(match cell.state {
            Hidden => {
                cell.state = Flagged;
                self.flag_budget -= 1;
                Changed
            }
            Flagged => {
                cell.state = Hidden;
                self.flag_budget += 1;
                Changed
            }
            Revealed => NoChange,
        })
    }

    /// Throws the current game away and deals a fresh grid.
    pub fn reset(&mut self) {
        self.grid = self.generator.generate(self.config);
        self.revealed_count = 0;
        self.flag_budget = self.config.mines.into();
        self.elapsed = 0;
        self.state = GameState::NotStarted;
        self.triggered_mine = None;
        log::debug!("game reset");
    }

    /// Advances the timer by one second while the game is live, up to [`MAX_ELAPSED`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.is_live() && self.elapsed < MAX_ELAPSED {
            self.elapsed += 1;
            TickOutcome::Advanced
        } else {
            TickOutcome::Idle
        }
    }

    fn make_safe_start(&mut self, coords: Coord2) {
        let mut attempts = 0u32;
        while self.grid.contains_mine(coords) {
            self.grid = self.generator.generate(self.config);
            attempts += 1;
        }
        if attempts > 0 {
            log::debug!(
                "regenerated grid {} times to keep {:?} safe",
                attempts,
                coords
            );
        }
    }

    fn lose(&mut self, coords: Coord2) {
        self.grid.cell_mut(coords).highlighted = true;
        for cell in self.grid.cells_mut().filter(|cell| cell.is_mine()) {
            cell.state = CellState::Revealed;
        }
        self.triggered_mine = Some(coords);
        self.state = GameState::Lost;
        log::debug!("game lost at {:?} after {}s", coords, self.elapsed);
    }

    fn win(&mut self) {
        for cell in self.grid.cells_mut().filter(|cell| cell.is_mine()) {
            cell.state = CellState::Flagged;
        }
        self.state = GameState::Won;
        log::debug!("game won after {}s", self.elapsed);
    }
}
