use serde::{Deserialize, Serialize};

use crate::*;

/// Generation counter of a session, bumped on every reset.
pub type Epoch = u64;

/// User intent coming from a display adapter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Primary action on a cell, reveals it.
    Primary(Coord2),
    /// Secondary action on a cell, toggles its flag.
    Secondary(Coord2),
    Reset,
    /// Timer tick, stamped with the epoch of the game it was scheduled for.
    Tick(Epoch),
}

/// What the adapter has to do with its periodic timer after an intent was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    Keep,
    /// Start ticking, every tick carrying the given epoch.
    Start(Epoch),
    Stop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Update {
    /// Whether anything visible changed and the adapter should redraw.
    pub changed: bool,
    pub timer: TimerCommand,
}

/// Serialises every intent onto one game.
///
/// Timer ticks may be produced elsewhere (another task, another thread) but only reach the game through
/// [`Session::dispatch`]. A tick scheduled before a reset carries an older epoch and is dropped, so it can never
/// advance the clock of the game that replaced it.
#[derive(Clone, Debug)]
pub struct Session<G = RandomGridGenerator> {
    game: Game<G>,
    epoch: Epoch,
    timer_running: bool,
}

impl<G: GridGenerator> Session<G> {
    pub fn new(game: Game<G>) -> Self {
        Self {
            game,
            epoch: 0,
            timer_running: false,
        }
    }

    pub fn game(&self) -> &Game<G> {
        &self.game
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn view(&self) -> GameView {
        GameView::from_game(&self.game)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Update> {
        log::trace!("dispatch {:?}", intent);

        let changed = match intent {
            Intent::Primary(coords) => self.game.reveal(coords)?.has_update(),
            Intent::Secondary(coords) => self.game.toggle_flag(coords)?.has_update(),
            Intent::Reset => {
                self.game.reset();
                self.epoch += 1;
                true
            }
            Intent::Tick(epoch) if epoch == self.epoch => {
                self.game.tick() == TickOutcome::Advanced
            }
            Intent::Tick(epoch) => {
                log::debug!("dropping stale tick from epoch {}, now {}", epoch, self.epoch);
                false
            }
        };

        Ok(Update {
            changed,
            timer: self.sync_timer(),
        })
    }

    fn sync_timer(&mut self) -> TimerCommand {
        match (self.game.is_live(), self.timer_running) {
            (true, false) => {
                self.timer_running = true;
                TimerCommand::Start(self.epoch)
            }
            (false, true) => {
                self.timer_running = false;
                TimerCommand::Stop
            }
            _ => TimerCommand::Keep,
        }
    }
}
