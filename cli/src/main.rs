use std::time::Duration;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweep_core::{
    CellCount, Coord, DEFAULT_COLS, DEFAULT_MINES, DEFAULT_ROWS, Epoch, Game, GameConfig, GameView,
    Intent, Placement, RandomGridGenerator, Session, TimerCommand,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::command::Command;

mod command;
mod render;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlacementArg {
    Rejection,
    Shuffle,
}

impl From<PlacementArg> for Placement {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Rejection => Placement::Rejection,
            PlacementArg::Shuffle => Placement::Shuffle,
        }
    }
}

/// Play minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: Coord,
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: Coord,
    #[arg(long, default_value_t = DEFAULT_MINES)]
    mines: CellCount,
    /// Seed for mine placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = PlacementArg::Rejection)]
    placement: PlacementArg,
    /// Print the game view as one JSON object per change instead of drawing the board
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// Periodic timer of the current game, tagged with the epoch it ticks for.
struct Ticker {
    epoch: Epoch,
    interval: Interval,
}

impl Ticker {
    fn start(epoch: Epoch) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { epoch, interval }
    }
}

async fn next_tick(ticker: &mut Option<Ticker>) -> Epoch {
    match ticker {
        Some(ticker) => {
            ticker.interval.tick().await;
            ticker.epoch
        }
        None => std::future::pending().await,
    }
}

struct Screen {
    json: bool,
    out: tokio::io::Stdout,
}

impl Screen {
    async fn print(&mut self, text: &str) -> anyhow::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn draw(&mut self, view: &GameView) -> anyhow::Result<()> {
        let text = if self.json {
            serde_json::to_string(view)?
        } else {
            render::board(view)
        };
        self.print(&text).await
    }

    async fn draw_clock(&mut self, view: &GameView) -> anyhow::Result<()> {
        if self.json {
            self.draw(view).await
        } else {
            self.print(&render::header(view)).await
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = GameConfig::new((cli.rows, cli.cols), cli.mines)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!(
        "new session {}x{} with {} mines, seed {}",
        config.size.0,
        config.size.1,
        config.mines,
        seed
    );

    let generator = RandomGridGenerator::new(seed, cli.placement.into());
    let mut session = Session::new(Game::new(config, generator));
    let mut screen = Screen {
        json: cli.json,
        out: tokio::io::stdout(),
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker: Option<Ticker> = None;

    if !cli.json {
        screen.print(command::HELP).await?;
    }
    screen.draw(&session.view()).await?;

    loop {
        let intent = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match command::parse(&line, config.size) {
                    Ok(Command::Act(intent)) => intent,
                    Ok(Command::Redraw) => {
                        screen.draw(&session.view()).await?;
                        continue;
                    }
                    Ok(Command::Help) => {
                        screen.print(command::HELP).await?;
                        continue;
                    }
                    Ok(Command::Quit) => break,
                    Err(err) => {
                        log::warn!("{:#}", err);
                        continue;
                    }
                }
            }
            epoch = next_tick(&mut ticker) => Intent::Tick(epoch),
        };

        let update = session.dispatch(intent)?;
        match update.timer {
            TimerCommand::Start(epoch) => ticker = Some(Ticker::start(epoch)),
            TimerCommand::Stop => ticker = None,
            TimerCommand::Keep => {}
        }

        if !update.changed {
            continue;
        }
        let view = session.view();
        match intent {
            Intent::Tick(_) => screen.draw_clock(&view).await?,
            _ => screen.draw(&view).await?,
        }
        if view.state.is_finished() {
            log::info!("game {:?} after {}s", view.state, view.elapsed);
        }
    }

    Ok(())
}
