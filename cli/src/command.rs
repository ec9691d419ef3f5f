use anyhow::{Context, bail};
use minesweep_core::{Coord, Coord2, Intent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Act(Intent),
    Redraw,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   toggle a flag
  n               new game
  p               redraw the board
  h               this help
  q               quit";

/// Parses one input line. Coordinates are checked against `size` so only cells on the board reach the game.
pub fn parse(line: &str, size: Coord2) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Redraw);
    };

    let command = match verb {
        "r" | "reveal" => Command::Act(Intent::Primary(coords(&mut words, size)?)),
        "f" | "flag" => Command::Act(Intent::Secondary(coords(&mut words, size)?)),
        "n" | "new" => Command::Act(Intent::Reset),
        "p" | "print" => Command::Redraw,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        other => bail!("unknown command {:?}, try h", other),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected argument {:?}", extra);
    }
    Ok(command)
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>, size: Coord2) -> anyhow::Result<Coord2> {
    let row = axis(words.next(), "row", size.0)?;
    let col = axis(words.next(), "column", size.1)?;
    Ok((row, col))
}

fn axis(word: Option<&str>, name: &str, len: Coord) -> anyhow::Result<Coord> {
    let word = word.with_context(|| format!("missing {}", name))?;
    let value: Coord = word
        .parse()
        .with_context(|| format!("{} {:?} is not a number", name, word))?;
    if value >= len {
        bail!("{} {} is off the board (0..{})", name, value, len);
    }
    Ok(value)
}
