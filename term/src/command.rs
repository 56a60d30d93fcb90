use anyhow::{Context, Result, bail};
use minesweeper_core::{Coord, Coord2};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    NewGame,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses a line, blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(None);
        };

        let command = match first {
            "new" | "n" => Self::NewGame,
            "show" | "s" => Self::Show,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "reveal" | "r" => {
                let x = words.next().context("missing x coordinate")?;
                let y = words.next().context("missing y coordinate")?;
                Self::Reveal((parse_coord(x)?, parse_coord(y)?))
            }
            x => {
                let y = words.next().context("missing y coordinate")?;
                Self::Reveal((parse_coord(x)?, parse_coord(y)?))
            }
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument `{extra}`");
        }
        Ok(Some(command))
    }
}

fn parse_coord(text: &str) -> Result<Coord> {
    text.parse()
        .with_context(|| format!("`{text}` is not a valid coordinate"))
}

pub const HELP: &str = "\
commands:
  <x> <y> | r <x> <y>   reveal a cell
  new                   start a new game
  show                  print the board
  quit                  leave";
