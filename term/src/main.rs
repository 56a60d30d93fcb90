use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minesweeper_core::{CascadeMode, Coord2, GameBoard, GameConfig, RevealResult};
use serde::Serialize;

mod command;
mod render;

use command::Command;

#[derive(ValueEnum, Copy, Clone, Debug, Default)]
enum Cascade {
    #[default]
    FloodFill,
    SingleRing,
}

impl From<Cascade> for CascadeMode {
    fn from(cascade: Cascade) -> Self {
        match cascade {
            Cascade::FloodFill => CascadeMode::FloodFill,
            Cascade::SingleRing => CascadeMode::SingleRing,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Board width, clamped to 1..=10
    #[arg(long, default_value = "8", allow_hyphen_values = true)]
    width: String,

    /// Board height, clamped to 1..=10
    #[arg(long, default_value = "8", allow_hyphen_values = true)]
    height: String,

    /// Number of mines, clamped to leave one safe cell
    #[arg(long, default_value = "8", allow_hyphen_values = true)]
    mines: String,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How far revealing a zero cell spreads
    #[arg(long, value_enum, default_value_t)]
    cascade: Cascade,

    /// Move a mine away if the first reveal would hit it
    #[arg(long)]
    safe_first_move: bool,

    /// Print one JSON event per line instead of drawing the board
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event<'a> {
    NewGame { config: &'a GameConfig },
    Reveal { result: &'a RevealResult },
    MinesRevealed { positions: &'a [Coord2] },
    Error { message: String },
}

struct Session {
    board: GameBoard,
    args: Args,
}

impl Session {
    fn new(args: Args) -> Self {
        let seed = args.seed.unwrap_or_else(rand::random);
        log::debug!("seed: {seed}");
        let board = GameBoard::new(seed)
            .with_cascade_mode(args.cascade.into())
            .with_safe_first_move(args.safe_first_move);
        Self { board, args }
    }

    fn emit(&self, out: &mut impl Write, event: &Event<'_>) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
        Ok(())
    }

    fn report_error(&self, out: &mut impl Write, message: String) -> Result<()> {
        if self.args.json {
            self.emit(out, &Event::Error { message })
        } else {
            writeln!(out, "error: {message}")?;
            Ok(())
        }
    }

    fn show(&self, out: &mut impl Write) -> Result<()> {
        write!(out, "{}", render::BoardView(&self.board))?;
        Ok(())
    }

    fn new_game(&mut self, out: &mut impl Write) -> Result<()> {
        let config = self.board.configure_from_text(
            &self.args.width,
            &self.args.height,
            &self.args.mines,
        )?;
        self.board.place_mines()?;
        log::info!(
            "New game: {}x{} with {} mines",
            config.width(),
            config.height(),
            config.mines
        );

        if self.args.json {
            self.emit(out, &Event::NewGame { config: &config })
        } else {
            self.show(out)
        }
    }

    fn reveal(&mut self, out: &mut impl Write, coords: Coord2) -> Result<()> {
        let result = match self.board.reveal(coords) {
            Ok(result) => result,
            Err(err) => return self.report_error(out, err.to_string()),
        };
        let mines = if result.triggered_mine {
            self.board.reveal_all_mines()
        } else {
            Vec::new()
        };

        if self.args.json {
            self.emit(out, &Event::Reveal { result: &result })?;
            if !mines.is_empty() {
                self.emit(out, &Event::MinesRevealed { positions: &mines })?;
            }
            return Ok(());
        }

        self.show(out)?;
        if result.triggered_mine {
            writeln!(out, "Boom! Type `new` to play again.")?;
        } else if result.won {
            writeln!(out, "All safe cells cleared, you win! Type `new` to play again.")?;
        }
        Ok(())
    }

    /// Returns `false` once the player asks to quit.
    fn handle(&mut self, out: &mut impl Write, line: &str) -> Result<bool> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(true),
            Err(err) => {
                self.report_error(out, format!("{err:#}"))?;
                return Ok(true);
            }
        };

        match command {
            Command::Reveal(coords) => self.reveal(out, coords)?,
            Command::NewGame => self.new_game(out)?,
            Command::Show => self.show(out)?,
            Command::Help => writeln!(out, "{}", command::HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut session = Session::new(args);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    session.new_game(&mut out)?;
    if !session.args.json {
        writeln!(out, "{}", command::HELP)?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !session.handle(&mut out, &line)? {
            break;
        }
        out.flush()?;
    }

    log::debug!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(extra: &[&str]) -> Session {
        let mut argv = vec!["minesweeper", "--seed", "7"];
        argv.extend_from_slice(extra);
        Session::new(Args::try_parse_from(argv).unwrap())
    }

    fn run(session: &mut Session, lines: &[&str]) -> String {
        let mut out = Vec::new();
        session.new_game(&mut out).unwrap();
        for line in lines {
            if !session.handle(&mut out, line).unwrap() {
                break;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn defaults_match_text_box_values() {
        let session = session(&[]);
        assert_eq!(session.args.width, "8");
        assert_eq!(session.args.height, "8");
        assert_eq!(session.args.mines, "8");
        assert_eq!(session.board.cascade_mode(), CascadeMode::FloodFill);
    }

    #[test]
    fn json_mode_reports_new_game_and_reveal() {
        let mut session = session(&["--json", "--width", "3", "--height", "3", "--mines", "0"]);

        let output = run(&mut session, &["1 1"]);
        let events: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events[0]["event"], "new_game");
        assert_eq!(events[0]["config"]["size"][0], 3);
        assert_eq!(events[1]["event"], "reveal");
        assert_eq!(events[1]["result"]["won"], true);
        assert_eq!(
            events[1]["result"]["revealed_cells"].as_array().unwrap().len(),
            9
        );
    }

    #[test]
    fn bad_commands_do_not_end_the_session() {
        let mut session = session(&["--width", "2", "--height", "2", "--mines", "0"]);

        let output = run(&mut session, &["x", "5 5", "quit", "0 0"]);

        assert!(output.contains("error: missing y coordinate"));
        assert!(output.contains("error: Position (5, 5) is outside the board"));
        assert_eq!(session.board.revealed_safe_count(), 0);
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        let mut session = session(&["--width", "wide"]);
        let mut out = Vec::new();

        let err = session.new_game(&mut out).unwrap_err();

        assert_eq!(err.to_string(), "Field `width` is not a valid integer");
    }

    #[test]
    fn negative_values_are_clamped() {
        let mut session = session(&["--width", "-4", "--height", "20", "--mines", "-1"]);
        let mut out = Vec::new();

        session.new_game(&mut out).unwrap();

        assert_eq!(session.board.size(), (1, 10));
        assert_eq!(session.board.mine_count(), 0);
    }

    #[test]
    fn single_ring_flag_reaches_board() {
        let session = session(&["--cascade", "single-ring", "--safe-first-move"]);
        assert_eq!(session.board.cascade_mode(), CascadeMode::SingleRing);
    }
}
