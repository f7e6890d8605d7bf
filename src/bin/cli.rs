//! Tic-tac-toe command-line interface
//!
//! Play against the solver in the terminal, or ask it for the best move in a
//! given position.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tictactoe::rules::{outcome, Outcome};
use tictactoe::{Board, BoardError, EngineConfig, Mark, Pos, Solver, Variant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Tic-tac-toe solver for 3x3 and 5x5 boards
#[derive(Parser, Debug)]
#[command(name = "tictactoe-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Board to play on (3x3 or 5x5)
    #[arg(short, long, default_value = "3x3", global = true)]
    variant: Variant,

    /// TOML file overriding the solver settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the computer in the terminal
    Play {
        /// Your mark
        #[arg(long, value_enum, ignore_case = true, default_value = "o")]
        human: Side,

        /// Let the computer make the first move
        #[arg(long)]
        computer_first: bool,
    },

    /// Print the best move for a position, one argument per row
    Solve {
        /// Rows of the board, e.g. "X.O" ".X." "..." ('.', '_', '-' or space for empty)
        #[arg(required = true)]
        rows: Vec<String>,

        /// Side to find a move for
        #[arg(short, long, value_enum, ignore_case = true)]
        player: Side,
    },

    /// Print the effective solver settings as TOML
    ShowConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    X,
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = &result {
        tracing::error!(error = ?e, "Command failed");
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref(), cli.variant)?;
    let solver = Solver::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match cli.command {
        Command::Play {
            human,
            computer_first,
        } => play(
            &mut stdin.lock(),
            &mut stdout.lock(),
            &solver,
            cli.variant,
            human.into(),
            computer_first,
        ),
        Command::Solve { rows, player } => solve(&mut stdout.lock(), &solver, cli.variant, &rows, player.into()),
        Command::ShowConfig => {
            print!("{}", solver.config().to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>, variant: Variant) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path, variant)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            debug!(%variant, "Using default config");
            Ok(EngineConfig::for_variant(variant))
        }
    }
}

/// Interactive game: the human types row and column, the solver replies.
fn play<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    solver: &Solver,
    variant: Variant,
    human: Mark,
    computer_first: bool,
) -> Result<()> {
    let computer = human.opponent();
    let mut board = Board::new(variant);
    let mut turn = if computer_first { computer } else { human };

    writeln!(out, "Tic-tac-toe {variant}: you are {}, the computer is {}", human.symbol(), computer.symbol())?;
    write!(out, "{board}")?;

    loop {
        if turn == human {
            let pos = read_move(input, out, &board)?;
            board.place(pos, human);
        } else {
            writeln!(out, "Computer's turn...")?;
            let result = solver.best_move_with_stats(&board, computer);
            let Some(pos) = result.best_move else {
                bail!("solver found no move on a live board");
            };
            info!(%pos, score = result.score, nodes = result.nodes, time_ms = result.time_ms, "Computer move");
            board.place(pos, computer);
            writeln!(out, "Computer plays {pos}")?;
        }
        writeln!(out)?;
        write!(out, "{board}")?;

        match outcome(&board) {
            Some(Outcome::Win(side)) if side == human => {
                writeln!(out, "You win!")?;
                return Ok(());
            }
            Some(Outcome::Win(_)) => {
                writeln!(out, "The computer wins!")?;
                return Ok(());
            }
            Some(Outcome::Draw) => {
                writeln!(out, "It's a draw.")?;
                return Ok(());
            }
            None => turn = turn.opponent(),
        }
    }
}

/// Prompt until the human names an empty cell on the board
fn read_move<R: BufRead, W: Write>(input: &mut R, out: &mut W, board: &Board) -> Result<Pos> {
    let max = board.size() - 1;
    loop {
        let row = read_number(input, out, &format!("Row (0-{max}): "))?;
        let col = read_number(input, out, &format!("Column (0-{max}): "))?;

        match board.pos(row, col) {
            Ok(pos) if board.is_empty(pos) => return Ok(pos),
            Ok(pos) => writeln!(out, "{}, try again.", BoardError::Occupied { pos })?,
            Err(e) => writeln!(out, "{e}, try again.")?,
        }
    }
}

fn read_number<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<i64> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }
        match line.trim().parse() {
            Ok(n) => return Ok(n),
            Err(_) => writeln!(out, "Please enter a whole number.")?,
        }
    }
}

/// Print the best move for `player` in the given position
fn solve<W: Write>(out: &mut W, solver: &Solver, variant: Variant, rows: &[String], player: Mark) -> Result<()> {
    let mut board = Board::from_rows(variant, rows).context("invalid board")?;

    match board.side_to_move() {
        Ok(expected) if expected != player => {
            warn!(expected = %expected.symbol(), requested = %player.symbol(), "Mark counts suggest the other side is to move");
        }
        Err(e) => warn!(error = %e, "Position could not arise from alternating play"),
        Ok(_) => {}
    }

    writeln!(out, "Initial board:")?;
    writeln!(out, "{board}")?;

    let result = solver.best_move_with_stats(&board, player);
    match result.best_move {
        Some(pos) => {
            info!(score = result.score, nodes = result.nodes, time_ms = result.time_ms, max_depth = ?result.max_depth, "Solved");
            board.place(pos, player);
            writeln!(out, "Best move: {pos}")?;
            writeln!(out, "Updated board after the move:")?;
            writeln!(out, "{board}")?;
        }
        None => {
            writeln!(out, "No valid moves available. Game might be over.")?;
            writeln!(out, "{board}")?;
        }
    }
    Ok(())
}
