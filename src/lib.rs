//! Tic-tac-toe solver for 3x3 and 5x5 boards
//!
//! Finds the game-theoretically best move for either side with minimax search:
//! - 3x3, three in a row: solved exactly
//! - 5x5, five in a row: searched to a depth chosen from the number of empty
//!   cells, exact once the board has filled up
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and scoped trial moves
//! - [`rules`]: Win lines and game-over detection
//! - [`search`]: Alpha-beta search, transposition table, depth policy
//! - [`engine`]: Move selection for the side to move
//! - [`config`]: Search settings, loadable from TOML
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{Board, Mark, Solver, Variant};
//!
//! let mut board = Board::new(Variant::Classic);
//! let solver = Solver::for_variant(Variant::Classic);
//!
//! // Computer plays X on an empty board
//! if let Some(pos) = solver.best_move(&board, Mark::X) {
//!     board.place(pos, Mark::X);
//!     println!("Solver plays {pos}");
//! }
//! ```
//!
//! # Search
//!
//! Every empty cell is tried in row-major order; the first cell with the
//! highest score wins. Positions are scored from the mover's point of view
//! and won games score higher the sooner they are won.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Mark, Pos, Variant};
pub use config::EngineConfig;
pub use engine::{select_move, MoveResult, Solver};
pub use error::{BoardError, ConfigError};
