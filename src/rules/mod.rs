//! Game rules shared by both variants
//!
//! - Win lines: every row, column and main diagonal of the board
//! - Win detection per side
//! - Draw detection (full board, no line)

pub mod outcome;
pub mod win;

// Re-exports for convenient access
pub use outcome::{is_terminal, outcome, Outcome};
pub use win::{has_won, win_lines, winner, winning_line, WinLine};
