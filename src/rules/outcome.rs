//! Game-over detection

use crate::board::{Board, Mark};

use super::win::winner;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side owns a complete line
    Win(Mark),
    /// Board full with no line
    Draw,
}

/// `Some` once the position is decided
pub fn outcome(board: &Board) -> Option<Outcome> {
    if let Some(side) = winner(board) {
        return Some(Outcome::Win(side));
    }
    if board.is_full() {
        return Some(Outcome::Draw);
    }
    None
}

/// True if the game is over (won or drawn)
#[inline]
pub fn is_terminal(board: &Board) -> bool {
    outcome(board).is_some()
}
