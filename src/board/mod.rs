//! Board representation for the 3x3 and 5x5 variants

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, Trial};

use crate::error::BoardError;

/// Largest supported board side (5x5)
pub const MAX_SIZE: usize = 5;
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE; // 25

/// Cell marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    /// Get the opposing side
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Character used for text rendering
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => '.',
        }
    }

    /// Parse a cell character. `.`, `_`, `-` and space are empty.
    pub fn from_char(c: char) -> Option<Mark> {
        match c.to_ascii_uppercase() {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            '.' | '_' | '-' | ' ' => Some(Mark::Empty),
            _ => None,
        }
    }
}

/// Game variant: board side and the run length needed to win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// 3x3, three in a row
    #[default]
    Classic,
    /// 5x5, five in a row
    Gomoku,
}

impl Variant {
    /// Board side length
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Variant::Classic => 3,
            Variant::Gomoku => 5,
        }
    }

    /// Marks in a line needed to win
    #[inline]
    pub const fn win_length(self) -> usize {
        // Both variants win by filling a whole row, column or diagonal
        self.size()
    }

    #[inline]
    pub const fn cells(self) -> usize {
        self.size() * self.size()
    }

    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Gomoku];
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.size())
    }
}

impl std::str::FromStr for Variant {
    type Err = BoardError;

    /// Accepts `3x3`/`classic`/`3` and `5x5`/`gomoku`/`5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3x3" | "3" | "classic" | "tictactoe" => Ok(Variant::Classic),
            "5x5" | "5" | "gomoku" => Ok(Variant::Gomoku),
            _ => Err(BoardError::UnknownVariant { name: s.to_string() }),
        }
    }
}

/// Position on the board
///
/// Field order gives the derived `Ord` row-major ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < MAX_SIZE && (col as usize) < MAX_SIZE);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        row >= 0 && row < size as i32 && col >= 0 && col < size as i32
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
