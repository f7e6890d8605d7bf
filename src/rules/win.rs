//! Win lines and win detection
//!
//! A side wins when it owns every cell of one win line: a full row, a full
//! column, or one of the two main diagonals. Both variants need the whole
//! line (3 on 3x3, 5 on 5x5), so the line set is generated once per variant
//! and scanned as bitmasks.

use std::sync::OnceLock;

use crate::board::{Bitboard, Board, Mark, Pos, Variant};

/// A fixed K-tuple of coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinLine {
    /// Cells from one end of the line to the other
    pub cells: Vec<Pos>,
    /// The same cells as a mask for the variant's board size
    pub mask: Bitboard,
}

/// Direction vectors for line generation
const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

static CLASSIC_LINES: OnceLock<Vec<WinLine>> = OnceLock::new();
static GOMOKU_LINES: OnceLock<Vec<WinLine>> = OnceLock::new();

/// All win lines for a variant. Built on first use, shared afterwards.
pub fn win_lines(variant: Variant) -> &'static [WinLine] {
    let cell = match variant {
        Variant::Classic => &CLASSIC_LINES,
        Variant::Gomoku => &GOMOKU_LINES,
    };
    cell.get_or_init(|| generate_lines(variant.size(), variant.win_length()))
}

/// Every run of `k` cells in the four directions on a `size` board
fn generate_lines(size: usize, k: usize) -> Vec<WinLine> {
    let mut lines = Vec::new();
    for &(dr, dc) in &DIRECTIONS {
        for r in 0..size as i32 {
            for c in 0..size as i32 {
                let end_r = r + dr * (k as i32 - 1);
                let end_c = c + dc * (k as i32 - 1);
                if !Pos::is_valid(end_r, end_c, size) {
                    continue;
                }
                let cells: Vec<Pos> = (0..k as i32)
                    .map(|i| Pos::new((r + dr * i) as u8, (c + dc * i) as u8))
                    .collect();
                let mut mask = Bitboard::new();
                for pos in &cells {
                    mask.set(pos.to_index(size));
                }
                lines.push(WinLine { cells, mask });
            }
        }
    }
    lines
}

/// Check if `side` owns a complete win line
#[inline]
pub fn has_won(board: &Board, side: Mark) -> bool {
    let stones = board.stones(side);
    win_lines(board.variant())
        .iter()
        .any(|line| stones.contains(line.mask))
}

/// The first complete line owned by `side`, if any
pub fn winning_line(board: &Board, side: Mark) -> Option<&'static WinLine> {
    let stones = board.stones(side);
    win_lines(board.variant())
        .iter()
        .find(|line| stones.contains(line.mask))
}

/// The side owning a complete line. X is checked first.
pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&side| has_won(board, side))
}
