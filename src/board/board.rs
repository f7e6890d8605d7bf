//! Board structure with scoped trial placement

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{Mark, Pos, Variant};
use crate::error::BoardError;

/// Game board for either variant.
///
/// Holds only the marks. There is no move counter or history: the number of
/// marks on the board is the number of moves played.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    variant: Variant,
    /// X marks
    x: Bitboard,
    /// O marks
    o: Bitboard,
}

impl Board {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Parse a board from one string per row.
    ///
    /// `X`/`O` (either case) are marks; `.`, `_`, `-` and space are empty.
    pub fn from_rows<S: AsRef<str>>(variant: Variant, rows: &[S]) -> Result<Self, BoardError> {
        let size = variant.size();
        if rows.len() != size {
            return Err(BoardError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }

        let mut board = Board::new(variant);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != size {
                return Err(BoardError::RowLength {
                    row: r,
                    expected: size,
                    found: len,
                });
            }
            for (c, ch) in row.chars().enumerate() {
                let mark = Mark::from_char(ch).ok_or(BoardError::InvalidCell { row: r, ch })?;
                board.set(Pos::new(r as u8, c as u8), mark);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.variant.size()
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!((pos.row as usize) < self.size() && (pos.col as usize) < self.size());
        pos.to_index(self.size())
    }

    /// Validate raw coordinates against this board's side length
    pub fn pos(&self, row: i64, col: i64) -> Result<Pos, BoardError> {
        let size = self.size();
        if row < 0 || col < 0 || row >= size as i64 || col >= size as i64 {
            return Err(BoardError::OutOfRange { row, col, size });
        }
        Ok(Pos::new(row as u8, col as u8))
    }

    /// Get mark at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Mark {
        let idx = self.index(pos);
        if self.x.get(idx) {
            Mark::X
        } else if self.o.get(idx) {
            Mark::O
        } else {
            Mark::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.occupied().get(self.index(pos))
    }

    /// Assign a cell directly. `Mark::Empty` clears it.
    #[inline]
    pub fn set(&mut self, pos: Pos, mark: Mark) {
        let idx = self.index(pos);
        self.x.clear(idx);
        self.o.clear(idx);
        match mark {
            Mark::X => self.x.set(idx),
            Mark::O => self.o.set(idx),
            Mark::Empty => {}
        }
    }

    /// Place a mark on an empty cell
    #[inline]
    pub fn place(&mut self, pos: Pos, mark: Mark) {
        debug_assert!(self.is_empty(pos), "{pos} is occupied");
        self.set(pos, mark);
    }

    /// Place a mark, rejecting occupied cells
    pub fn try_place(&mut self, pos: Pos, mark: Mark) -> Result<(), BoardError> {
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied { pos });
        }
        self.set(pos, mark);
        Ok(())
    }

    /// Remove a mark
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.set(pos, Mark::Empty);
    }

    /// Place `mark` at `pos` for the lifetime of the returned guard.
    ///
    /// The cell is cleared again when the guard drops, on every exit path.
    #[inline]
    pub fn trial(&mut self, pos: Pos, mark: Mark) -> Trial<'_> {
        self.place(pos, mark);
        Trial { board: self, pos }
    }

    /// Bitboard for a side (empty for `Mark::Empty`)
    #[inline]
    pub fn stones(&self, mark: Mark) -> Bitboard {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
            Mark::Empty => Bitboard::new(),
        }
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.x.union(self.o)
    }

    #[inline]
    pub fn empties(&self) -> Bitboard {
        Bitboard::full(self.variant.cells()).without(self.occupied())
    }

    /// True iff no empty cell remains
    #[inline]
    pub fn is_full(&self) -> bool {
        self.empties().is_empty()
    }

    /// Empty cells in row-major order. This order decides move tie-breaks.
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.empties().iter_ones(self.size()).collect()
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empties().count() as usize
    }

    /// Total marks on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.occupied().count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.occupied().is_empty()
    }

    /// Exact encoding of every cell: X bits in the high word, O bits in the low.
    #[inline]
    pub fn key(&self) -> u64 {
        ((self.x.bits() as u64) << 32) | self.o.bits() as u64
    }

    /// Side to move assuming X moved first and turns alternated
    pub fn side_to_move(&self) -> Result<Mark, BoardError> {
        let x = self.x.count();
        let o = self.o.count();
        match x.checked_sub(o) {
            Some(0) => Ok(Mark::X),
            Some(1) => Ok(Mark::O),
            _ => Err(BoardError::MarkCounts { x, o }),
        }
    }

    /// Rows as strings, `.` for empty
    pub fn to_rows(&self) -> Vec<String> {
        let size = self.size();
        (0..size)
            .map(|r| {
                (0..size)
                    .map(|c| self.get(Pos::new(r as u8, c as u8)).symbol())
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_rows() {
            let cells: Vec<String> = row.chars().map(String::from).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

/// A mark placed for the duration of one search trial.
///
/// Dereferences to the board so the trial position can be searched; dropping
/// the guard clears the cell again.
pub struct Trial<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl Trial<'_> {
    /// The cell this trial occupies
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    #[inline]
    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    #[inline]
    fn drop(&mut self) {
        self.board.clear(self.pos);
    }
}
