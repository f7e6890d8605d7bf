//! Bitboard over at most 25 cells

use super::{Pos, MAX_CELLS};

/// One bit per cell, indexed row-major for the board's own side length.
/// A single `u32` covers the 5x5 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u32,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Board with the lowest `cells` bits set
    #[inline]
    pub const fn full(cells: usize) -> Self {
        debug_assert!(cells <= MAX_CELLS);
        Self {
            bits: (1u32 << cells) - 1,
        }
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.bits |= 1u32 << idx;
    }

    #[inline]
    pub fn clear(&mut self, idx: usize) {
        self.bits &= !(1u32 << idx);
    }

    #[inline]
    pub fn get(self, idx: usize) -> bool {
        (self.bits >> idx) & 1 == 1
    }

    /// Popcount
    #[inline]
    pub fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// True if every bit of `mask` is set here
    #[inline]
    pub fn contains(self, mask: Bitboard) -> bool {
        self.bits & mask.bits == mask.bits
    }

    #[inline]
    pub fn union(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits | other.bits)
    }

    /// Bits of `self` not present in `other`
    #[inline]
    pub fn without(self, other: Bitboard) -> Bitboard {
        Bitboard::from_bits(self.bits & !other.bits)
    }

    /// Iterate set bits in ascending index order, i.e. row-major
    pub fn iter_ones(self, size: usize) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            size,
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u32,
    size: usize,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Some(Pos::from_index(idx, self.size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}
