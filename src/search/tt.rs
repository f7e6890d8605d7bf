//! Transposition table for caching search results
//!
//! Entries are keyed by the exact board contents plus the side to move, so a
//! hit is always the same position. The table is owned by one top-level search
//! and dropped with it; nothing is shared across games.
//!
//! Within one search the depth of a position is the number of marks added
//! since the root, so a position is only ever reached at one depth and a
//! depth-weighted score stored for it stays valid. Scores produced under a
//! narrowed alpha-beta window are stored as bounds and only reused when they
//! decide the caller's window.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Mark, Variant};
//! use tictactoe::search::{CacheKey, EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new();
//! let key = CacheKey::new(&Board::new(Variant::Classic), Mark::X);
//!
//! tt.store(key, 0, EntryType::Exact);
//! assert_eq!(tt.probe(key, -10, 10), Some(0));
//! ```

use std::collections::HashMap;

use crate::board::{Board, Mark};

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

impl EntryType {
    /// Classify a fail-soft result against the window it was searched with
    #[inline]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// Exact board encoding plus the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    cells: u64,
    to_move: Mark,
}

impl CacheKey {
    #[inline]
    pub fn new(board: &Board, to_move: Mark) -> Self {
        Self {
            cells: board.key(),
            to_move,
        }
    }
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Evaluation score
    pub score: i32,
    /// Type of score (exact, lower bound, upper bound)
    pub entry_type: EntryType,
}

/// Append-only memo of searched positions.
///
/// Never evicts: the 3x3 tree has fewer than 6000 distinct positions and the
/// 5x5 search is depth-limited, so one search stays small.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<CacheKey, TTEntry>,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the table for a position.
    ///
    /// Returns the stored score when it is exact, or when it is a bound that
    /// already falls outside `(alpha, beta)`.
    #[must_use]
    pub fn probe(&self, key: CacheKey, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries.get(&key)?;
        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Raw entry lookup, regardless of window
    #[must_use]
    pub fn get(&self, key: CacheKey) -> Option<TTEntry> {
        self.entries.get(&key).copied()
    }

    /// Store a position. An exact score is never replaced by a bound.
    pub fn store(&mut self, key: CacheKey, score: i32, entry_type: EntryType) {
        let new = TTEntry { score, entry_type };
        self.entries
            .entry(key)
            .and_modify(|e| {
                if entry_type == EntryType::Exact || e.entry_type != EntryType::Exact {
                    *e = new;
                }
            })
            .or_insert(new);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let exact = self
            .entries
            .values()
            .filter(|e| e.entry_type == EntryType::Exact)
            .count();
        TTStats {
            used: self.entries.len(),
            exact,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    /// Number of positions stored
    pub used: usize,
    /// How many of them hold exact scores
    pub exact: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Pos, Variant};

    fn key(rows: &[&str], to_move: Mark) -> CacheKey {
        CacheKey::new(&Board::from_rows(Variant::Classic, rows).unwrap(), to_move)
    }

    #[test]
    fn test_tt_store_probe() {
        let mut tt = TranspositionTable::new();
        let k = key(&["X..", "...", "..."], Mark::O);
        tt.store(k, 5, EntryType::Exact);
        assert_eq!(tt.probe(k, -100, 100), Some(5));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_tt_miss() {
        let tt = TranspositionTable::new();
        assert_eq!(tt.probe(key(&["...", "...", "..."], Mark::X), -100, 100), None);
        assert!(tt.is_empty());
    }

    #[test]
    fn test_side_to_move_is_part_of_key() {
        let mut tt = TranspositionTable::new();
        tt.store(key(&["X..", "...", "..."], Mark::O), 5, EntryType::Exact);
        assert_eq!(tt.probe(key(&["X..", "...", "..."], Mark::X), -100, 100), None);
    }

    #[test]
    fn test_lower_bound() {
        let mut tt = TranspositionTable::new();
        let k = key(&[".X.", "...", "..."], Mark::O);
        tt.store(k, 50, EntryType::LowerBound);

        // Score >= beta: usable
        assert_eq!(tt.probe(k, -100, 40), Some(50));
        // Window above the bound: not decided
        assert_eq!(tt.probe(k, -100, 60), None);
    }

    #[test]
    fn test_upper_bound() {
        let mut tt = TranspositionTable::new();
        let k = key(&["..X", "...", "..."], Mark::O);
        tt.store(k, -50, EntryType::UpperBound);

        assert_eq!(tt.probe(k, -40, 100), Some(-50));
        assert_eq!(tt.probe(k, -60, 100), None);
    }

    #[test]
    fn test_exact_not_replaced_by_bound() {
        let mut tt = TranspositionTable::new();
        let k = key(&["...", ".X.", "..."], Mark::O);
        tt.store(k, 3, EntryType::Exact);
        tt.store(k, 9, EntryType::LowerBound);
        assert_eq!(tt.get(k), Some(TTEntry { score: 3, entry_type: EntryType::Exact }));

        tt.store(k, 4, EntryType::Exact);
        assert_eq!(tt.probe(k, -100, 100), Some(4));
    }

    #[test]
    fn test_classify() {
        assert_eq!(EntryType::classify(-5, -5, 5), EntryType::UpperBound);
        assert_eq!(EntryType::classify(5, -5, 5), EntryType::LowerBound);
        assert_eq!(EntryType::classify(0, -5, 5), EntryType::Exact);
    }

    #[test]
    fn test_clear_and_stats() {
        let mut tt = TranspositionTable::new();
        let mut board = Board::new(Variant::Classic);
        tt.store(CacheKey::new(&board, Mark::X), 0, EntryType::Exact);
        board.place(Pos::new(0, 0), Mark::X);
        tt.store(CacheKey::new(&board, Mark::O), 1, EntryType::LowerBound);

        assert_eq!(tt.stats(), TTStats { used: 2, exact: 1 });
        tt.clear();
        assert!(tt.is_empty());
    }
}
