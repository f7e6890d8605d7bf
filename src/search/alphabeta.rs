//! Minimax search with alpha-beta pruning and a transposition table
//!
//! Scores are from the point of view of a fixed maximizer: the side the
//! top-level move is being chosen for. Each ply alternates between the
//! maximizer and its opponent. The board is searched in place; every trial
//! mark is placed through [`Board::trial`] so it is removed again on every
//! return path, pruning breaks included.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Mark, Variant};
//! use tictactoe::search::{Searcher, INF};
//! use tictactoe::EngineConfig;
//!
//! // X has already won: the search returns the terminal score at once.
//! let mut board = Board::from_rows(Variant::Classic, &["XXX", "OO.", "..."]).unwrap();
//! let mut searcher = Searcher::new(Mark::X, &EngineConfig::classic());
//!
//! let score = searcher.search(&mut board, 0, false, -INF, INF, None);
//! assert_eq!(score, 100);
//! assert_eq!(searcher.nodes(), 1);
//! ```

use tracing::trace;

use crate::board::{Board, Mark};
use crate::config::EngineConfig;
use crate::rules::has_won;

use super::scoring::{Scoring, DRAW, INF};
use super::tt::{CacheKey, EntryType, TTStats, TranspositionTable};

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited (including cache hits and terminals)
    pub nodes: u64,
    /// Sibling loops cut short by beta <= alpha
    pub beta_cutoffs: u64,
    /// Positions scored as neutral because the depth limit was reached
    pub depth_cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
    /// Positions stored in the TT at the end of the search
    pub tt_entries: usize,
}

impl SearchStats {
    /// TT score hit rate
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }
}

/// Per-invocation search state: maximizer, scoring and the memo table.
///
/// Create one per top-level move search. The table is only valid for the
/// maximizer and depth limit it was filled under.
pub struct Searcher {
    maximizer: Mark,
    scoring: Scoring,
    pruning: bool,
    memoize: bool,
    tt: TranspositionTable,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher scoring positions for `maximizer`
    #[must_use]
    pub fn new(maximizer: Mark, config: &EngineConfig) -> Self {
        debug_assert!(maximizer != Mark::Empty, "maximizer must be a side");
        Self {
            maximizer,
            scoring: config.scoring,
            pruning: config.pruning,
            memoize: config.memoize,
            tt: TranspositionTable::new(),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn maximizer(&self) -> Mark {
        self.maximizer
    }

    #[inline]
    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    #[inline]
    pub fn pruning(&self) -> bool {
        self.pruning
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.stats.nodes
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            tt_entries: self.tt.len(),
            ..self.stats
        }
    }

    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Score `board` reached `depth` plies below the root.
    ///
    /// `maximizing` says whose turn it is: the maximizer's when true. Returns
    /// a fail-soft score inside or on the edge of `(alpha, beta)` when the
    /// window decides the node. With `max_depth` set, positions at that depth
    /// or deeper score as a draw without being examined.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        max_depth: Option<u32>,
    ) -> i32 {
        self.stats.nodes += 1;

        let to_move = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let key = CacheKey::new(board, to_move);

        if self.memoize {
            self.stats.tt_probes += 1;
            if let Some(score) = self.tt.probe(key, alpha, beta) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        // Terminal conditions, in priority order
        if max_depth.is_some_and(|max| depth >= max) {
            self.stats.depth_cutoffs += 1;
            return DRAW;
        }
        if has_won(board, self.maximizer) {
            return self.scoring.win(depth);
        }
        if has_won(board, self.maximizer.opponent()) {
            return self.scoring.loss(depth);
        }
        if board.is_full() {
            return DRAW;
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };

        for pos in board.empty_cells() {
            let score = {
                let mut child = board.trial(pos, to_move);
                self.search(&mut child, depth + 1, !maximizing, alpha, beta, max_depth)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if self.pruning && beta <= alpha {
                self.stats.beta_cutoffs += 1;
                trace!(depth, %pos, best, "cutoff");
                break;
            }
        }

        if self.memoize {
            let entry_type = if self.pruning {
                EntryType::classify(best, alpha_orig, beta_orig)
            } else {
                EntryType::Exact
            };
            self.tt.store(key, best, entry_type);
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Variant;

    fn classic(rows: &[&str]) -> Board {
        Board::from_rows(Variant::Classic, rows).unwrap()
    }

    fn plain() -> EngineConfig {
        EngineConfig::classic()
            .with_pruning(false)
            .with_memoize(false)
    }

    #[test]
    fn test_terminal_win_without_recursion() {
        let mut board = classic(&["XXX", "OO.", "..."]);
        let mut searcher = Searcher::new(Mark::X, &plain());
        let score = searcher.search(&mut board, 3, false, -INF, INF, None);
        assert_eq!(score, Scoring::DEFAULT_BASE - 3);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn test_terminal_loss_without_recursion() {
        let mut board = classic(&["OOO", "XX.", "X.."]);
        let mut searcher = Searcher::new(Mark::X, &plain().with_scoring(Scoring::Flat));
        let score = searcher.search(&mut board, 2, true, -INF, INF, None);
        assert_eq!(score, -1);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn test_terminal_draw_without_recursion() {
        let mut board = classic(&["XOX", "XOO", "OXX"]);
        let mut searcher = Searcher::new(Mark::O, &plain());
        assert_eq!(searcher.search(&mut board, 0, true, -INF, INF, None), DRAW);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn test_depth_cutoff_comes_first() {
        // Already won, but the depth limit is checked first
        let mut board = classic(&["XXX", "OO.", "..."]);
        let mut searcher = Searcher::new(Mark::X, &plain());
        assert_eq!(searcher.search(&mut board, 2, false, -INF, INF, Some(2)), DRAW);
        assert_eq!(searcher.stats().depth_cutoffs, 1);
    }

    #[test]
    fn test_empty_board_is_draw_flat() {
        let mut board = Board::new(Variant::Classic);
        let config = plain().with_scoring(Scoring::Flat);
        let mut searcher = Searcher::new(Mark::X, &config);
        assert_eq!(searcher.search(&mut board, 0, true, -INF, INF, None), 0);
        assert!(board.is_board_empty());
    }

    #[test]
    fn test_pruning_matches_plain_minimax() {
        let positions: [&[&str]; 4] = [
            &["...", "...", "..."],
            &["X..", ".O.", "..."],
            &["XO.", ".X.", "..O"],
            &["X.O", "...", "..."],
        ];
        for rows in positions {
            let mut board = classic(rows);
            let to_move = board.side_to_move().unwrap();

            let mut reference = Searcher::new(to_move, &plain());
            let expected = reference.search(&mut board, 0, true, -INF, INF, None);

            let mut pruned = Searcher::new(to_move, &plain().with_pruning(true));
            let score = pruned.search(&mut board, 0, true, -INF, INF, None);

            assert_eq!(score, expected, "position {rows:?}");
            assert!(pruned.nodes() < reference.nodes(), "position {rows:?}");
        }
    }

    #[test]
    fn test_memo_matches_plain_minimax() {
        let mut board = classic(&["X..", "...", "..O"]);
        let mut reference = Searcher::new(Mark::X, &plain());
        let expected = reference.search(&mut board, 0, true, -INF, INF, None);

        let mut memo = Searcher::new(Mark::X, &EngineConfig::classic());
        let score = memo.search(&mut board, 0, true, -INF, INF, None);

        assert_eq!(score, expected);
        assert!(memo.stats().tt_hits > 0);
        assert!(memo.stats().tt_entries > 0);
        assert!(memo.nodes() < reference.nodes());
    }

    #[test]
    fn test_search_restores_board() {
        let mut board = classic(&["X..", ".O.", "..."]);
        let before = board.clone();
        let mut searcher = Searcher::new(Mark::X, &EngineConfig::classic());
        searcher.search(&mut board, 0, true, -INF, INF, None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_stats_hit_rate() {
        let stats = SearchStats {
            tt_probes: 4,
            tt_hits: 1,
            ..SearchStats::default()
        };
        assert_eq!(stats.tt_hit_rate(), 25.0);
        assert_eq!(SearchStats::default().tt_hit_rate(), 0.0);
    }
}
