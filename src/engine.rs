//! Move selection for the side to move
//!
//! This module ties the search together: it asks the depth policy how deep to
//! look, tries every empty cell in row-major order, scores each resulting
//! position with a fresh [`Searcher`] and keeps the first cell with the
//! highest score.
//!
//! # Example
//!
//! ```
//! use tictactoe::{Board, Mark, Pos, Solver, Variant};
//!
//! let board = Board::from_rows(Variant::Classic, &["XX.", "OO.", "..."]).unwrap();
//! let solver = Solver::for_variant(Variant::Classic);
//!
//! let result = solver.best_move_with_stats(&board, Mark::X);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! println!("score {} in {} nodes, {}ms", result.score, result.nodes, result.time_ms);
//! ```

use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::board::{Board, Mark, Pos, Variant};
use crate::config::EngineConfig;
use crate::rules::winner;
use crate::search::{SearchStats, Searcher, INF};

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Best move found, `None` if the game is already over
    pub best_move: Option<Pos>,
    /// Score of the position after the move, from the mover's point of view
    pub score: i32,
    /// Depth limit applied to this search (`None` = to the end of the game)
    pub max_depth: Option<u32>,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Cutoff and cache counters
    pub stats: SearchStats,
}

impl MoveResult {
    /// Create a result for a finished game
    #[inline]
    fn no_move(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            max_depth: None,
            nodes: 0,
            time_ms,
            stats: SearchStats::default(),
        }
    }

    /// Create a result from a completed search
    #[inline]
    fn searched(
        pos: Pos,
        score: i32,
        max_depth: Option<u32>,
        stats: SearchStats,
        time_ms: u64,
    ) -> Self {
        Self {
            best_move: Some(pos),
            score,
            max_depth,
            nodes: stats.nodes,
            time_ms,
            stats,
        }
    }
}

/// Pick the best cell for `side` on `board`.
///
/// The board is searched in place and handed back unchanged. Returns no move
/// when the board is full or a side has already won.
#[instrument(skip(board, config), fields(variant = ?board.variant(), empty = board.empty_count()))]
pub fn select_move(board: &mut Board, side: Mark, config: &EngineConfig) -> MoveResult {
    let start = Instant::now();

    if side == Mark::Empty || board.is_full() || winner(board).is_some() {
        debug!("Game over, no move to make");
        return MoveResult::no_move(start.elapsed().as_millis() as u64);
    }

    let before = board.key();

    let max_depth = config.depth_policy.max_depth(board.empty_count());
    let mut searcher = Searcher::new(side, config);
    let mut best: Option<(Pos, i32)> = None;

    for pos in board.empty_cells() {
        // Only a strictly better child can replace the best, so the root
        // window starts at the best score found so far
        let alpha = match best {
            Some((_, score)) if config.pruning => score,
            _ => -INF,
        };

        let score = {
            let mut child = board.trial(pos, side);
            searcher.search(&mut child, 1, false, alpha, INF, max_depth)
        };
        trace!(%pos, score, "root child");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    debug_assert_eq!(board.key(), before, "search left marks on the board");

    let time_ms = start.elapsed().as_millis() as u64;
    let stats = searcher.stats();

    match best {
        Some((pos, score)) => {
            debug!(
                %pos,
                score,
                ?max_depth,
                nodes = stats.nodes,
                cutoffs = stats.beta_cutoffs,
                tt_hits = stats.tt_hits,
                time_ms,
                "Move selected"
            );
            MoveResult::searched(pos, score, max_depth, stats, time_ms)
        }
        None => MoveResult::no_move(time_ms),
    }
}

/// Solver for one variant's configuration.
///
/// Stateless between calls: every search gets its own transposition table,
/// so one solver can serve any number of games.
///
/// # Example
///
/// ```
/// use tictactoe::{Board, EngineConfig, Mark, Solver, Variant};
/// use tictactoe::search::Scoring;
///
/// let solver = Solver::new(EngineConfig::classic().with_scoring(Scoring::Flat));
/// let board = Board::new(Variant::Classic);
///
/// // Every opening move draws; the first cell wins the tie
/// let result = solver.best_move_with_stats(&board, Mark::X);
/// assert_eq!(result.score, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: EngineConfig,
}

impl Solver {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Solver with the variant's default configuration
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(EngineConfig::for_variant(variant))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Get the best move for the given position.
    ///
    /// Use [`best_move_with_stats`](Self::best_move_with_stats) for the score
    /// and search statistics.
    #[must_use]
    pub fn best_move(&self, board: &Board, side: Mark) -> Option<Pos> {
        self.best_move_with_stats(board, side).best_move
    }

    /// Get the best move with detailed search statistics.
    ///
    /// Searches a copy of `board`; the caller's board is never touched.
    #[must_use]
    pub fn best_move_with_stats(&self, board: &Board, side: Mark) -> MoveResult {
        let mut scratch = board.clone();
        select_move(&mut scratch, side, &self.config)
    }
}
