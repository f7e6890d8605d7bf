//! Search module
//!
//! Contains:
//! - Minimax search with alpha-beta pruning
//! - Transposition table for caching search results
//! - Depth policy for cutting off large searches
//! - Terminal score conventions

pub mod alphabeta;
pub mod policy;
pub mod scoring;
pub mod tt;

pub use alphabeta::{SearchStats, Searcher};
pub use policy::{DepthPolicy, DepthTier};
pub use scoring::{Scoring, DRAW, INF};
pub use tt::{CacheKey, EntryType, TTEntry, TTStats, TranspositionTable};
