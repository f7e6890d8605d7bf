//! Depth policy: how deep to search given how much of the board is left
//!
//! On 5x5 the full game tree is far too large to search from an early
//! position, so the search is cut off at a depth chosen from the number of
//! empty cells. Early positions get a shallow search, the endgame an exact one.
//!
//! The policy is plain data so it can be tuned from a config file:
//!
//! ```
//! use tictactoe::search::{DepthPolicy, DepthTier};
//!
//! let policy = DepthPolicy::new(
//!     vec![
//!         DepthTier { min_empty_cells: 20, max_depth: 2 },
//!         DepthTier { min_empty_cells: 12, max_depth: 4 },
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(policy.max_depth(25), Some(2));
//! assert_eq!(policy.max_depth(15), Some(4));
//! assert_eq!(policy.max_depth(8), None); // unbounded
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One step of the policy: at least `min_empty_cells` empty cells → `max_depth` plies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthTier {
    pub min_empty_cells: usize,
    pub max_depth: u32,
}

/// Step function from empty-cell count to maximum search depth.
///
/// Tiers are checked in order and must have strictly decreasing
/// `min_empty_cells`. When no tier matches, `fallback` applies; `None` means
/// search to the end of the game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepthPolicy {
    #[serde(default)]
    tiers: Vec<DepthTier>,
    #[serde(default)]
    fallback: Option<u32>,
}

impl DepthPolicy {
    /// Build a policy, rejecting tiers that are not in decreasing order
    pub fn new(tiers: Vec<DepthTier>, fallback: Option<u32>) -> Result<Self, ConfigError> {
        let policy = Self { tiers, fallback };
        policy.validate()?;
        Ok(policy)
    }

    /// Always search to the end of the game
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Same cutoff regardless of position
    #[must_use]
    pub fn fixed(max_depth: u32) -> Self {
        Self {
            tiers: Vec::new(),
            fallback: Some(max_depth),
        }
    }

    /// Default cutoffs for 5x5
    #[must_use]
    pub fn gomoku() -> Self {
        Self {
            tiers: vec![
                DepthTier { min_empty_cells: 22, max_depth: 2 },
                DepthTier { min_empty_cells: 18, max_depth: 3 },
                DepthTier { min_empty_cells: 14, max_depth: 4 },
                DepthTier { min_empty_cells: 10, max_depth: 6 },
            ],
            fallback: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self
            .tiers
            .windows(2)
            .all(|w| w[0].min_empty_cells > w[1].min_empty_cells);
        if ordered {
            Ok(())
        } else {
            Err(ConfigError::UnorderedTiers)
        }
    }

    /// Maximum plies to search with `empty_cells` empty cells on the board
    #[must_use]
    pub fn max_depth(&self, empty_cells: usize) -> Option<u32> {
        self.tiers
            .iter()
            .find(|tier| empty_cells >= tier.min_empty_cells)
            .map(|tier| tier.max_depth)
            .or(self.fallback)
    }

    pub fn tiers(&self) -> &[DepthTier] {
        &self.tiers
    }

    pub fn fallback(&self) -> Option<u32> {
        self.fallback
    }

    pub fn is_unbounded(&self) -> bool {
        self.tiers.is_empty() && self.fallback.is_none()
    }
}
