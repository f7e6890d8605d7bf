//! Terminal score conventions

use serde::{Deserialize, Serialize};

/// Score of a drawn or cut-off position
pub const DRAW: i32 = 0;

/// Bound for alpha-beta windows, safely negatable
pub const INF: i32 = i32::MAX;

/// How won and lost positions are scored, from the maximizer's point of view.
///
/// `DepthWeighted` makes a faster win score higher than a slower one and a
/// slower loss score higher than a faster one, so it changes which move wins a
/// tie at the root. `Flat` treats every win alike and the first one found in
/// row-major order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scoring {
    /// +1 win, -1 loss
    Flat,
    /// +(base - depth) win, -(base - depth) loss
    DepthWeighted { base: i32 },
}

impl Scoring {
    /// Default base for depth weighting; larger than any ply count on 5x5
    pub const DEFAULT_BASE: i32 = 100;

    #[inline]
    pub const fn depth_weighted() -> Self {
        Scoring::DepthWeighted {
            base: Self::DEFAULT_BASE,
        }
    }

    /// Score of a position the maximizer has won, reached `depth` plies below the root
    #[inline]
    pub fn win(self, depth: u32) -> i32 {
        match self {
            Scoring::Flat => 1,
            Scoring::DepthWeighted { base } => base - depth as i32,
        }
    }

    /// Score of a position the maximizer has lost
    #[inline]
    pub fn loss(self, depth: u32) -> i32 {
        -self.win(depth)
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::depth_weighted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat() {
        assert_eq!(Scoring::Flat.win(1), 1);
        assert_eq!(Scoring::Flat.win(7), 1);
        assert_eq!(Scoring::Flat.loss(3), -1);
    }

    #[test]
    fn test_depth_weighted_prefers_fast_wins() {
        let s = Scoring::DepthWeighted { base: 20 };
        assert_eq!(s.win(1), 19);
        assert_eq!(s.win(3), 17);
        assert!(s.win(1) > s.win(3));
        // Slow losses beat fast losses
        assert!(s.loss(4) > s.loss(2));
    }

    #[test]
    fn test_default_is_depth_weighted() {
        assert_eq!(Scoring::default(), Scoring::DepthWeighted { base: 100 });
    }
}
