//! Engine configuration
//!
//! Defaults depend on the variant: 3x3 is solved exactly, 5x5 is cut off by
//! [`DepthPolicy::gomoku`]. A TOML file may override any subset of fields;
//! missing fields keep the variant's default.
//!
//! ```toml
//! pruning = true
//! memoize = true
//!
//! [scoring]
//! kind = "depth_weighted"
//! base = 100
//!
//! [depth_policy]
//! fallback = 8
//! tiers = [
//!     { min_empty_cells = 20, max_depth = 3 },
//!     { min_empty_cells = 12, max_depth = 5 },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::board::Variant;
use crate::error::ConfigError;
use crate::search::{DepthPolicy, Scoring};

/// Search settings for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Skip siblings once the alpha-beta window closes
    pub pruning: bool,
    /// Reuse scores of positions already searched
    pub memoize: bool,
    /// How won and lost positions are scored
    pub scoring: Scoring,
    /// Depth cutoff as a function of empty cells
    pub depth_policy: DepthPolicy,
}

/// Config file contents before variant defaults are filled in
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pruning: Option<bool>,
    memoize: Option<bool>,
    scoring: Option<Scoring>,
    depth_policy: Option<DepthPolicy>,
}

impl EngineConfig {
    /// Exact 3x3 search
    #[must_use]
    pub fn classic() -> Self {
        Self {
            pruning: true,
            memoize: true,
            scoring: Scoring::default(),
            depth_policy: DepthPolicy::unbounded(),
        }
    }

    /// Depth-limited 5x5 search
    #[must_use]
    pub fn gomoku() -> Self {
        Self {
            depth_policy: DepthPolicy::gomoku(),
            ..Self::classic()
        }
    }

    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Gomoku => Self::gomoku(),
        }
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    #[must_use]
    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Parse TOML overrides on top of the variant's defaults.
    pub fn from_toml_str(s: &str, variant: Variant) -> Result<Self, ConfigError> {
        let partial: PartialConfig = toml::from_str(s)?;
        let defaults = Self::for_variant(variant);

        let config = Self {
            pruning: partial.pruning.unwrap_or(defaults.pruning),
            memoize: partial.memoize.unwrap_or(defaults.memoize),
            scoring: partial.scoring.unwrap_or(defaults.scoring),
            depth_policy: partial.depth_policy.unwrap_or(defaults.depth_policy),
        };
        config.validate(variant)?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>, variant: Variant) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content, variant)?;
        info!(
            scoring = ?config.scoring,
            pruning = config.pruning,
            memoize = config.memoize,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Check the settings make sense for `variant`.
    ///
    /// A depth-weighted base must exceed the number of cells, otherwise a
    /// deep win could score zero or below.
    pub fn validate(&self, variant: Variant) -> Result<(), ConfigError> {
        if let Scoring::DepthWeighted { base } = self.scoring {
            let cells = variant.cells();
            if base <= cells as i32 {
                return Err(ConfigError::WeightBase {
                    base,
                    cells,
                    variant,
                });
            }
        }
        self.depth_policy.validate()
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}
