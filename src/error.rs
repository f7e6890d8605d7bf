//! Error types for the collaborators around the solver.
//!
//! The search itself never fails; these cover parsing positions from text
//! and loading engine configuration.

use derive_more::{Display, Error, From};

use crate::board::{Pos, Variant};

/// A position that cannot be turned into a well-formed board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Number of rows differs from the board side
    #[display("expected {expected} rows, got {found}")]
    RowCount { expected: usize, found: usize },

    /// A row has the wrong number of cells
    #[display("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell character is not X, O or an empty marker
    #[display("invalid cell '{ch}' in row {row}")]
    InvalidCell { row: usize, ch: char },

    /// Coordinate outside `0..size`
    #[display("({row}, {col}) is outside the {size}x{size} board")]
    OutOfRange { row: i64, col: i64, size: usize },

    /// Cell already holds a mark
    #[display("{pos} is already occupied")]
    Occupied { pos: Pos },

    /// Mark counts cannot come from alternating play with X first
    #[display("{x} X marks and {o} O marks cannot come from alternating play")]
    MarkCounts { x: u32, o: u32 },

    /// Variant name not recognised
    #[display("unknown variant '{name}', expected 3x3 or 5x5")]
    UnknownVariant { name: String },
}

/// Engine configuration error.
#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    /// Config file could not be read
    #[display("failed to read config file: {_0}")]
    Io(std::io::Error),

    /// Config text is not valid TOML for `EngineConfig`
    #[display("failed to parse config: {_0}")]
    Parse(toml::de::Error),

    /// Depth-weighted base is too small for the board, scores would change sign
    #[display("depth-weighted base {base} must exceed the {cells} cells of the {variant:?} board")]
    #[from(skip)]
    WeightBase {
        base: i32,
        cells: usize,
        variant: Variant,
    },

    /// Depth policy tiers must be listed from most to fewest empty cells
    #[display("depth policy tiers must have strictly decreasing min_empty_cells")]
    #[from(skip)]
    UnorderedTiers,
}
