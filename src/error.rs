use crate::grid::Dimensions;
use thiserror::Error;

/// Errors raised while building a grid or writing a replay.
///
/// Stepping the simulation itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    /// Both sides of a grid must be strictly positive.
    #[error("invalid grid dimensions {width}x{height}, both sides must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("map header is missing or malformed, expected `rows <n>` and `cols <n>`")]
    InvalidHeader,

    #[error("invalid cell value {value:?} at row {row}, col {col}")]
    InvalidCell { row: usize, col: usize, value: char },

    /// A map row or column lies outside the declared header size.
    #[error("cell at row {row}, col {col} is outside the declared map size")]
    PatternOutOfBounds { row: usize, col: usize },

    /// A game can only restart from a grid of its own size.
    #[error("expected a {expected:?} grid, found {found:?}")]
    DimensionMismatch {
        expected: Dimensions,
        found: Dimensions,
    },

    #[error("could not write replay: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize replay: {0}")]
    Json(#[from] serde_json::Error),
}
