//! Error types for grid construction and grid queries.

use thiserror::Error;

/// Errors raised at the API boundary of the grid.
///
/// All variants describe bad input rather than transient runtime conditions,
/// so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Degenerate, inverted or non-finite bounding rectangle, or a zero cell count.
    #[error("Invalid grid bounds: {0}")]
    InvalidBounds(String),

    /// A cell index lies outside `[0, n)` on at least one axis.
    #[error("Cell index ({row}, {col}) out of range for a {n}x{n} grid")]
    IndexOutOfRange { row: usize, col: usize, n: usize },

    /// A point lies outside the padded rectangle covered by the grid.
    #[error("Point ({x}, {y}) lies outside the grid")]
    PointOutOfBounds { x: f64, y: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
