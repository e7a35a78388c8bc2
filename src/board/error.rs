//! Error types for board construction, cell access and activation.

use thiserror::Error;

/// Errors surfaced by the board engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board construction with a side shorter than one cell.
    #[error("invalid board dimensions {width}x{height}: both sides must be at least 1")]
    InvalidDimension { width: usize, height: usize },

    /// Cell access or replacement outside `[0, width) x [0, height)`.
    #[error("position ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// A direction that is ill-formed for the place it was used.
    #[error("invalid direction ({x}, {y}): {reason}")]
    InvalidDirection {
        x: i32,
        y: i32,
        reason: &'static str,
    },

    /// The dedicated rayon pool could not be built.
    #[error("failed to build board thread pool: {0}")]
    ThreadPool(String),

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },
}

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

impl BoardError {
    pub(crate) fn invalid_direction(x: i32, y: i32, reason: &'static str) -> Self {
        Self::InvalidDirection { x, y, reason }
    }
}
