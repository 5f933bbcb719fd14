//! Errors raised by the analysis engine.
//!
//! Everything here is a misuse of the API (bad arguments, wrong dimensions,
//! malformed input) and is returned immediately. Expected mathematical
//! outcomes such as a degenerate 2x2 denominator are *not* errors; see
//! [`MixedFailure`](crate::nash::mixed::MixedFailure).

use std::fmt;

/// Errors that can occur while building or analyzing a game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Player id other than 1 or 2.
    InvalidPlayer(u8),

    /// A vector's length does not match the strategy count it is paired with.
    DimensionMismatch {
        /// What the vector describes (e.g. "player 2 beliefs").
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A row, column or strategy index past the end of the grid.
    IndexOutOfRange {
        /// Which axis was indexed ("row", "column", "strategy").
        axis: &'static str,
        /// The offending index.
        index: usize,
        /// Number of valid entries along that axis.
        len: usize,
    },

    /// Manual payoff entry that is not two comma-separated integers.
    PayoffFormat {
        /// Row of the cell being filled.
        row: usize,
        /// Column of the cell being filled.
        col: usize,
        /// The raw text supplied.
        input: String,
    },

    /// Construction arguments or a mixed strategy failed validation.
    Validation(String),

    /// Operation restricted to 2x2 games called on another shape.
    UnsupportedGameSize {
        /// Row count of the game.
        rows: usize,
        /// Column count of the game.
        columns: usize,
    },

    /// Registry lookup for an id that was never issued or was removed.
    UnknownGame(String),

    /// Serializing an export failed.
    Export(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPlayer(id) => {
                write!(f, "player must be 1 or 2, got {}", id)
            }
            GameError::DimensionMismatch { what, expected, actual } => {
                write!(f, "{} must have length {}, got {}", what, expected, actual)
            }
            GameError::IndexOutOfRange { axis, index, len } => {
                if *len == 0 {
                    write!(f, "{} index {} out of bounds (no {}s)", axis, index, axis)
                } else {
                    write!(f, "{} index {} out of bounds (0-{})", axis, index, len - 1)
                }
            }
            GameError::PayoffFormat { row, col, input } => write!(
                f,
                "payoff for (A{}, B{}) must be two comma-separated integers (e.g. 3, 4), got {:?}",
                row + 1,
                col + 1,
                input
            ),
            GameError::Validation(msg) => write!(f, "{}", msg),
            GameError::UnsupportedGameSize { rows, columns } => write!(
                f,
                "mixed strategy calculation only supported for 2x2 games, got {}x{}",
                rows, columns
            ),
            GameError::UnknownGame(id) => write!(f, "game with id {} not found", id),
            GameError::Export(msg) => write!(f, "export failed: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Export(err.to_string())
    }
}

/// Result alias used throughout the engine.
pub type GameResult<T> = Result<T, GameError>;
