//! Error types for the puzzle core and configuration loading

use thiserror::Error;

/// Why a piece selection was refused.
///
/// None of these corrupt state: the attempt is left exactly as it was, so the
/// caller can log the error and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("piece index {index} is out of range (round has {len} pieces)")]
    OutOfRange { index: usize, len: usize },
    #[error("piece {index} is already part of the attempt")]
    AlreadyChosen { index: usize },
    /// The attempt already reached or passed the target; undo or clear first
    #[error("attempt is closed; undo or clear before choosing more pieces")]
    Closed,
}

/// Errors raised while loading tuning or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
