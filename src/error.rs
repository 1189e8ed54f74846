//! Error types for layer operations.

use thiserror::Error;

/// Errors raised when a layer is called outside of its contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot update parameters from an empty batch")]
    EmptyBatch,

    #[error("Layer must have at least one input and one output unit")]
    ZeroUnits,

    #[error("Invalid training option: {message}")]
    InvalidOption { message: String },
}

pub type Result<T> = std::result::Result<T, LayerError>;

/// Returns an error unless `actual == expected`.
pub(crate) fn check_len(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(LayerError::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}
