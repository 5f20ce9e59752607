//! Core errors.

use thiserror::Error;

/// Errors raised at the validation boundary (and re-checked by the allocator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("invalid task '{id}': {reason}")]
    InvalidTask { id: String, reason: String },

    #[error("invalid load weights: {0}")]
    InvalidWeights(String),

    #[error("invalid schedule item '{title}': {reason}")]
    InvalidItem { title: String, reason: String },
}

impl CoreError {
    pub fn invalid_task(id: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidTask {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
