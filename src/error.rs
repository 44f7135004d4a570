//! Error types for board operations and persistence

use thiserror::Error;

use crate::post::{Field, PostId};

/// Failure writing to or reading from the key-value backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend (e.g. LocalStorage disabled in private mode)
    #[error("storage is not available")]
    Unavailable,
    /// The backend refused the operation (quota exceeded, read-only, ...)
    #[error("storage rejected the write: {0}")]
    Rejected(String),
    #[error("failed to serialize posts: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a single user action was aborted
///
/// Every variant is terminal for the action that produced it: the post
/// collection is left exactly as it was.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A required form field was empty after trimming
    #[error("required field is empty: {0}")]
    MissingField(Field),
    /// Password did not match the one stored with the post
    #[error("wrong password for post {0}")]
    WrongPassword(PostId),
    #[error("post {0} not found")]
    NotFound(PostId),
    /// User declined the confirmation or left an edit prompt blank
    #[error("action cancelled")]
    Cancelled,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl BoardError {
    /// Whether the error should be surfaced with an alert.
    /// Cancellation is the user's own choice and stays silent.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, BoardError::Cancelled)
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
