//! Error types for item store access.
//!
//! Every capability of [`crate::ItemStore`] may fail with a [`StoreError`].
//! The report core never recovers from these itself; it propagates them to
//! the caller of the build.

use crate::id::ItemId;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Item store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The handle does not name an item in the store.
    #[error("item {id} not found")]
    ItemNotFound { id: ItemId },

    /// The item exists but is not of the kind the accessor requires.
    #[error("item {id} is not a {expected}")]
    WrongItemType { id: ItemId, expected: &'static str },

    /// Generic read failure reported by the backing store.
    #[error("store access failed: {0}")]
    Access(String),

    /// Binary content for an attachment could not be retrieved.
    #[error("failed to fetch binary content of attachment {id}: {reason}")]
    BinaryFetch { id: ItemId, reason: String },

    /// The snapshot is structurally invalid.
    #[error("invalid library snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Stable error code.
    ///
    /// - 20-29: lookup and access errors
    /// - 30-39: binary content errors
    /// - 60-69: I/O and parse errors
    pub fn code(&self) -> u32 {
        match self {
            StoreError::ItemNotFound { .. } => 20,
            StoreError::WrongItemType { .. } => 21,
            StoreError::Access(_) => 22,
            StoreError::BinaryFetch { .. } => 30,
            StoreError::InvalidSnapshot(_) => 62,
            StoreError::Io(_) => 60,
            StoreError::Json(_) => 61,
        }
    }

    /// True when the failure came from fetching attachment bytes.
    pub fn is_binary_fetch(&self) -> bool {
        matches!(self, StoreError::BinaryFetch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_grouped() {
        assert_eq!(StoreError::ItemNotFound { id: ItemId(1) }.code(), 20);
        assert_eq!(
            StoreError::BinaryFetch {
                id: ItemId(1),
                reason: "gone".into()
            }
            .code(),
            30
        );
        assert_eq!(StoreError::InvalidSnapshot("x".into()).code(), 62);
    }

    #[test]
    fn test_binary_fetch_predicate() {
        let err = StoreError::BinaryFetch {
            id: ItemId(3),
            reason: "missing file".into(),
        };
        assert!(err.is_binary_fetch());
        assert!(!StoreError::Access("locked".into()).is_binary_fetch());
    }

    #[test]
    fn test_error_message() {
        let err = StoreError::ItemNotFound { id: ItemId(12) };
        assert_eq!(err.to_string(), "item 12 not found");
    }
}
