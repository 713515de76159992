//! Error types for report generation.

use gr_common::{ItemId, StoreError};
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Write to a section the document does not have.
    #[error("unknown document section '{0}' (expected head, body or css)")]
    UnknownSection(String),

    /// Item store read failure.
    #[error("item store access failed: {0}")]
    StoreAccess(#[source] StoreError),

    /// Cover image bytes could not be fetched.
    #[error("failed to fetch cover from attachment {attachment}: {source}")]
    BinaryFetch {
        attachment: ItemId,
        #[source]
        source: StoreError,
    },

    /// Icon or other static asset could not be loaded.
    #[error("failed to load asset '{name}': {reason}")]
    AssetError { name: String, reason: String },
}

impl From<StoreError> for ReportError {
    fn from(err: StoreError) -> Self {
        let attachment = match &err {
            StoreError::BinaryFetch { id, .. } => *id,
            _ => return ReportError::StoreAccess(err),
        };
        ReportError::BinaryFetch {
            attachment,
            source: err,
        }
    }
}

impl ReportError {
    /// Stable error code.
    pub fn code(&self) -> u32 {
        match self {
            ReportError::AssetError { .. } => 11,
            ReportError::UnknownSection(_) => 20,
            ReportError::StoreAccess(_) => 30,
            ReportError::BinaryFetch { .. } => 31,
        }
    }
}
