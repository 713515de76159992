//! Greatify common types, IDs, and errors.
//!
//! This crate provides the foundational types shared by the report pipeline
//! and the binary:
//! - Item identity and item-type tags
//! - The read-only [`ItemStore`] capability trait the report core depends on
//! - Store errors
//! - A JSON library snapshot that implements [`ItemStore`] in memory
//! - Data URI helpers for embedding binary content

pub mod encoding;
pub mod error;
pub mod id;
pub mod item;
pub mod snapshot;
pub mod store;

pub use encoding::{guess_mime, to_data_uri};
pub use error::{Result, StoreError};
pub use id::ItemId;
pub use item::{Creator, ItemType};
pub use snapshot::{AttachmentContent, LibrarySnapshot, SnapshotItem, SnapshotStore};
pub use store::ItemStore;

/// Schema version of the library snapshot format.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";
