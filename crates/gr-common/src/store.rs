//! Read-only item store capability.
//!
//! The report core depends only on this trait, never on a concrete store.
//! Everything except attachment bytes is answered synchronously from the
//! store's current snapshot.

use crate::error::Result;
use crate::id::ItemId;
use crate::item::{Creator, ItemType};
use async_trait::async_trait;

/// Capabilities the report pipeline needs from the host's item store.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Whether the item is a top-level record (not a child of another item).
    fn is_top_level(&self, id: ItemId) -> Result<bool>;

    /// Human-facing title of the item.
    fn display_title(&self, id: ItemId) -> Result<String>;

    /// Item type tag.
    fn item_type(&self, id: ItemId) -> Result<ItemType>;

    /// Built-in field value, `None` when the item has no such field.
    fn field_value(&self, id: ItemId, name: &str) -> Result<Option<String>>;

    /// Plugin-defined extra field value.
    fn extra_field_value(&self, id: ItemId, key: &str) -> Result<Option<String>>;

    /// Creators in store order.
    fn creators(&self, id: ItemId) -> Result<Vec<Creator>>;

    /// Child note IDs in store order.
    fn note_ids(&self, id: ItemId) -> Result<Vec<ItemId>>;

    /// HTML body of a note.
    fn note_body(&self, note: ItemId) -> Result<String>;

    /// Child attachment IDs in store order.
    fn attachment_ids(&self, id: ItemId) -> Result<Vec<ItemId>>;

    /// Display title of an attachment (usually its file name).
    fn attachment_display_title(&self, attachment: ItemId) -> Result<String>;

    /// Attachment content as a `data:` URI.
    async fn attachment_data_uri(&self, attachment: ItemId) -> Result<String>;
}
