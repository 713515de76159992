//! JSON library snapshot and its in-memory [`ItemStore`].
//!
//! A snapshot is a flat list of items. Child notes and attachments point at
//! their parent through `parent`; items without a parent are top-level.
//! Child order is the order of appearance in the snapshot.
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "items": [
//!     { "id": 1, "item_type": "book", "title": "Dune",
//!       "fields": { "date": "1965", "publisher": "Chilton" },
//!       "creators": [ { "role": "author", "firstName": "Frank", "lastName": "Herbert" } ] },
//!     { "id": 2, "item_type": "attachment", "title": "cover.jpg", "parent": 1,
//!       "attachment": { "content_type": "image/jpeg", "path": "files/cover.jpg" } }
//!   ]
//! }
//! ```

use crate::encoding::{guess_mime, to_data_uri};
use crate::error::{Result, StoreError};
use crate::id::ItemId;
use crate::item::{Creator, ItemType};
use crate::store::ItemStore;
use crate::SNAPSHOT_SCHEMA_VERSION;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialized library snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LibrarySnapshot {
    /// Snapshot format version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// All items, parents and children alike.
    #[serde(default)]
    pub items: Vec<SnapshotItem>,
}

fn default_schema_version() -> String {
    SNAPSHOT_SCHEMA_VERSION.to_string()
}

/// One item in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SnapshotItem {
    /// Item identifier, unique within the snapshot.
    pub id: ItemId,
    /// Item type tag (`book`, `journalArticle`, `note`, `attachment`, ...).
    pub item_type: String,
    /// Display title. Falls back to the `title` field when empty.
    #[serde(default)]
    pub title: String,
    /// Parent item for child notes and attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ItemId>,
    /// Built-in fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    /// Creators in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<Creator>,
    /// Plugin-defined extra fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
    /// Note body (HTML), for note items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Binary content, for attachment items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentContent>,
}

impl SnapshotItem {
    /// Minimal item with a type tag and title.
    pub fn new(id: impl Into<ItemId>, item_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            title: title.into(),
            parent: None,
            fields: BTreeMap::new(),
            creators: Vec::new(),
            extra: BTreeMap::new(),
            note: None,
            attachment: None,
        }
    }

    /// Set the parent item.
    pub fn with_parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a built-in field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add an extra field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Append a creator.
    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.creators.push(creator);
        self
    }

    /// Set the note body.
    pub fn with_note(mut self, body: impl Into<String>) -> Self {
        self.note = Some(body.into());
        self
    }

    /// Set attachment content.
    pub fn with_attachment(mut self, content: AttachmentContent) -> Self {
        self.attachment = Some(content);
        self
    }

    fn display_title(&self) -> String {
        if self.title.is_empty() {
            self.fields.get("title").cloned().unwrap_or_default()
        } else {
            self.title.clone()
        }
    }
}

/// Where an attachment's bytes live.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AttachmentContent {
    /// MIME type. Guessed from the path or title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// File path, relative to the snapshot file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Inline base64 content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl AttachmentContent {
    /// Content stored in a file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Content stored inline.
    pub fn inline(content_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            content_type: Some(content_type.into()),
            path: None,
            data: Some(STANDARD.encode(bytes)),
        }
    }
}

/// In-memory [`ItemStore`] over a [`LibrarySnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    items: Vec<SnapshotItem>,
    index: HashMap<ItemId, usize>,
    children: HashMap<ItemId, Vec<usize>>,
    base_dir: Option<PathBuf>,
}

impl SnapshotStore {
    /// Build a store, validating ID uniqueness and parent links.
    pub fn new(snapshot: LibrarySnapshot) -> Result<Self> {
        let mut index = HashMap::with_capacity(snapshot.items.len());
        for (pos, item) in snapshot.items.iter().enumerate() {
            if index.insert(item.id, pos).is_some() {
                return Err(StoreError::InvalidSnapshot(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
        }
        let mut children: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (pos, item) in snapshot.items.iter().enumerate() {
            if let Some(parent) = item.parent {
                if !index.contains_key(&parent) {
                    return Err(StoreError::InvalidSnapshot(format!(
                        "item {} references missing parent {}",
                        item.id, parent
                    )));
                }
                if parent == item.id {
                    return Err(StoreError::InvalidSnapshot(format!(
                        "item {} is its own parent",
                        item.id
                    )));
                }
                children.entry(parent).or_default().push(pos);
            }
        }
        debug!(items = snapshot.items.len(), "Library snapshot indexed");
        Ok(Self {
            items: snapshot.items,
            index,
            children,
            base_dir: None,
        })
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: LibrarySnapshot = serde_json::from_str(json)?;
        Self::new(snapshot)
    }

    /// Load a snapshot file. Relative attachment paths resolve against its directory.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json(&content)?;
        Ok(store.with_base_dir(path.parent().map(Path::to_path_buf).unwrap_or_default()))
    }

    /// Set the directory relative attachment paths resolve against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// All item IDs in snapshot order.
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id).collect()
    }

    /// Top-level item IDs in snapshot order.
    pub fn top_level_ids(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|i| i.parent.is_none())
            .map(|i| i.id)
            .collect()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get(&self, id: ItemId) -> Result<&SnapshotItem> {
        self.index
            .get(&id)
            .map(|&pos| &self.items[pos])
            .ok_or(StoreError::ItemNotFound { id })
    }

    fn children_of(&self, id: ItemId, kind: &str) -> Result<Vec<ItemId>> {
        self.get(id)?;
        let Some(positions) = self.children.get(&id) else {
            return Ok(Vec::new());
        };
        Ok(positions
            .iter()
            .map(|&pos| &self.items[pos])
            .filter(|i| i.item_type == kind)
            .map(|i| i.id)
            .collect())
    }

    async fn read_attachment(&self, item: &SnapshotItem) -> Result<String> {
        let fetch_err = |reason: String| StoreError::BinaryFetch {
            id: item.id,
            reason,
        };
        let content = item
            .attachment
            .as_ref()
            .ok_or_else(|| fetch_err("attachment has no content".to_string()))?;

        if let Some(data) = &content.data {
            let bytes = STANDARD
                .decode(data.trim())
                .map_err(|e| fetch_err(format!("invalid base64 content: {}", e)))?;
            let mime = content
                .content_type
                .as_deref()
                .unwrap_or_else(|| guess_mime(&item.title));
            return Ok(to_data_uri(mime, &bytes));
        }

        if let Some(path) = &content.path {
            let full = match &self.base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path.clone(),
            };
            let bytes = tokio::fs::read(&full)
                .await
                .map_err(|e| fetch_err(format!("{}: {}", full.display(), e)))?;
            let mime = content
                .content_type
                .as_deref()
                .unwrap_or_else(|| guess_mime(path));
            debug!(attachment = %item.id, bytes = bytes.len(), "Attachment content read");
            return Ok(to_data_uri(mime, &bytes));
        }

        Err(fetch_err("attachment has neither path nor data".to_string()))
    }
}

#[async_trait]
impl ItemStore for SnapshotStore {
    fn is_top_level(&self, id: ItemId) -> Result<bool> {
        Ok(self.get(id)?.parent.is_none())
    }

    fn display_title(&self, id: ItemId) -> Result<String> {
        Ok(self.get(id)?.display_title())
    }

    fn item_type(&self, id: ItemId) -> Result<ItemType> {
        Ok(ItemType::parse(&self.get(id)?.item_type))
    }

    fn field_value(&self, id: ItemId, name: &str) -> Result<Option<String>> {
        Ok(self.get(id)?.fields.get(name).cloned())
    }

    fn extra_field_value(&self, id: ItemId, key: &str) -> Result<Option<String>> {
        Ok(self.get(id)?.extra.get(key).cloned())
    }

    fn creators(&self, id: ItemId) -> Result<Vec<Creator>> {
        Ok(self.get(id)?.creators.clone())
    }

    fn note_ids(&self, id: ItemId) -> Result<Vec<ItemId>> {
        self.children_of(id, "note")
    }

    fn note_body(&self, note: ItemId) -> Result<String> {
        let item = self.get(note)?;
        if item.item_type != "note" {
            return Err(StoreError::WrongItemType {
                id: note,
                expected: "note",
            });
        }
        Ok(item.note.clone().unwrap_or_default())
    }

    fn attachment_ids(&self, id: ItemId) -> Result<Vec<ItemId>> {
        self.children_of(id, "attachment")
    }

    fn attachment_display_title(&self, attachment: ItemId) -> Result<String> {
        let item = self.get(attachment)?;
        if item.item_type != "attachment" {
            return Err(StoreError::WrongItemType {
                id: attachment,
                expected: "attachment",
            });
        }
        Ok(item.display_title())
    }

    async fn attachment_data_uri(&self, attachment: ItemId) -> Result<String> {
        let item = self.get(attachment)?;
        if item.item_type != "attachment" {
            return Err(StoreError::WrongItemType {
                id: attachment,
                expected: "attachment",
            });
        }
        self.read_attachment(item).await
    }
}
