//! Item type tags and creators.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Item type tag.
///
/// The store knows many regular types (`book`, `journalArticle`, ...);
/// only `attachment` and `note` change how an item is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    /// A file or link attached to another item.
    Attachment,
    /// A rich-text note.
    Note,
    /// Any bibliographic type, keyed by its tag.
    Regular(String),
}

impl ItemType {
    /// Parse an item-type tag as reported by the store.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "attachment" => ItemType::Attachment,
            "note" => ItemType::Note,
            other => ItemType::Regular(other.to_string()),
        }
    }

    /// The tag string.
    pub fn as_str(&self) -> &str {
        match self {
            ItemType::Attachment => "attachment",
            ItemType::Note => "note",
            ItemType::Regular(tag) => tag,
        }
    }

    /// True for `attachment` and `note` items.
    ///
    /// Such items never get a cover, a notes list or an attachments list of
    /// their own.
    pub fn is_attachment_or_note(&self) -> bool {
        matches!(self, ItemType::Attachment | ItemType::Note)
    }
}

impl From<String> for ItemType {
    fn from(tag: String) -> Self {
        ItemType::parse(&tag)
    }
}

impl From<ItemType> for String {
    fn from(item_type: ItemType) -> Self {
        item_type.as_str().to_string()
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creator of an item (author, editor, translator, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    /// Role tag, e.g. `author` or `editor`.
    #[serde(alias = "creatorType")]
    pub role: String,
    /// Given name. Empty for single-field names.
    #[serde(default)]
    pub first_name: String,
    /// Family name, or the whole name for single-field names.
    #[serde(default)]
    pub last_name: String,
}

impl Creator {
    /// Create a creator from role and name parts.
    pub fn new(
        role: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last", skipping empty parts.
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }
}
