//! Per-item HTML fragment renderers.

pub mod children;
pub mod cover;
pub mod fields;

pub use children::{render_attachments, render_notes, EMPTY_ATTACHMENTS, EMPTY_NOTES};
pub use cover::{CoverResolver, COVER_PLACEHOLDER};
pub use fields::FieldRenderer;

use gr_common::ItemType;

/// Whether an item is itself an attachment or a note.
///
/// Cover, notes and attachments rendering all gate on this one predicate.
pub fn is_attachment_or_note(item_type: &ItemType) -> bool {
    item_type.is_attachment_or_note()
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
