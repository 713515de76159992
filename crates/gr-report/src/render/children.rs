//! Child note and attachment lists.

use super::{html_escape, is_attachment_or_note};
use gr_common::{ItemId, ItemStore, StoreError};

/// Fragment for an item without notes.
pub const EMPTY_NOTES: &str = r#"<p class="empty">No notes</p>"#;

/// Fragment for an item without attachments.
pub const EMPTY_ATTACHMENTS: &str = r#"<p class="empty">No attachments</p>"#;

/// Notes header plus one `<li>` per child note, in store order.
///
/// Note bodies are rich HTML from the store and are embedded unescaped.
pub fn render_notes<S: ItemStore + ?Sized>(store: &S, id: ItemId) -> Result<String, StoreError> {
    if is_attachment_or_note(&store.item_type(id)?) {
        return Ok(EMPTY_NOTES.to_string());
    }
    let notes = store.note_ids(id)?;
    if notes.is_empty() {
        return Ok(EMPTY_NOTES.to_string());
    }

    let mut out = format!(r#"<h3>Notes ({})</h3><ul class="notes">"#, notes.len());
    for note in notes {
        out.push_str(r#"<li class="note">"#);
        out.push_str(&store.note_body(note)?);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    Ok(out)
}

/// Attachments header plus one `<li>` per child attachment title, in store order.
pub fn render_attachments<S: ItemStore + ?Sized>(
    store: &S,
    id: ItemId,
) -> Result<String, StoreError> {
    if is_attachment_or_note(&store.item_type(id)?) {
        return Ok(EMPTY_ATTACHMENTS.to_string());
    }
    let attachments = store.attachment_ids(id)?;
    if attachments.is_empty() {
        return Ok(EMPTY_ATTACHMENTS.to_string());
    }

    let mut out = format!(
        r#"<h3>Attachments ({})</h3><ul class="attachments">"#,
        attachments.len()
    );
    for attachment in attachments {
        let title = store.attachment_display_title(attachment)?;
        out.push_str(&format!(
            r#"<li class="attachment">{}</li>"#,
            html_escape(&title)
        ));
    }
    out.push_str("</ul>");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_common::{AttachmentContent, LibrarySnapshot, SnapshotItem, SnapshotStore};

    fn store(items: Vec<SnapshotItem>) -> SnapshotStore {
        SnapshotStore::new(LibrarySnapshot {
            schema_version: gr_common::SNAPSHOT_SCHEMA_VERSION.to_string(),
            items,
        })
        .unwrap()
    }

    #[test]
    fn test_no_children_renders_empty_states() {
        let store = store(vec![SnapshotItem::new(1, "book", "Dune")]);
        assert_eq!(render_notes(&store, ItemId(1)).unwrap(), EMPTY_NOTES);
        assert_eq!(render_attachments(&store, ItemId(1)).unwrap(), EMPTY_ATTACHMENTS);
    }

    #[test]
    fn test_notes_in_store_order() {
        let store = store(vec![
            SnapshotItem::new(1, "book", "Dune"),
            SnapshotItem::new(2, "note", "").with_parent(1).with_note("<p>first</p>"),
            SnapshotItem::new(3, "note", "").with_parent(1).with_note("<p>second</p>"),
        ]);
        let html = render_notes(&store, ItemId(1)).unwrap();
        assert_eq!(
            html,
            r#"<h3>Notes (2)</h3><ul class="notes"><li class="note"><p>first</p></li><li class="note"><p>second</p></li></ul>"#
        );
    }

    #[test]
    fn test_attachment_titles_are_escaped() {
        let store = store(vec![
            SnapshotItem::new(1, "book", "Dune"),
            SnapshotItem::new(2, "attachment", "a<b>.pdf")
                .with_parent(1)
                .with_attachment(AttachmentContent::from_path("a.pdf")),
        ]);
        let html = render_attachments(&store, ItemId(1)).unwrap();
        assert!(html.starts_with("<h3>Attachments (1)</h3>"));
        assert!(html.contains(r#"<li class="attachment">a&lt;b&gt;.pdf</li>"#));
    }

    #[test]
    fn test_attachments_in_store_order() {
        let store = store(vec![
            SnapshotItem::new(1, "book", "Dune"),
            SnapshotItem::new(2, "attachment", "notes.pdf").with_parent(1),
            SnapshotItem::new(3, "note", "").with_parent(1).with_note("aside"),
            SnapshotItem::new(4, "attachment", "cover.jpg").with_parent(1),
        ]);
        let html = render_attachments(&store, ItemId(1)).unwrap();
        assert_eq!(
            html,
            r#"<h3>Attachments (2)</h3><ul class="attachments"><li class="attachment">notes.pdf</li><li class="attachment">cover.jpg</li></ul>"#
        );
    }

    #[test]
    fn test_attachment_item_ignores_its_children() {
        let store = store(vec![
            SnapshotItem::new(1, "attachment", "scan.pdf"),
            SnapshotItem::new(2, "note", "").with_parent(1).with_note("annotation"),
            SnapshotItem::new(3, "attachment", "page.png").with_parent(1),
        ]);
        assert_eq!(render_notes(&store, ItemId(1)).unwrap(), EMPTY_NOTES);
        assert_eq!(render_attachments(&store, ItemId(1)).unwrap(), EMPTY_ATTACHMENTS);
    }
}
