//! Title, creator and field paragraphs for one item.

use super::html_escape;
use gr_common::{Creator, ItemId, ItemStore, StoreError};
use gr_config::{ExtraFieldKey, FieldSpec, ReportConfig};

/// Renders the descriptive part of an item's content cell.
#[derive(Debug, Clone)]
pub struct FieldRenderer {
    fields: Vec<FieldSpec>,
    extra_fields: Vec<ExtraFieldKey>,
}

impl FieldRenderer {
    /// Renderer for the configured built-in and extra fields.
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            fields: config.fields.clone(),
            extra_fields: config.ordered_extra_fields().into_iter().cloned().collect(),
        }
    }

    /// `<h2>` with the item's display title.
    pub fn render_header<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        id: ItemId,
    ) -> Result<String, StoreError> {
        let title = store.display_title(id)?;
        Ok(format!(
            r#"<h2 class="item-title">{}</h2>"#,
            html_escape(&title)
        ))
    }

    /// One `<p>` per creator role, roles in first-seen order.
    pub fn render_creators<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        id: ItemId,
    ) -> Result<String, StoreError> {
        let creators = store.creators(id)?;
        Ok(group_by_role(&creators)
            .into_iter()
            .map(|(role, names)| {
                let label = role_label(role, names.len());
                let joined = names
                    .iter()
                    .map(|n| html_escape(n))
                    .collect::<Vec<_>>()
                    .join(" & ");
                format!(
                    r#"<p class="creator">{}: {}</p>"#,
                    html_escape(&label),
                    joined
                )
            })
            .collect())
    }

    /// One `<p>` per built-in field, then one per extra field.
    ///
    /// A missing value renders as an empty string after the label.
    pub fn render_fields<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        id: ItemId,
    ) -> Result<String, StoreError> {
        let mut out = String::new();
        for field in &self.fields {
            let value = store.field_value(id, &field.name)?;
            out.push_str(&field_paragraph(&field.label, value.as_deref()));
        }
        for extra in &self.extra_fields {
            let value = store.extra_field_value(id, &extra.key)?;
            out.push_str(&field_paragraph(&extra.label, value.as_deref()));
        }
        Ok(out)
    }
}

fn field_paragraph(label: &str, value: Option<&str>) -> String {
    format!(
        r#"<p class="field">{}: {}</p>"#,
        html_escape(label),
        html_escape(value.unwrap_or(""))
    )
}

fn group_by_role(creators: &[Creator]) -> Vec<(&str, Vec<String>)> {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for creator in creators {
        let name = creator.display_name();
        match groups.iter_mut().find(|(role, _)| *role == creator.role) {
            Some((_, names)) => names.push(name),
            None => groups.push((creator.role.as_str(), vec![name])),
        }
    }
    groups
}

/// `author` -> `Author`, `seriesEditor` x2 -> `Series editors`.
fn role_label(role: &str, count: usize) -> String {
    let mut words = String::with_capacity(role.len() + 2);
    for (i, c) in role.chars().enumerate() {
        if i == 0 {
            words.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            words.push(' ');
            words.extend(c.to_lowercase());
        } else {
            words.push(c);
        }
    }
    if words.is_empty() {
        words.push_str("Creator");
    }
    if count > 1 {
        words.push('s');
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_common::{LibrarySnapshot, SnapshotItem, SnapshotStore};

    fn store(item: SnapshotItem) -> SnapshotStore {
        SnapshotStore::new(LibrarySnapshot {
            schema_version: gr_common::SNAPSHOT_SCHEMA_VERSION.to_string(),
            items: vec![item],
        })
        .unwrap()
    }

    #[test]
    fn test_role_label() {
        assert_eq!(role_label("author", 1), "Author");
        assert_eq!(role_label("author", 2), "Authors");
        assert_eq!(role_label("seriesEditor", 3), "Series editors");
        assert_eq!(role_label("", 1), "Creator");
    }

    #[test]
    fn test_creators_grouped_in_first_seen_order() {
        let store = store(
            SnapshotItem::new(1, "book", "Anthology")
                .with_creator(Creator::new("author", "Alice", ""))
                .with_creator(Creator::new("editor", "Carol", ""))
                .with_creator(Creator::new("author", "Bob", "")),
        );
        let html = FieldRenderer::new(&ReportConfig::default())
            .render_creators(&store, ItemId(1))
            .unwrap();
        assert_eq!(
            html,
            r#"<p class="creator">Authors: Alice & Bob</p><p class="creator">Editor: Carol</p>"#
        );
    }

    #[test]
    fn test_no_creators_renders_nothing() {
        let store = store(SnapshotItem::new(1, "book", "Anonymous"));
        let html = FieldRenderer::new(&ReportConfig::default())
            .render_creators(&store, ItemId(1))
            .unwrap();
        assert!(html.is_empty());
    }

    #[test]
    fn test_creator_names_are_escaped() {
        let store = store(
            SnapshotItem::new(1, "book", "x").with_creator(Creator::new("author", "<b>", "O'Brien")),
        );
        let html = FieldRenderer::new(&ReportConfig::default())
            .render_creators(&store, ItemId(1))
            .unwrap();
        assert!(html.contains("&lt;b&gt; O&#x27;Brien"));
    }

    #[test]
    fn test_header_escapes_title() {
        let store = store(SnapshotItem::new(1, "book", "Cats & Dogs"));
        let html = FieldRenderer::new(&ReportConfig::default())
            .render_header(&store, ItemId(1))
            .unwrap();
        assert_eq!(html, r#"<h2 class="item-title">Cats &amp; Dogs</h2>"#);
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let store = store(SnapshotItem::new(1, "book", "Dune").with_field("date", "1965"));
        let config = ReportConfig::default()
            .with_fields(vec![
                FieldSpec::new("date", "Date"),
                FieldSpec::new("publisher", "Publisher"),
            ])
            .with_extra_field_keys(vec![]);
        let html = FieldRenderer::new(&config)
            .render_fields(&store, ItemId(1))
            .unwrap();
        assert_eq!(
            html,
            r#"<p class="field">Date: 1965</p><p class="field">Publisher: </p>"#
        );
    }

    #[test]
    fn test_extra_fields_follow_builtins_by_display_index() {
        let store = store(
            SnapshotItem::new(1, "book", "Dune")
                .with_field("date", "1965")
                .with_extra("room", "Study")
                .with_extra("shelf", "B2"),
        );
        let config = ReportConfig::default()
            .with_fields(vec![FieldSpec::new("date", "Date")])
            .with_extra_field_keys(vec![
                ExtraFieldKey::new("shelf", "Shelf", 2),
                ExtraFieldKey::new("room", "Room", 1),
            ]);
        let html = FieldRenderer::new(&config)
            .render_fields(&store, ItemId(1))
            .unwrap();
        assert_eq!(
            html,
            r#"<p class="field">Date: 1965</p><p class="field">Room: Study</p><p class="field">Shelf: B2</p>"#
        );
    }

    #[test]
    fn test_unknown_item_propagates() {
        let store = store(SnapshotItem::new(1, "book", "Dune"));
        let err = FieldRenderer::new(&ReportConfig::default())
            .render_fields(&store, ItemId(99))
            .unwrap_err();
        assert!(matches!(err, StoreError::ItemNotFound { .. }));
    }
}
