//! Report generator implementation.

use crate::assets::IconSet;
use crate::document::{HtmlDocument, Section};
use crate::error::Result;
use crate::logging::{event_names, logged, logged_sync, Step};
use crate::render::{children, html_escape, CoverResolver, FieldRenderer};

use chrono::{DateTime, Utc};
use gr_common::{ItemId, ItemStore, StoreError};
use gr_config::{FailurePolicy, ReportConfig};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// HTML produced for one item. Lives only until the table is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub id: ItemId,
    /// Cover cell content (`<img>` or the placeholder).
    pub cover: String,
    /// Content cell: title, creators, fields, notes, attachments.
    pub content: String,
}

impl RenderedItem {
    /// One table row: cover cell, then content cell.
    pub fn to_row(&self) -> String {
        format!(
            r#"<tr><td class="cover">{}</td><td class="content">{}</td></tr>"#,
            self.cover, self.content
        )
    }
}

/// Report generator.
///
/// Holds no per-build state: every [`build_report`](Self::build_report) call
/// creates its own [`HtmlDocument`].
pub struct ReportGenerator {
    config: ReportConfig,
    fields: FieldRenderer,
    covers: CoverResolver,
    print_icon: Option<String>,
    generated_at: Option<DateTime<Utc>>,
}

impl ReportGenerator {
    /// Create a new report generator with configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self {
            fields: FieldRenderer::new(&config),
            covers: CoverResolver::from_config(&config),
            config,
            print_icon: None,
            generated_at: None,
        }
    }

    /// Create a generator with default configuration.
    pub fn default_config() -> Self {
        Self::new(ReportConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Use this markup inside the print button instead of the configured icon.
    pub fn with_print_icon(mut self, markup: impl Into<String>) -> Self {
        self.print_icon = Some(markup.into());
        self
    }

    /// Pin the generation timestamp written to the document head.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Render the selected items into one HTML document string.
    ///
    /// Items that are not top-level are dropped. Under
    /// [`FailurePolicy::Abort`] the first failing item aborts the build and
    /// no partial report is returned.
    pub async fn build_report<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        items: &[ItemId],
    ) -> Result<String> {
        let start = Instant::now();
        let document = self.build_document(store, items).await?;
        let html = document.serialize();

        let output = if self.config.minify {
            let cfg = minify_html::Cfg {
                minify_js: true,
                minify_css: true,
                ..Default::default()
            };
            String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
        } else {
            html
        };

        info!(
            event = event_names::REPORT_FINISHED,
            bytes = output.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            title = %self.config.title,
            "Report generated"
        );
        Ok(output)
    }

    /// Build the document without serializing it.
    pub async fn build_document<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        items: &[ItemId],
    ) -> Result<HtmlDocument> {
        info!(
            event = event_names::REPORT_STARTED,
            requested = items.len(),
            failure_policy = ?self.config.failure_policy,
            "Building report"
        );

        let retained = match logged_sync(Step::Filter, None, || filter_top_level(store, items)) {
            Ok(retained) => retained,
            Err(err) => {
                error!(event = event_names::REPORT_FAILED, error = %err, "Report aborted");
                return Err(err.into());
            }
        };
        debug!(
            event = event_names::REPORT_FILTERED,
            requested = items.len(),
            retained = retained.len(),
            "Filtered to top-level items"
        );

        let mut rows = Vec::with_capacity(retained.len());
        let mut skipped = 0usize;
        for id in retained {
            match self.render_item(store, id).await {
                Ok(rendered) => {
                    debug!(event = event_names::REPORT_ITEM_RENDERED, item = %id, "Item rendered");
                    rows.push(rendered.to_row());
                }
                Err(err) if self.config.failure_policy == FailurePolicy::SkipItem => {
                    warn!(event = event_names::REPORT_ITEM_SKIPPED, item = %id, error = %err, "Item skipped");
                    skipped += 1;
                }
                Err(err) => {
                    error!(event = event_names::REPORT_FAILED, item = %id, error = %err, "Report aborted");
                    return Err(err);
                }
            }
        }

        logged_sync(Step::Assemble, None, || self.assemble(&rows, skipped))
    }

    /// Render one item: header, creators, fields, notes, attachments, cover.
    pub async fn render_item<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        id: ItemId,
    ) -> Result<RenderedItem> {
        let item = Some(id);
        let mut content =
            logged_sync(Step::Header, item, || self.fields.render_header(store, id))?;
        content.push_str(&logged_sync(Step::Creators, item, || {
            self.fields.render_creators(store, id)
        })?);
        content.push_str(&logged_sync(Step::Fields, item, || {
            self.fields.render_fields(store, id)
        })?);
        content.push_str(&logged_sync(Step::Notes, item, || {
            children::render_notes(store, id)
        })?);
        content.push_str(&logged_sync(Step::Attachments, item, || {
            children::render_attachments(store, id)
        })?);
        let cover = logged(Step::Cover, item, self.covers.resolve_cover(store, id)).await?;

        Ok(RenderedItem { id, cover, content })
    }

    fn assemble(&self, rows: &[String], skipped: usize) -> Result<HtmlDocument> {
        let mut doc = HtmlDocument::new(self.config.title.as_str());

        doc.append(
            Section::Head,
            format!(
                r#"<meta name="generator" content="greatify {}">"#,
                env!("CARGO_PKG_VERSION")
            ),
        );
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        doc.append(
            Section::Head,
            format!(
                r#"<meta name="generated" content="{}">"#,
                generated_at.to_rfc3339()
            ),
        );
        for href in &self.config.stylesheet_links {
            doc.append(
                Section::Head,
                format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(href)),
            );
        }
        doc.append(Section::Css, self.config.stylesheet.as_str());

        doc.append(Section::Body, count_header(rows.len()));
        if skipped > 0 {
            doc.append(
                Section::Body,
                format!(
                    r#"<p class="empty no-print">{} {} could not be rendered and {} left out.</p>"#,
                    skipped,
                    if skipped == 1 { "item" } else { "items" },
                    if skipped == 1 { "was" } else { "were" },
                ),
            );
        }
        doc.append(Section::Body, r#"<table class="report"><tbody>"#);
        doc.append(Section::Body, rows);
        doc.append(Section::Body, "</tbody></table>");

        if self.config.print_button {
            let icon = self.print_icon_markup()?;
            doc.append(
                Section::Body,
                format!(
                    r#"<button class="no-print" onclick="window.print()">{}Print</button>"#,
                    icon
                ),
            );
        }

        Ok(doc)
    }

    fn print_icon_markup(&self) -> Result<String> {
        if let Some(markup) = &self.print_icon {
            return Ok(markup.clone());
        }
        match (&self.config.icon_dir, &self.config.print_icon) {
            (Some(dir), Some(name)) => IconSet::new(dir).img(name),
            _ => Ok(String::new()),
        }
    }
}

/// `<h1>` stating how many items the table holds.
fn count_header(count: usize) -> String {
    format!(
        "<h1>Report ({} {})</h1>",
        count,
        if count == 1 { "item" } else { "items" }
    )
}

/// Keep only top-level items, preserving order.
fn filter_top_level<S: ItemStore + ?Sized>(
    store: &S,
    items: &[ItemId],
) -> std::result::Result<Vec<ItemId>, StoreError> {
    let mut retained = Vec::with_capacity(items.len());
    for &id in items {
        if store.is_top_level(id)? {
            retained.push(id);
        }
    }
    Ok(retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gr_common::{AttachmentContent, Creator, LibrarySnapshot, SnapshotItem, SnapshotStore};

    fn sample() -> SnapshotStore {
        SnapshotStore::new(LibrarySnapshot {
            schema_version: gr_common::SNAPSHOT_SCHEMA_VERSION.to_string(),
            items: vec![
                SnapshotItem::new(1, "book", "Dune")
                    .with_field("date", "1965")
                    .with_creator(Creator::new("author", "Frank", "Herbert")),
                SnapshotItem::new(2, "attachment", "cover.jpg")
                    .with_parent(1)
                    .with_attachment(AttachmentContent::inline("image/jpeg", b"jpg")),
                SnapshotItem::new(3, "book", "Emma"),
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_report_generator_default() {
        let generator = ReportGenerator::default_config();
        assert_eq!(generator.config().title, "report");
        assert!(generator.config().print_button);
    }

    #[test]
    fn test_count_header() {
        assert_eq!(count_header(0), "<h1>Report (0 items)</h1>");
        assert_eq!(count_header(1), "<h1>Report (1 item)</h1>");
        assert_eq!(count_header(3), "<h1>Report (3 items)</h1>");
    }

    #[test]
    fn test_row_layout() {
        let row = RenderedItem {
            id: ItemId(1),
            cover: "C".into(),
            content: "X".into(),
        }
        .to_row();
        assert_eq!(row, r#"<tr><td class="cover">C</td><td class="content">X</td></tr>"#);
    }

    #[test]
    fn test_filter_drops_children() {
        let store = sample();
        let kept = filter_top_level(&store, &[ItemId(2), ItemId(1), ItemId(3)]).unwrap();
        assert_eq!(kept, vec![ItemId(1), ItemId(3)]);
    }

    #[tokio::test]
    async fn test_empty_report() {
        let store = sample();
        let html = ReportGenerator::default_config()
            .build_report(&store, &[])
            .await
            .unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Report (0 items)</h1>"));
        assert!(html.contains(r#"onclick="window.print()""#));
    }

    #[tokio::test]
    async fn test_report_with_items() {
        let store = sample();
        let html = ReportGenerator::default_config()
            .build_report(&store, &[ItemId(1), ItemId(2), ItemId(3)])
            .await
            .unwrap();
        assert!(html.contains("<h1>Report (2 items)</h1>"));
        assert!(html.contains(r#"<h2 class="item-title">Dune</h2>"#));
        assert!(html.contains("Author: Frank Herbert"));
        assert!(html.contains(r#"<img src="data:image/jpeg;base64,"#));
        assert_eq!(html.matches("<tr>").count(), 2);
    }

    #[tokio::test]
    async fn test_print_button_optional_with_custom_icon() {
        let store = sample();
        let mut config = ReportConfig::default();
        config.print_button = false;
        let html = ReportGenerator::new(config).build_report(&store, &[]).await.unwrap();
        assert!(!html.contains("window.print()"));

        let html = ReportGenerator::default_config()
            .with_print_icon("<svg id=\"p\"></svg>")
            .build_report(&store, &[])
            .await
            .unwrap();
        assert!(html.contains(r#"<svg id="p"></svg>Print</button>"#));
    }

    #[tokio::test]
    async fn test_configured_print_icon_is_embedded_as_img() {
        let store = sample();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("printer.svg"), "<svg/>").unwrap();
        let mut config = ReportConfig::default();
        config.icon_dir = Some(dir.path().to_path_buf());
        config.print_icon = Some("printer".into());
        let html = ReportGenerator::new(config).build_report(&store, &[]).await.unwrap();
        assert!(html.contains(r#"<button class="no-print" onclick="window.print()"><img class="icon" src="data:image/svg+xml;base64,PHN2Zy8+""#));
        assert!(!html.contains("<svg/>"));
    }

    #[tokio::test]
    async fn test_missing_print_icon_fails_the_build() {
        let store = sample();
        let dir = tempfile::tempdir().unwrap();
        let mut config = ReportConfig::default();
        config.icon_dir = Some(dir.path().to_path_buf());
        config.print_icon = Some("printer".into());
        let err = ReportGenerator::new(config).build_report(&store, &[]).await.unwrap_err();
        assert!(matches!(err, crate::ReportError::AssetError { ref name, .. } if name == "printer"));
    }

    #[tokio::test]
    async fn test_head_metadata_and_links() {
        let store = sample();
        let mut config = ReportConfig::default().with_title("Shelf");
        config.stylesheet_links = vec!["https://example.org/a.css".into()];
        let at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let html = ReportGenerator::new(config)
            .with_generated_at(at)
            .build_report(&store, &[])
            .await
            .unwrap();
        assert!(html.contains("<title>Shelf</title>"));
        assert!(html.contains(r#"<meta name="generator" content="greatify "#));
        assert!(html.contains(r#"content="2026-01-02T03:04:05+00:00""#));
        assert!(html.contains(r#"<link rel="stylesheet" href="https://example.org/a.css">"#));
    }

    #[tokio::test]
    async fn test_minified_output_is_smaller() {
        let store = sample();
        let plain = ReportGenerator::default_config()
            .build_report(&store, &[ItemId(1)])
            .await
            .unwrap();
        let minified = ReportGenerator::new(ReportConfig::default().with_minify(true))
            .build_report(&store, &[ItemId(1)])
            .await
            .unwrap();
        assert!(minified.len() < plain.len());
        assert!(minified.contains("Dune"));
    }
}
