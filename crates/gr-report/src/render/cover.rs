//! Cover image resolution.

use super::{html_escape, is_attachment_or_note};
use crate::error::{ReportError, Result};
use gr_common::{ItemId, ItemStore};
use gr_config::{CoverErrorPolicy, CoverFilenameRule, ReportConfig};
use tracing::{debug, warn};

/// Fixed-size neutral box shown when an item has no usable cover.
pub const COVER_PLACEHOLDER: &str =
    r#"<div class="cover-placeholder" style="width:150px;height:220px"></div>"#;

/// Finds an item's cover attachment and embeds it as an `<img>`.
#[derive(Debug, Clone)]
pub struct CoverResolver {
    rule: CoverFilenameRule,
    on_error: CoverErrorPolicy,
}

impl CoverResolver {
    pub fn new(rule: CoverFilenameRule, on_error: CoverErrorPolicy) -> Self {
        Self { rule, on_error }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.cover_filename_rule.clone(), config.cover_errors)
    }

    /// First attachment, in store order, whose title matches the rule.
    ///
    /// Returns the attachment and its title. Attachment and note items never
    /// have a candidate.
    pub fn find_candidate<S: ItemStore + ?Sized>(
        &self,
        store: &S,
        id: ItemId,
    ) -> Result<Option<(ItemId, String)>> {
        if is_attachment_or_note(&store.item_type(id)?) {
            return Ok(None);
        }
        for attachment in store.attachment_ids(id)? {
            let title = store.attachment_display_title(attachment)?;
            if self.rule.matches(&title) {
                return Ok(Some((attachment, title)));
            }
        }
        Ok(None)
    }

    /// Cover cell content for one item.
    ///
    /// Awaits at most one attachment fetch. With
    /// [`CoverErrorPolicy::Placeholder`] a failed fetch yields the
    /// placeholder; every other store error propagates.
    pub async fn resolve_cover<S: ItemStore + ?Sized>(&self, store: &S, id: ItemId) -> Result<String> {
        let Some((attachment, title)) = self.find_candidate(store, id)? else {
            return Ok(COVER_PLACEHOLDER.to_string());
        };

        debug!(item = %id, attachment = %attachment, "Fetching cover");
        match store.attachment_data_uri(attachment).await {
            Ok(uri) => Ok(format!(
                r#"<img src="{}" alt="{}">"#,
                html_escape(&uri),
                html_escape(&title)
            )),
            Err(err) if err.is_binary_fetch() && self.on_error == CoverErrorPolicy::Placeholder => {
                warn!(item = %id, attachment = %attachment, error = %err, "Cover fetch failed, using placeholder");
                Ok(COVER_PLACEHOLDER.to_string())
            }
            Err(err) => Err(ReportError::from(err)),
        }
    }
}
