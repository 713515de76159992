//! HTML report generator for library item selections.
//!
//! Turns a selection of items from an [`ItemStore`](gr_common::ItemStore)
//! into one self-contained, printable HTML document.
//!
//! # Pipeline
//!
//! - Filter: only top-level items are reported
//! - Per item, in order: title, creators, fields, notes, attachments, cover
//! - Rows: one table row per item (cover cell + content cell)
//! - Document: the table, a print button and the stylesheet are assembled by
//!   the section-based [`HtmlDocument`] builder
//!
//! Cover images are the only asynchronous step; they are fetched one item at
//! a time.
//!
//! # Example
//!
//! ```no_run
//! use gr_common::SnapshotStore;
//! use gr_report::{ReportConfig, ReportGenerator};
//! use std::path::Path;
//!
//! # async fn run() -> gr_report::Result<()> {
//! let store = SnapshotStore::open(Path::new("library.json"))?;
//! let generator = ReportGenerator::new(ReportConfig::default());
//! let html = generator.build_report(&store, &store.top_level_ids()).await?;
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod document;
pub mod error;
pub mod generator;
pub mod logging;
pub mod render;

pub use assets::IconSet;
pub use document::{HtmlDocument, IntoFragments, Section};
pub use error::{ReportError, Result};
pub use generator::{RenderedItem, ReportGenerator};
pub use gr_config::ReportConfig;
pub use render::{is_attachment_or_note, CoverResolver, FieldRenderer};
