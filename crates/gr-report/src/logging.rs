//! Step logging for the report pipeline.
//!
//! Every assembler step runs through [`logged`] (or [`logged_sync`]), which
//! emits a trace event on entry and a warning on the error path. Events
//! carry a stable `event` name and the `step`, so JSONL consumers can filter
//! without parsing messages.

use gr_common::ItemId;
use std::fmt;
use std::future::Future;
use tracing::{trace, warn};

/// Standard event names used in logging.
pub mod event_names {
    pub const REPORT_STARTED: &str = "report.started";
    pub const REPORT_FILTERED: &str = "report.filtered";
    pub const REPORT_STEP: &str = "report.step";
    pub const REPORT_STEP_FAILED: &str = "report.step_failed";
    pub const REPORT_ITEM_RENDERED: &str = "report.item_rendered";
    pub const REPORT_ITEM_SKIPPED: &str = "report.item_skipped";
    pub const REPORT_FINISHED: &str = "report.finished";
    pub const REPORT_FAILED: &str = "report.failed";
}

/// Pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Filter,
    Header,
    Creators,
    Fields,
    Notes,
    Attachments,
    Cover,
    Assemble,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::Filter => "filter",
            Step::Header => "header",
            Step::Creators => "creators",
            Step::Fields => "fields",
            Step::Notes => "notes",
            Step::Attachments => "attachments",
            Step::Cover => "cover",
            Step::Assemble => "assemble",
        };
        write!(f, "{}", s)
    }
}

fn entered(step: Step, item: Option<ItemId>) {
    match item {
        Some(item) => trace!(event = event_names::REPORT_STEP, %step, %item, "Step started"),
        None => trace!(event = event_names::REPORT_STEP, %step, "Step started"),
    }
}

fn failed(step: Step, item: Option<ItemId>, error: &dyn fmt::Display) {
    match item {
        Some(item) => warn!(event = event_names::REPORT_STEP_FAILED, %step, %item, %error, "Step failed"),
        None => warn!(event = event_names::REPORT_STEP_FAILED, %step, %error, "Step failed"),
    }
}

/// Run an async step, logging entry and failure.
pub async fn logged<T, E, F>(step: Step, item: Option<ItemId>, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    entered(step, item);
    let result = fut.await;
    if let Err(err) = &result {
        failed(step, item, err);
    }
    result
}

/// Run a synchronous step, logging entry and failure.
pub fn logged_sync<T, E, F>(step: Step, item: Option<ItemId>, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: fmt::Display,
{
    entered(step, item);
    let result = f();
    if let Err(err) = &result {
        failed(step, item, err);
    }
    result
}
