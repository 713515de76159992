//! Report sinks.
//!
//! The pipeline returns one HTML string; a sink is the single place it is
//! handed to for display. Each build writes to its sink exactly once.

use gr_common::to_data_uri;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::logging::event_names;

/// Errors writing a report to its destination.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write report to {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Destination for a finished report.
pub trait ReportSink {
    /// Short name for logs (`file`, `stdout`, ...).
    fn name(&self) -> &'static str;

    /// Hand the finished document over.
    fn display(&mut self, html: &str) -> Result<(), SinkError>;
}

/// Writes the report to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, html: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, html)
    }
}

impl ReportSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn display(&mut self, html: &str) -> Result<(), SinkError> {
        self.write(html).map_err(|source| SinkError::Io {
            target: self.path.display().to_string(),
            source,
        })?;
        info!(
            event = event_names::OUTPUT_WRITTEN,
            path = %self.path.display(),
            bytes = html.len(),
            "Report written"
        );
        Ok(())
    }
}

/// Writes the report to a stream, stdout by default.
#[derive(Debug)]
pub struct StdoutSink<W: Write = io::Stdout> {
    out: W,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StdoutSink<W> {
    /// Write to any stream instead of stdout.
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for StdoutSink<W> {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn display(&mut self, html: &str) -> Result<(), SinkError> {
        let to_sink_err = |source| SinkError::Io {
            target: "stdout".to_string(),
            source,
        };
        self.out.write_all(html.as_bytes()).map_err(to_sink_err)?;
        if !html.ends_with('\n') {
            self.out.write_all(b"\n").map_err(to_sink_err)?;
        }
        self.out.flush().map_err(to_sink_err)
    }
}

/// Re-encodes the report as a `data:text/html;base64,...` URL and forwards it.
///
/// The URL can be opened directly in a browser tab or used as an iframe `src`.
#[derive(Debug)]
pub struct DataUrlSink<S> {
    inner: S,
}

impl<S: ReportSink> DataUrlSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ReportSink> ReportSink for DataUrlSink<S> {
    fn name(&self) -> &'static str {
        "data-url"
    }

    fn display(&mut self, html: &str) -> Result<(), SinkError> {
        self.inner.display(&html_data_url(html))
    }
}

/// `data:text/html;base64,...` URL of a document.
pub fn html_data_url(html: &str) -> String {
    to_data_uri("text/html", html.as_bytes())
}
