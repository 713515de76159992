//! Static icon assets.
//!
//! Icons live as `<name>.svg` files in one directory and are embedded as
//! `data:` URIs so the report stays self-contained.

use crate::error::{ReportError, Result};
use gr_common::to_data_uri;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A directory of named SVG icons.
#[derive(Debug, Clone)]
pub struct IconSet {
    dir: PathBuf,
}

impl IconSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the icons are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(ReportError::AssetError {
                name: name.to_string(),
                reason: "icon names must be bare file stems".to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.svg", name)))
    }

    /// An icon as a `data:image/svg+xml;base64,...` URI.
    pub fn data_uri(&self, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        let bytes = std::fs::read(&path).map_err(|e| ReportError::AssetError {
            name: name.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })?;
        debug!(icon = name, bytes = bytes.len(), "Icon loaded");
        Ok(to_data_uri("image/svg+xml", &bytes))
    }

    /// `<img>` tag for an icon, sized for inline use in buttons.
    pub fn img(&self, name: &str) -> Result<String> {
        Ok(format!(
            r#"<img class="icon" src="{}" alt="" width="16" height="16">"#,
            self.data_uri(name)?
        ))
    }
}
