//! Report configuration types.

use crate::resolve::ConfigSource;
use crate::validate::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// How the cover resolver recognizes a cover attachment by its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CoverFilenameRule {
    /// Title must equal the pattern exactly.
    Exact(String),
    /// Title must contain the pattern, ignoring case.
    Substring(String),
}

impl Default for CoverFilenameRule {
    fn default() -> Self {
        CoverFilenameRule::Exact("cover.jpg".to_string())
    }
}

impl CoverFilenameRule {
    /// Whether an attachment title names a cover image.
    pub fn matches(&self, title: &str) -> bool {
        match self {
            CoverFilenameRule::Exact(pattern) => title == pattern,
            CoverFilenameRule::Substring(pattern) => title
                .to_lowercase()
                .contains(&pattern.to_lowercase()),
        }
    }

    /// The configured pattern.
    pub fn pattern(&self) -> &str {
        match self {
            CoverFilenameRule::Exact(p) | CoverFilenameRule::Substring(p) => p,
        }
    }
}

/// A built-in item field shown in the content cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    /// Store field name (`date`, `publisher`, `archiveLocation`, ...).
    pub name: String,
    /// Label printed before the value.
    pub label: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// A plugin-defined extra field shown after the built-in fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtraFieldKey {
    /// Key in the item's extra-field store.
    pub key: String,
    /// Label printed before the value.
    pub label: String,
    /// Position among the extra fields; lower comes first.
    #[serde(default)]
    pub display_index: u32,
}

impl ExtraFieldKey {
    pub fn new(key: impl Into<String>, label: impl Into<String>, display_index: u32) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            display_index,
        }
    }
}

/// What happens when one item fails to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole report (baseline).
    #[default]
    Abort,
    /// Drop the failing item and keep going.
    SkipItem,
}

/// What happens when a cover image cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CoverErrorPolicy {
    /// Treat the fetch failure like any other store error.
    #[default]
    Propagate,
    /// Render the placeholder box instead.
    Placeholder,
}

/// Complete report configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReportConfig {
    /// Schema version.
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    /// Document title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Cover detection rule.
    #[serde(default)]
    pub cover_filename_rule: CoverFilenameRule,
    /// Built-in fields, in display order.
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldSpec>,
    /// Extra fields, ordered by `display_index`.
    #[serde(default = "default_extra_field_keys")]
    pub extra_field_keys: Vec<ExtraFieldKey>,
    /// Raw CSS injected into the document.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
    /// Decorative stylesheet links.
    #[serde(default)]
    pub stylesheet_links: Vec<String>,
    /// Render the print button.
    #[serde(default = "default_true")]
    pub print_button: bool,
    /// Directory holding `<name>.svg` icons.
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
    /// Name of the icon shown inside the print button.
    #[serde(default)]
    pub print_icon: Option<String>,
    /// Per-item failure handling.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Cover fetch failure handling.
    #[serde(default)]
    pub cover_errors: CoverErrorPolicy,
    /// Minify the final document.
    #[serde(default)]
    pub minify: bool,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

fn default_title() -> String {
    "report".to_string()
}

fn default_true() -> bool {
    true
}

fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("date", "Date"),
        FieldSpec::new("publisher", "Publisher"),
        FieldSpec::new("edition", "Edition"),
        FieldSpec::new("series", "Series"),
        FieldSpec::new("ISBN", "ISBN"),
        FieldSpec::new("archiveLocation", "Location"),
        FieldSpec::new("numPages", "Pages"),
    ]
}

fn default_extra_field_keys() -> Vec<ExtraFieldKey> {
    vec![ExtraFieldKey::new("itemBoxFieldEditable", "Notes field", 0)]
}

fn default_stylesheet() -> String {
    r#"body { font-family: Georgia, serif; margin: 2rem; color: #222; }
h1 { font-size: 1.6rem; }
table.report { border-collapse: collapse; width: 100%; }
table.report td { border-top: 1px solid #ccc; padding: 0.75rem; vertical-align: top; }
td.cover { width: 160px; }
td.cover img { max-width: 150px; max-height: 220px; }
.cover-placeholder { width: 150px; height: 220px; background: #eee; border: 1px solid #ddd; }
.item-title { margin: 0 0 0.5rem 0; font-size: 1.2rem; }
.field, .creator { margin: 0.15rem 0; }
.empty { color: #999; font-style: italic; }
@media print { .no-print { display: none !important; } tr { page-break-inside: avoid; } }"#
        .to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            title: default_title(),
            cover_filename_rule: CoverFilenameRule::default(),
            fields: default_fields(),
            extra_field_keys: default_extra_field_keys(),
            stylesheet: default_stylesheet(),
            stylesheet_links: Vec::new(),
            print_button: true,
            icon_dir: None,
            print_icon: None,
            failure_policy: FailurePolicy::default(),
            cover_errors: CoverErrorPolicy::default(),
            minify: false,
        }
    }
}

impl ReportConfig {
    /// Create a new report configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the cover detection rule.
    pub fn with_cover_rule(mut self, rule: CoverFilenameRule) -> Self {
        self.cover_filename_rule = rule;
        self
    }

    /// Replace the built-in field list.
    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the extra field list.
    pub fn with_extra_field_keys(mut self, keys: Vec<ExtraFieldKey>) -> Self {
        self.extra_field_keys = keys;
        self
    }

    /// Replace the stylesheet.
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = css.into();
        self
    }

    /// Set the per-item failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set the cover fetch failure policy.
    pub fn with_cover_errors(mut self, policy: CoverErrorPolicy) -> Self {
        self.cover_errors = policy;
        self
    }

    /// Enable output minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Extra field keys sorted by display index (stable for equal indices).
    pub fn ordered_extra_fields(&self) -> Vec<&ExtraFieldKey> {
        let mut keys: Vec<&ExtraFieldKey> = self.extra_field_keys.iter().collect();
        keys.sort_by_key(|k| k.display_index);
        keys
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load configuration from TOML.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a `.json` or `.toml` file, chosen by extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);
        let parsed = if is_toml {
            Self::from_toml(&content).map_err(|e| e.to_string())
        } else {
            Self::from_json(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// A validated configuration and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ReportConfig,
    /// File the configuration was read from, if any.
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}
