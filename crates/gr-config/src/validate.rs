//! Configuration validation errors and semantic validation.

use crate::report::ReportConfig;
use std::collections::HashSet;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::SemanticError(_) => 63,
            ValidationError::MissingField(_) => 64,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate a report configuration semantically.
pub fn validate_config(config: &ReportConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.cover_filename_rule.pattern().trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "cover_filename_rule".to_string(),
            message: "pattern must not be empty".to_string(),
        });
    }

    for (idx, field) in config.fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(ValidationError::MissingField(format!("fields[{}].name", idx)));
        }
    }

    let mut keys = HashSet::new();
    let mut indices = HashSet::new();
    for (idx, extra) in config.extra_field_keys.iter().enumerate() {
        if extra.key.trim().is_empty() {
            return Err(ValidationError::MissingField(format!(
                "extra_field_keys[{}].key",
                idx
            )));
        }
        if !keys.insert(extra.key.as_str()) {
            return Err(ValidationError::SemanticError(format!(
                "duplicate extra field key '{}'",
                extra.key
            )));
        }
        if !indices.insert(extra.display_index) {
            return Err(ValidationError::SemanticError(format!(
                "duplicate display_index {} (key '{}')",
                extra.display_index, extra.key
            )));
        }
    }

    if let Some(icon) = &config.print_icon {
        if config.icon_dir.is_none() {
            return Err(ValidationError::MissingField("icon_dir".to_string()));
        }
        if icon.is_empty() || icon.contains(['/', '\\']) || icon.contains("..") {
            return Err(ValidationError::InvalidValue {
                field: "print_icon".to_string(),
                message: format!("'{}' is not a bare icon name", icon),
            });
        }
    }

    if config.stylesheet.to_ascii_lowercase().contains("</style") {
        return Err(ValidationError::InvalidValue {
            field: "stylesheet".to_string(),
            message: "must not contain '</style'".to_string(),
        });
    }

    for link in &config.stylesheet_links {
        if link.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "stylesheet_links".to_string(),
                message: "link must not be empty".to_string(),
            });
        }
    }

    Ok(())
}
