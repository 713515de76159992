//! Greatify report configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the report configuration file (JSON or TOML)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod report;
pub mod resolve;
pub mod validate;

pub use report::{
    ConfigError, CoverErrorPolicy, CoverFilenameRule, ExtraFieldKey, FailurePolicy, FieldSpec,
    LoadedConfig, ReportConfig,
};
pub use resolve::{load_config, resolve_config, ConfigSource};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
