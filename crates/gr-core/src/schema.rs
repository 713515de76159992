//! JSON Schema generation for the input formats.
//!
//! The library snapshot and the report configuration are both hand-written
//! JSON (or TOML) files; their schemas let editors validate them.
//!
//! # Usage
//!
//! ```bash
//! # List available schema types
//! greatify schema --list
//!
//! # Generate schema for a specific type
//! greatify schema LibrarySnapshot
//!
//! # Generate all schemas
//! greatify schema --all
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use gr_common::{AttachmentContent, Creator, LibrarySnapshot, SnapshotItem};
pub use gr_config::{CoverFilenameRule, ExtraFieldKey, FieldSpec, ReportConfig};

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        // Snapshot types
        ("LibrarySnapshot", "Library snapshot file read by `greatify report`"),
        ("SnapshotItem", "One item (regular, note or attachment) in a snapshot"),
        ("Creator", "Creator of an item with role and name parts"),
        ("AttachmentContent", "Location of an attachment's bytes"),
        // Configuration types
        ("ReportConfig", "Report configuration file"),
        ("CoverFilenameRule", "Cover detection rule"),
        ("FieldSpec", "Built-in field shown in the report"),
        ("ExtraFieldKey", "Extra field shown in the report"),
    ]
}

/// Generate the JSON Schema for a type by name.
pub fn generate_schema(name: &str) -> Option<Value> {
    let schema = match name {
        "LibrarySnapshot" => schema_for!(LibrarySnapshot),
        "SnapshotItem" => schema_for!(SnapshotItem),
        "Creator" => schema_for!(Creator),
        "AttachmentContent" => schema_for!(AttachmentContent),
        "ReportConfig" => schema_for!(ReportConfig),
        "CoverFilenameRule" => schema_for!(CoverFilenameRule),
        "FieldSpec" => schema_for!(FieldSpec),
        "ExtraFieldKey" => schema_for!(ExtraFieldKey),
        _ => return None,
    };

    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    let mut schemas = BTreeMap::new();
    for (name, _desc) in available_schemas() {
        if let Some(schema) = generate_schema(name) {
            schemas.insert(name.to_string(), schema);
        }
    }
    schemas
}

/// Schema output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
}

/// Format a schema value for output.
pub fn format_schema<T: serde::Serialize>(schema: &T, format: SchemaFormat) -> serde_json::Result<String> {
    match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema),
        SchemaFormat::JsonCompact => serde_json::to_string(schema),
    }
}
