//! Greatify command-line support library.
//!
//! This library provides the pieces the `greatify` binary is built from:
//! - Exit codes for CLI operations
//! - Logging initialization (human or JSONL on stderr)
//! - Report sinks (file, stdout, data URL)
//! - JSON Schema generation for the snapshot and configuration formats
//!
//! The binary entry point is in `main.rs`.

pub mod display;
pub mod exit_codes;
pub mod logging;
pub mod schema;
