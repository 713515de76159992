//! Exit codes for the greatify CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use gr_common::StoreError;
use gr_config::ConfigError;
use gr_report::ReportError;

/// Exit codes for greatify operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Configuration file unreadable, unparsable or invalid
    ConfigError = 11,

    /// Library snapshot unreadable or invalid, or an item read failed
    StoreError = 12,

    /// A cover image could not be fetched
    CoverError = 13,

    /// An icon or other asset could not be loaded
    AssetError = 14,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error writing the report
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19: resolvable by the user.
    pub fn is_user_error(self) -> bool {
        let code = self as i32;
        (10..20).contains(&code)
    }

    /// Codes 20-29: indicate bugs or a broken environment.
    pub fn is_internal_error(self) -> bool {
        let code = self as i32;
        code >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::StoreError => "ERR_STORE",
            ExitCode::CoverError => "ERR_COVER",
            ExitCode::AssetError => "ERR_ASSET",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

impl From<&ReportError> for ExitCode {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::UnknownSection(_) => ExitCode::InternalError,
            ReportError::StoreAccess(_) => ExitCode::StoreError,
            ReportError::BinaryFetch { .. } => ExitCode::CoverError,
            ReportError::AssetError { .. } => ExitCode::AssetError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
    }
}

impl From<&StoreError> for ExitCode {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::BinaryFetch { .. } => ExitCode::CoverError,
            _ => ExitCode::StoreError,
        }
    }
}
