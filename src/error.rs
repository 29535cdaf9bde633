//! Error taxonomy for a pruning run
//!
//! Only configuration errors are fatal. Everything else is recorded against the
//! function or version it happened to and the run carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fallible pruning operations
pub type PruneResult<T> = Result<T, PruneError>;

/// Stable numeric codes, printed as `[E0000]` prefixes.
pub struct ErrorCode;

impl ErrorCode {
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_YAML: u16 = 1002;
    pub const CONFIG_MISSING_NAME: u16 = 1004;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const PLATFORM_LIST_FAILED: u16 = 4001;
    pub const PLATFORM_DELETE_FAILED: u16 = 4002;
    pub const VERSION_INVALID: u16 = 4003;
}

/// Exit codes used by the binary
pub mod exit_codes {
    pub const GENERAL_ERROR: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("[E{:04}] Configuration file not found or unreadable: {}", ErrorCode::CONFIG_NOT_FOUND, .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[E{:04}] Failed to parse configuration {}: {source}", ErrorCode::CONFIG_INVALID_YAML, .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("[E{:04}] Invalid value for {field}: {message}", ErrorCode::CONFIG_INVALID_VALUE)]
    InvalidArgument { field: String, message: String },

    #[error("[E{:04}] Function entry '{key}' has no deployed name", ErrorCode::CONFIG_MISSING_NAME)]
    MissingFunctionName { key: String },

    #[error("[E{:04}] Failed to list versions of {function}: {message}", ErrorCode::PLATFORM_LIST_FAILED)]
    PlatformList { function: String, message: String },

    #[error("[E{:04}] Refusing to delete version '{identifier}' of {function}", ErrorCode::VERSION_INVALID)]
    InvalidVersionIdentifier { function: String, identifier: String },

    #[error("[E{:04}] Failed to delete {function}:{qualifier}: {message}", ErrorCode::PLATFORM_DELETE_FAILED)]
    PlatformDelete {
        function: String,
        qualifier: String,
        message: String,
    },
}

impl PruneError {
    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Numeric code of this error
    pub fn code(&self) -> u16 {
        match self {
            Self::ConfigNotFound { .. } => ErrorCode::CONFIG_NOT_FOUND,
            Self::ConfigParse { .. } => ErrorCode::CONFIG_INVALID_YAML,
            Self::InvalidArgument { .. } => ErrorCode::CONFIG_INVALID_VALUE,
            Self::MissingFunctionName { .. } => ErrorCode::CONFIG_MISSING_NAME,
            Self::PlatformList { .. } => ErrorCode::PLATFORM_LIST_FAILED,
            Self::InvalidVersionIdentifier { .. } => ErrorCode::VERSION_INVALID,
            Self::PlatformDelete { .. } => ErrorCode::PLATFORM_DELETE_FAILED,
        }
    }

    /// Whether this error must abort the run before any platform call
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } | Self::InvalidArgument { .. }
        )
    }

    /// Process exit code for a fatal error
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() {
            exit_codes::CONFIG_ERROR
        } else {
            exit_codes::GENERAL_ERROR
        }
    }

    /// Message suitable for end users
    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigNotFound { path, .. } => format!(
                "Configuration file {} does not exist or cannot be read",
                path.display()
            ),
            Self::ConfigParse { path, source } => {
                format!("Configuration file {} is not valid YAML: {}", path.display(), source)
            }
            other => other.to_string(),
        }
    }
}
