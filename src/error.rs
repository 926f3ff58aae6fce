//! Error and diagnostic types for document loading, resolution, and emission.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Recoverable conditions (unresolvable references, ambiguous enum
/// descriptions) are absorbed as [`Warning`]s instead and never surface here.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    // Document structure errors (exit code 2)
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    #[error("no schema named \"{name}\" in document")]
    UnknownSchema { name: String },

    #[error("duplicate generated type name \"{name}\": produced by both \"{first}\" and \"{second}\"")]
    DuplicateTypeName {
        name: String,
        first: String,
        second: String,
    },
}

impl ScaffoldError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScaffoldError::FileNotFound { .. } | ScaffoldError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            ScaffoldError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors from checking an example payload against a document schema.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("payload invalid with {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

impl CheckError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::Scaffold(e) => e.exit_code(),
            CheckError::Invalid { .. } => 1,
        }
    }
}

/// Single validation error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the invalid field.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Unresolvable `$ref`: descriptor degraded to the unknown sentinel.
pub const W_UNRESOLVED_REF: &str = "W001";
/// Structured enum description failed to parse; member names synthesized.
pub const W_ENUM_DESCRIPTION: &str = "W002";
/// Operation skipped during extraction (unsupported method or malformed entry).
pub const W_SKIPPED_OPERATION: &str = "W003";

/// A non-fatal diagnostic recorded during resolution.
///
/// Warnings never stop a run; the degraded field or type carries a sentinel
/// descriptor and generation continues.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Warning {
    /// Stable warning code (e.g., "W001").
    pub code: &'static str,
    /// Schema path where the condition was observed.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}
