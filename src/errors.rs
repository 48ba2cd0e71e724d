//! # Error Types
//!
//! Error handling for the functional refactoring MCP service.
//! Provides structured error types that can be converted to MCP ErrorData.

use rmcp::model::ErrorData;
use std::fmt;

/// Error types that can occur during service operations.
///
/// These cover parsing, serialization and internal failures at the host
/// boundary. Pattern misses inside the engine are not errors; they are
/// [`SkipReason`] outcomes and never surface as `ServiceError`.
#[derive(Debug)]
pub enum ServiceError {
    /// Requested language is not handled by the analyses
    UnsupportedLanguage(String),
    /// Source text exceeds the configured size limit
    SourceTooLarge { size: usize, limit: usize },
    /// Error parsing JSON data
    SerdeJson(serde_json::Error),
    /// Internal service error with custom message
    Internal(String),
    /// MCP tool not found
    ToolNotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::UnsupportedLanguage(lang) => {
                write!(f, "Unsupported language: {lang}")
            }
            ServiceError::SourceTooLarge { size, limit } => {
                write!(f, "Source of {size} bytes exceeds the {limit} byte limit")
            }
            ServiceError::SerdeJson(err) => write!(f, "JSON parsing error: {err}"),
            ServiceError::Internal(msg) => write!(f, "Internal error: {msg}"),
            ServiceError::ToolNotFound(tool) => write!(f, "Tool not found: {tool}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerdeJson(err)
    }
}

impl From<ServiceError> for ErrorData {
    fn from(err: ServiceError) -> Self {
        ErrorData::internal_error(err.to_string(), None)
    }
}

/// Why a fix request produced no change.
///
/// All of these are quiet outcomes: the engine returns the source
/// untouched and the host decides what, if anything, to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The pattern no longer holds (wrong arity, broken chain, empty
    /// shared arguments, exotic parameters)
    NotApplicable,
    /// Intermediate results of the chain are still referenced outside it
    UnsafeRewrite,
    /// The called function's declaration is not in this tree
    DeclarationNotFound,
    /// The token does not match any candidate of this run
    StaleToken,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotApplicable => "not_applicable",
            SkipReason::UnsafeRewrite => "unsafe_rewrite",
            SkipReason::DeclarationNotFound => "declaration_not_found",
            SkipReason::StaleToken => "stale_token",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
