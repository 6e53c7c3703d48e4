//! Error types for the refresh cache
//!
//! This module defines all error types used throughout the crate.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for refresh-cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the refresh cache
#[derive(Error, Debug)]
pub enum Error {
    /// Range source transport errors (endpoint unreachable, bad status, ...)
    #[error("range source error: {0}")]
    Source(String),

    /// A raw range expression failed to parse into a prefix
    #[error("invalid range expression '{expr}': {reason}")]
    Parse {
        /// The offending expression as returned by the source
        expr: String,
        /// Why it failed to parse
        reason: String,
    },

    /// A fetch cycle exceeded the configured per-fetch deadline
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration errors (fatal at provisioning time)
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a range source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a parse error for a range expression
    pub fn parse(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            expr: expr.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is an expected, transient fetch failure
    ///
    /// Transient failures are logged and absorbed by the refresh loop;
    /// anything else still never crashes the worker but indicates a bug or
    /// misconfiguration worth surfacing louder.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Source(_) | Self::Parse { .. } | Self::Timeout(_)
        )
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
