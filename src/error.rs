//! Error types for probe operations.
//!
//! This module defines [`ProbeError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - [`ProbeError::DependencyUnavailable`] is recoverable and never leaves
//!   the resolver that produced it; it becomes a "not found" line
//! - Every other variant is fatal: the binary prints it and exits with 1
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No Python interpreter could be located.
    #[error("No Python interpreter found (searched for {searched})")]
    InterpreterNotFound { searched: String },

    /// The interpreter could not report its identity or search path.
    #[error("Failed to introspect interpreter {interpreter}: {message}")]
    IntrospectionFailed {
        interpreter: PathBuf,
        message: String,
    },

    /// An optional library could not be imported.
    #[error("Module '{module}' unavailable: {reason}")]
    DependencyUnavailable { module: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
