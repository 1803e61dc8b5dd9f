//! Error types for curio.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`CurioError`] enum.
//!
//! Two conditions that look like failures are deliberately not errors: a
//! query that normalizes to zero terms yields an empty result list, and a
//! zero-length document is silently excluded from ranking.
//!
//! # Examples
//!
//! ```
//! use curio::error::{CurioError, Result};
//!
//! fn open_catalog() -> Result<()> {
//!     Err(CurioError::resource_unavailable("catalog.idx"))
//! }
//!
//! match open_catalog() {
//!     Ok(_) => println!("opened"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for curio operations.
#[derive(Error, Debug)]
pub enum CurioError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A required resource (stopword list, index snapshot) could not be opened
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Index build or lookup errors
    #[error("Index error: {0}")]
    Index(String),

    /// Snapshot file format errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Term statistics could not be read during a search call
    #[error("Retrieval error: {0}")]
    Retrieval(#[source] Box<CurioError>),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary snapshot encoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with CurioError.
pub type Result<T> = std::result::Result<T, CurioError>;

impl CurioError {
    /// Create a new resource-unavailable error.
    pub fn resource_unavailable<S: Into<String>>(msg: S) -> Self {
        CurioError::ResourceUnavailable(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        CurioError::Index(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        CurioError::Storage(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CurioError::Config(msg.into())
    }

    /// Wrap a provider failure as the single error a search caller sees.
    ///
    /// Already-wrapped errors are passed through unchanged.
    pub fn retrieval(source: CurioError) -> Self {
        match source {
            CurioError::Retrieval(_) => source,
            other => CurioError::Retrieval(Box::new(other)),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CurioError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        CurioError::Other(format!("Internal error: {}", msg.into()))
    }
}
