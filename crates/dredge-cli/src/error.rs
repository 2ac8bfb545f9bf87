//! Error types for the ingestion driver.
//!
//! All errors use thiserror for consistent error handling across the codebase.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The collection root does not exist
    #[error("Input path not found: {0}")]
    InputNotFound(PathBuf),

    /// Thread count outside the accepted range
    #[error("Invalid thread count {0}: must be at least 1")]
    InvalidThreads(usize),

    /// The directory for the output file does not exist
    #[error("Output directory not found: {0}")]
    OutputDirNotFound(PathBuf),
}

/// Errors that stop an ingestion run.
///
/// Per-record and per-segment faults never surface here; they are counted
/// in the report.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The collection root does not exist
    #[error("Collection root not found: {0}")]
    RootNotFound(PathBuf),

    /// The document sink failed
    #[error("Document sink failed: {0}")]
    Sink(#[from] SinkError),

    /// A worker thread panicked
    #[error("Ingestion worker panicked")]
    WorkerPanicked,
}

/// Errors raised by document sinks.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing to the underlying output failed
    #[error("Failed to write document: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
