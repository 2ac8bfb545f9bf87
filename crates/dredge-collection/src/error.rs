//! Error types for segment iteration and collection handling.
//!
//! Three kinds of failure exist while reading a corpus. End of stream is not
//! an error at all. A malformed record is a [`SkipReason`]: it is counted and
//! iteration continues. A stream fault is an I/O error that ends the segment
//! and is kept on the segment for the caller to inspect.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single record was discarded.
///
/// Produced by a decode step; the segment counts it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The record could not be framed or parsed
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A field every document needs was absent or empty
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Text could not be decoded under the configured policy
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

impl SkipReason {
    /// Create a malformed-record reason.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedRecord(msg.into())
    }

    /// Create a missing-field reason.
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField(field.into())
    }

    /// Create an invalid-encoding reason.
    pub fn invalid_encoding<S: Into<String>>(msg: S) -> Self {
        Self::InvalidEncoding(msg.into())
    }
}

/// Errors returned by [`Segment::take`](crate::segment::Segment::take).
#[derive(Debug, Error)]
pub enum SegmentError {
    /// `take` was called when no document is available
    #[error("no more documents in segment")]
    Exhausted,

    /// The segment stopped on a stream fault
    #[error("segment stopped after a read error: {0}")]
    Faulted(String),

    /// The segment has already been released
    #[error("segment has been released")]
    Released,
}

/// Errors raised while setting up a collection or opening its segments.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A segment file could not be opened
    #[error("failed to open segment {path}: {source}")]
    Open {
        /// Path of the segment file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;
