//! Framing errors for archive records.

use dredge_collection::SkipReason;
use thiserror::Error;

/// Why a record could not be framed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The header block ended without a `Content-Length` field
    #[error("record has no Content-Length")]
    MissingContentLength,

    /// `Content-Length` is not a non-negative integer
    #[error("unusable Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// The header block ended before the sentinel key
    #[error("header block ended before {0}")]
    MissingSentinel(String),

    /// A header line ran past the configured limit without a terminator
    #[error("header line longer than {0} bytes")]
    OverlongHeaderLine(usize),
}

impl From<FramingError> for SkipReason {
    fn from(err: FramingError) -> Self {
        Self::malformed(err.to_string())
    }
}
