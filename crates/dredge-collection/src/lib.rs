//! Lazy-pull document iteration over corpus segment files
//!
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::missing_errors_doc)] // Error enums document themselves
//! A corpus is a directory tree of segment files. Each segment holds many
//! documents in some archive format. This crate provides the format-neutral
//! half of ingestion:
//!
//! - **Discovery**: [`SegmentFilter`] selects segment files by name and prunes
//!   excluded directories without opening anything.
//! - **Sources**: [`open_source`] opens a file and transparently decompresses
//!   gzip, including multi-member gzip.
//! - **Iteration**: [`Segment`] pulls one [`Document`] at a time from a
//!   [`DecodeStep`], skipping malformed records and stopping cleanly at end
//!   of stream or on a stream fault.
//! - **Collections**: the [`Collection`] trait ties a filter and a decode
//!   step together so a driver can walk any supported format.
//!
//! Format adapters live in `dredge-formats`.

#![warn(missing_docs)]

pub mod collection;
pub mod decode;
pub mod discovery;
pub mod document;
pub mod error;
pub mod segment;
pub mod source;

pub use collection::{Collection, SegmentIter};
pub use decode::{DecodeStep, Decoded, FnDecoder};
pub use discovery::SegmentFilter;
pub use document::{Document, DocumentBuilder};
pub use error::{CollectionError, CollectionResult, SegmentError, SkipReason};
pub use segment::{ReadStatus, Segment};
pub use source::{BUFFER_SIZE, GZIP_MAGIC, SegmentSource, open_source, wrap_source};
