//! Record decoders for web-archive, TREC SGML and JSON corpora
//!
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::return_self_not_must_use)] // Builder patterns
#![allow(clippy::missing_errors_doc)] // Error enums document themselves
#![allow(clippy::cast_possible_truncation)] // Byte counts fit in u64
//! Every format here plugs into `dredge-collection` the same way: a decode
//! step that turns a byte source into documents, and a [`Collection`]
//! implementation that pairs it with the file filter for the corpus.
//!
//! # Supported Formats
//!
//! - **WARC families**: ClueWeb09, ClueWeb12, CommonCrawl WET, or any
//!   custom marker and sentinel key ([`warc`])
//! - **TREC SGML**: `<DOC>` blocks from newswire disks ([`trec`])
//! - **JSON**: JSON lines or a JSON array of objects ([`json`])
//!
//! [`Collection`]: dredge_collection::Collection

#![warn(missing_docs)]

pub mod json;
pub mod trec;
pub mod warc;

pub use json::{JsonCollection, JsonDecoder};
pub use trec::{TrecCollection, TrecDecoder};
pub use warc::{
    BadLengthPolicy, BodyExtraction, DecoderConfig, DecoderState, WarcCollection,
    WarcDocumentDecoder, WarcDecoder, WarcFamily, WarcHeader, WarcRecord, WarcRecordType,
};
