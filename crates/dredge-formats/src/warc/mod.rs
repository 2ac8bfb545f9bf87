//! Web-archive (WARC-style) record decoding
//!
//! Archive files are sequences of records. Each record is framed as:
//!
//! ```text
//! WARC/1.0                       <- version marker line
//! WARC-Type: response            <- header lines, `Key: Value`
//! WARC-TREC-ID: clueweb12-0000tw-00-00000
//! Content-Length: 345            <- sentinel key ends the header
//!                                <- optional blank separator
//! HTTP/1.1 200 OK ...            <- exactly Content-Length bytes
//! ```
//!
//! The marker and the sentinel key differ between corpora, so both are
//! part of [`DecoderConfig`]. [`WarcDecoder`] turns a byte stream into
//! [`WarcRecord`]s; [`WarcFamily`] turns records into documents for a
//! particular corpus.
//!
//! # Example
//!
//! ```
//! use dredge_formats::warc::{DecoderConfig, WarcDecoder};
//! use dredge_collection::Decoded;
//!
//! let data = b"WARC/1.0\r\nWARC-Type: response\r\nContent-Length: 5\r\n\r\nhello\r\n\r\n";
//! let mut decoder = WarcDecoder::new(&data[..], DecoderConfig::default());
//!
//! let Decoded::Produced(record) = decoder.next_record() else {
//!     panic!("expected a record");
//! };
//! assert_eq!(record.payload(), b"hello");
//! assert!(matches!(decoder.next_record(), Decoded::Exhausted));
//! ```

mod decoder;
mod error;
mod family;
mod header;
mod line;
mod record;

pub use decoder::{BadLengthPolicy, DEFAULT_MAX_LINE_LEN, DecoderConfig, DecoderState, WarcDecoder};
pub use error::FramingError;
pub use family::{BodyExtraction, WarcCollection, WarcDocumentDecoder, WarcFamily};
pub use header::{WarcHeader, WarcRecordType, field};
pub use line::{LineEnd, LineScanner, Utf8Policy};
pub use record::WarcRecord;
