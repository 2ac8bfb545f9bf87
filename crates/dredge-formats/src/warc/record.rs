//! A framed record: header plus content bytes.

use super::header::{WarcHeader, WarcRecordType, field};
use std::borrow::Cow;
use std::io::{self, Write};

/// One record as read from an archive stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarcRecord {
    header: WarcHeader,
    payload: Vec<u8>,
    declared_length: u64,
}

impl WarcRecord {
    /// Build a complete record; the declared length is the payload length.
    pub fn new(header: WarcHeader, payload: Vec<u8>) -> Self {
        let declared_length = payload.len() as u64;
        Self {
            header,
            payload,
            declared_length,
        }
    }

    pub(crate) const fn from_parts(
        header: WarcHeader,
        payload: Vec<u8>,
        declared_length: u64,
    ) -> Self {
        Self {
            header,
            payload,
            declared_length,
        }
    }

    /// Header block
    pub const fn header(&self) -> &WarcHeader {
        &self.header
    }

    /// Content bytes as read
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Content length the header declared
    pub const fn declared_length(&self) -> u64 {
        self.declared_length
    }

    /// Whether the stream ended before the declared length was read
    pub fn is_truncated(&self) -> bool {
        (self.payload.len() as u64) < self.declared_length
    }

    /// Shortcut for the header's record type
    pub const fn record_type(&self) -> Option<&WarcRecordType> {
        self.header.record_type()
    }

    /// Payload as text, invalid bytes replaced.
    pub fn payload_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Split into header and payload.
    pub fn into_parts(self) -> (WarcHeader, Vec<u8>) {
        (self.header, self.payload)
    }

    /// Write the record in the framing the decoder reads.
    ///
    /// `Content-Length` is written last, from the actual payload length, so
    /// a `Content-Length` sentinel always sees every other field first. The
    /// record ends with two newlines.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.header_block())?;
        out.write_all(&self.payload)?;
        out.write_all(b"\n\n")
    }

    /// [`write_to`](Self::write_to) into a fresh buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.header_block();
        out.reserve(self.payload.len() + 2);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(b"\n\n");
        out
    }

    /// Marker, header lines, `Content-Length` and the blank separator.
    fn header_block(&self) -> Vec<u8> {
        let header = &self.header;
        let mut lines = vec![header.version().to_string()];
        if let Some(record_type) = header.record_type() {
            lines.push(format!("{}: {record_type}", field::WARC_TYPE));
        }
        for (key, value) in [
            (field::WARC_DATE, header.date()),
            (field::WARC_RECORD_ID, header.record_id()),
            (field::CONTENT_TYPE, header.content_type()),
        ] {
            if let Some(value) = value {
                lines.push(format!("{key}: {value}"));
            }
        }
        for (key, value) in header.metadata_fields() {
            lines.push(format!("{key}: {value}"));
        }
        lines.push(format!("{}: {}", field::CONTENT_LENGTH, self.payload.len()));
        lines.push(String::new());

        let mut block = lines.join("\n").into_bytes();
        block.push(b'\n');
        block
    }
}
