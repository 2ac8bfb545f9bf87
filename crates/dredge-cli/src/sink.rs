//! Document sinks: where the driver hands documents.

use crate::error::SinkError;
use dredge_collection::Document;
use std::io::Write;

/// Downstream consumer of documents, typically an indexer.
pub trait DocumentSink {
    /// Accept one document.
    fn accept(&mut self, document: Document) -> Result<(), SinkError>;

    /// Called once after the last document.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Collects documents in memory.
impl DocumentSink for Vec<Document> {
    fn accept(&mut self, document: Document) -> Result<(), SinkError> {
        self.push(document);
        Ok(())
    }
}

/// Counts documents and content bytes without keeping them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingSink {
    documents: u64,
    content_bytes: u64,
}

impl CountingSink {
    /// Documents accepted
    pub const fn documents(&self) -> u64 {
        self.documents
    }

    /// Total length of accepted contents, in bytes
    pub const fn content_bytes(&self) -> u64 {
        self.content_bytes
    }
}

impl DocumentSink for CountingSink {
    fn accept(&mut self, document: Document) -> Result<(), SinkError> {
        self.documents += 1;
        self.content_bytes += document.contents().len() as u64;
        Ok(())
    }
}

/// Writes each document as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    /// Write to `out`. Wrap files in a `BufWriter`.
    pub const fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Lines written so far
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DocumentSink for JsonLinesSink<W> {
    fn accept(&mut self, document: Document) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, &document)?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}
