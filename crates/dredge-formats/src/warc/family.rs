//! Web-archive corpus families and their mapping to documents.
//!
//! A family fixes everything that differs between web-archive corpora: the
//! framing, which header carries the document id, which record types are
//! indexable, how the body is cut out of the payload, and which files under
//! a root belong to the corpus.

use super::decoder::{DecoderConfig, WarcDecoder};
use super::header::{WarcRecordType, field};
use super::record::WarcRecord;
use dredge_collection::{Collection, DecodeStep, Decoded, Document, SegmentFilter, SegmentSource, SkipReason};
use std::io::BufRead;
use std::sync::Arc;

/// How the indexed body is cut out of a record payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BodyExtraction {
    /// The payload as is
    Verbatim,
    /// The payload with surrounding whitespace removed
    #[default]
    Trimmed,
    /// Drop a leading HTTP status line and header block
    AfterHttpHeaders,
    /// Start at the first line beginning with `<`, or keep the trimmed
    /// payload if there is none
    FromFirstMarkup,
}

impl BodyExtraction {
    /// Apply the extraction to decoded payload text.
    pub fn extract(self, text: &str) -> &str {
        match self {
            Self::Verbatim => text,
            Self::Trimmed => text.trim(),
            Self::AfterHttpHeaders => {
                if !text.starts_with("HTTP/") {
                    return text;
                }
                // The header block ends at the first empty line, CRLF or LF.
                [("\r\n\r\n", 4), ("\n\n", 2)]
                    .into_iter()
                    .filter_map(|(end, len)| text.find(end).map(|i| i + len))
                    .min()
                    .map_or("", |start| &text[start..])
            }
            Self::FromFirstMarkup => {
                let text = text.trim();
                text.find("\n<").map_or(text, |i| &text[i + 1..])
            }
        }
    }
}

/// Everything that distinguishes one web-archive corpus from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarcFamily {
    name: String,
    config: DecoderConfig,
    id_key: String,
    indexable: Vec<WarcRecordType>,
    body: BodyExtraction,
    filter: SegmentFilter,
}

impl WarcFamily {
    /// ClueWeb09: `WARC/0.18` records keyed by `WARC-TREC-ID`.
    pub fn clueweb09() -> Self {
        Self::custom("clueweb09", "WARC/0.18", field::CONTENT_LENGTH)
            .with_id_key("WARC-TREC-ID")
            .with_indexable(WarcRecordType::Response)
            .with_body(BodyExtraction::AfterHttpHeaders)
            .with_filter(SegmentFilter::new().allow_suffix(".warc.gz"))
    }

    /// ClueWeb12: `WARC/1.0` records keyed by `WARC-TREC-ID`.
    pub fn clueweb12() -> Self {
        Self::custom("clueweb12", "WARC/1.0", field::CONTENT_LENGTH)
            .with_id_key("WARC-TREC-ID")
            .with_indexable(WarcRecordType::Response)
            .with_body(BodyExtraction::FromFirstMarkup)
            .with_filter(
                SegmentFilter::new()
                    .allow_suffix(".warc.gz")
                    .skip_dir("OtherData"),
            )
    }

    /// CommonCrawl WET: extracted-text `conversion` records keyed by the
    /// URI-based `WARC-Refers-To` id.
    pub fn commoncrawl_wet() -> Self {
        Self::custom("cc-wet", "WARC/1.0", field::CONTENT_LENGTH)
            .with_id_key("WARC-Refers-To")
            .with_indexable(WarcRecordType::Conversion)
            .with_body(BodyExtraction::Trimmed)
            .with_filter(SegmentFilter::new().allow_suffix(".warc.wet.gz"))
    }

    /// A family with the given framing and no indexable types yet.
    ///
    /// Ids default to `WARC-Record-ID` and every file is accepted.
    pub fn custom(
        name: impl Into<String>,
        version_marker: impl Into<String>,
        header_end_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            config: DecoderConfig::new(version_marker, header_end_key),
            id_key: field::WARC_RECORD_ID.to_string(),
            indexable: Vec::new(),
            body: BodyExtraction::default(),
            filter: SegmentFilter::new(),
        }
    }

    /// Set the header that carries the document id.
    pub fn with_id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = key.into();
        self
    }

    /// Mark a record type as indexable.
    pub fn with_indexable(mut self, record_type: WarcRecordType) -> Self {
        if !self.indexable.contains(&record_type) {
            self.indexable.push(record_type);
        }
        self
    }

    /// Set the body extraction.
    pub const fn with_body(mut self, body: BodyExtraction) -> Self {
        self.body = body;
        self
    }

    /// Replace the segment filter.
    pub fn with_filter(mut self, filter: SegmentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the framing config.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Family name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Framing config
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Header carrying the document id
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    /// Segment filter
    pub const fn filter(&self) -> &SegmentFilter {
        &self.filter
    }

    /// Whether a record of this type goes to the index.
    pub fn is_indexable(&self, record_type: Option<&WarcRecordType>) -> bool {
        record_type.is_some_and(|t| self.indexable.contains(t))
    }

    /// A framing decoder over `reader` with this family's config.
    pub fn decoder<R: BufRead>(&self, reader: R) -> WarcDecoder<R> {
        WarcDecoder::new(reader, self.config.clone())
    }

    /// Map a framed record to a document.
    ///
    /// Indexability comes from the record type alone. An indexable record
    /// without an id is rejected; other records fall back to
    /// `WARC-Record-ID`, or an empty id.
    pub fn to_document(&self, record: &WarcRecord) -> Result<Document, SkipReason> {
        let header = record.header();
        let indexable = self.is_indexable(header.record_type());

        let id = match header.get(&self.id_key).filter(|id| !id.is_empty()) {
            Some(id) => id,
            None if indexable => return Err(SkipReason::missing_field(self.id_key.as_str())),
            None => header.record_id().unwrap_or_default(),
        };

        let text = self
            .config
            .utf8
            .try_decode(record.payload())
            .map_err(|err| SkipReason::invalid_encoding(err.to_string()))?;
        let body = self.body.extract(&text);

        let mut builder = Document::builder(id)
            .contents(body)
            .raw(body)
            .indexable(indexable);
        if let Some(uri) = header.metadata("WARC-Target-URI").filter(|u| !u.is_empty()) {
            builder = builder.field("url", uri);
        }
        if record.is_truncated() {
            builder = builder.field("truncated", "true");
        }
        Ok(builder.build())
    }
}

/// A decode step yielding documents from one web-archive segment.
#[derive(Debug)]
pub struct WarcDocumentDecoder<R> {
    records: WarcDecoder<R>,
    family: Arc<WarcFamily>,
}

impl<R: BufRead> WarcDocumentDecoder<R> {
    /// Decode `reader` as a segment of `family`.
    pub fn new(reader: R, family: Arc<WarcFamily>) -> Self {
        Self {
            records: family.decoder(reader),
            family,
        }
    }

    /// The underlying framing decoder
    pub const fn records(&self) -> &WarcDecoder<R> {
        &self.records
    }
}

impl<R: BufRead> DecodeStep for WarcDocumentDecoder<R> {
    type Item = Document;

    fn decode_next(&mut self) -> Decoded<Document> {
        let family = &self.family;
        self.records
            .next_record()
            .and_then(|record| family.to_document(&record).into())
    }
}

/// A web-archive corpus on disk.
#[derive(Debug, Clone)]
pub struct WarcCollection {
    family: Arc<WarcFamily>,
}

impl WarcCollection {
    /// Collection for a family, using the family's file filter.
    pub fn new(family: WarcFamily) -> Self {
        Self {
            family: Arc::new(family),
        }
    }

    /// The family this collection reads
    pub fn family(&self) -> &WarcFamily {
        &self.family
    }
}

impl Collection for WarcCollection {
    type Decoder = WarcDocumentDecoder<SegmentSource>;

    fn name(&self) -> &str {
        self.family.name()
    }

    fn filter(&self) -> &SegmentFilter {
        self.family.filter()
    }

    fn decoder(&self, source: SegmentSource) -> Self::Decoder {
        WarcDocumentDecoder::new(source, Arc::clone(&self.family))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::warc::header::WarcHeader;
    use crate::warc::line::Utf8Policy;
    use dredge_collection::Segment;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn response(id: Option<&str>, payload: &str) -> WarcRecord {
        let mut header = WarcHeader::new("WARC/1.0")
            .with("WARC-Type", "response")
            .with("WARC-Record-ID", "<urn:uuid:1>");
        if let Some(id) = id {
            header.insert("WARC-TREC-ID", id);
        }
        WarcRecord::new(header, payload.as_bytes().to_vec())
    }

    #[test]
    fn test_extraction_modes() {
        let http = "HTTP/1.1 200 OK\nContent-Type: text/html\n\n<p>hi</p>\n";
        assert_eq!(BodyExtraction::AfterHttpHeaders.extract(http), "<p>hi</p>\n");
        assert_eq!(BodyExtraction::AfterHttpHeaders.extract("plain"), "plain");
        let crlf = "HTTP/1.1 200 OK\r\nServer: x\r\n\r\n<p>hi</p>\n\n<p>more</p>";
        assert_eq!(BodyExtraction::AfterHttpHeaders.extract(crlf), "<p>hi</p>\n\n<p>more</p>");
        assert_eq!(BodyExtraction::FromFirstMarkup.extract(http), "<p>hi</p>");
        assert_eq!(BodyExtraction::FromFirstMarkup.extract("  no markup \n"), "no markup");
        assert_eq!(BodyExtraction::Trimmed.extract("  x \n"), "x");
        assert_eq!(BodyExtraction::Verbatim.extract("  x \n"), "  x \n");
    }

    #[test]
    fn test_lf_http_headers_keep_crlf_body_intact() {
        let text = "HTTP/1.1 200 OK\nContent-Type: text/html\n\n<html>\r\n\r\n<body>hi</body></html>";
        assert_eq!(
            BodyExtraction::AfterHttpHeaders.extract(text),
            "<html>\r\n\r\n<body>hi</body></html>"
        );
    }

    #[test]
    fn test_indexable_record_needs_id() {
        let family = WarcFamily::clueweb12();
        let err = family.to_document(&response(None, "<html/>")).unwrap_err();
        assert_eq!(err, SkipReason::missing_field("WARC-TREC-ID"));

        let doc = family.to_document(&response(Some("cw12-1"), "<html/>")).unwrap();
        assert_eq!(doc.id(), "cw12-1");
        assert!(doc.indexable());
    }

    #[test]
    fn test_unindexable_record_falls_back_to_record_id() {
        let family = WarcFamily::clueweb12();
        let header = WarcHeader::new("WARC/1.0")
            .with("WARC-Type", "warcinfo")
            .with("WARC-Record-ID", "<urn:uuid:info>");
        let record = WarcRecord::new(header, b"software: test\n".to_vec());

        let doc = family.to_document(&record).unwrap();
        assert_eq!(doc.id(), "<urn:uuid:info>");
        assert!(!doc.indexable());
        assert_eq!(doc.contents(), "software: test");
    }

    #[test]
    fn test_wet_family() {
        let family = WarcFamily::commoncrawl_wet();
        let header = WarcHeader::new("WARC/1.0")
            .with("WARC-Type", "conversion")
            .with("WARC-Target-URI", "http://example.com/")
            .with("WARC-Refers-To", "<urn:uuid:source>");
        let record = WarcRecord::new(header, b"\nExtracted text.\n".to_vec());

        let doc = family.to_document(&record).unwrap();
        assert_eq!(doc.id(), "<urn:uuid:source>");
        assert_eq!(doc.contents(), "Extracted text.");
        assert_eq!(doc.field("url"), Some("http://example.com/"));
        assert!(doc.indexable());
    }

    #[test]
    fn test_utf8_policy_applies_to_payload() {
        let payload = b"<p>\xff</p>".to_vec();
        let header = WarcHeader::new("WARC/1.0")
            .with("WARC-Type", "response")
            .with("WARC-TREC-ID", "bad-bytes");
        let record = WarcRecord::new(header, payload);

        let doc = WarcFamily::clueweb12().to_document(&record).unwrap();
        assert_eq!(doc.contents(), "<p>\u{ff}</p>");

        let strict = WarcFamily::clueweb12()
            .with_config(DecoderConfig::default().with_utf8(Utf8Policy::Strict));
        assert!(matches!(
            strict.to_document(&record),
            Err(SkipReason::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_document_decoder_in_segment() {
        let family = Arc::new(WarcFamily::clueweb12());
        let mut stream = Vec::new();
        response(Some("a"), "<p>a</p>").write_to(&mut stream).unwrap();
        response(None, "<p>no id</p>").write_to(&mut stream).unwrap();
        response(Some("c"), "<p>c</p>").write_to(&mut stream).unwrap();

        let mut segment = Segment::detached(WarcDocumentDecoder::new(Cursor::new(stream), family));
        let ids: Vec<String> = segment.by_ref().map(|d| d.id().to_string()).collect();

        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(segment.skipped(), 1);
    }

    #[test]
    fn test_preset_filters() {
        assert!(WarcFamily::clueweb09().filter().accepts_file_name("00.warc.gz"));
        assert!(!WarcFamily::clueweb09().filter().accepts_file_name("00.warc"));
        assert!(WarcFamily::clueweb12().filter().skips_dir_name("OtherData"));
        assert!(
            WarcFamily::commoncrawl_wet()
                .filter()
                .accepts_file_name("CC-MAIN-00000.warc.wet.gz")
        );
    }
}
