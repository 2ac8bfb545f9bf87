//! Record header model.

use std::fmt;
use std::str::FromStr;

/// `WARC-Type` header values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WarcRecordType {
    /// Describes the archive file itself
    Warcinfo,
    /// A full protocol response, e.g. HTTP headers and body
    Response,
    /// A resource without protocol framing
    Resource,
    /// The request that produced a response
    Request,
    /// Metadata about another record
    Metadata,
    /// A revisit of previously archived content
    Revisit,
    /// A transformation of another record, e.g. extracted text
    Conversion,
    /// A continuation of a segmented record
    Continuation,
    /// Any other value, kept verbatim
    Other(String),
}

impl WarcRecordType {
    /// The header value for this type
    pub fn as_str(&self) -> &str {
        match self {
            Self::Warcinfo => "warcinfo",
            Self::Response => "response",
            Self::Resource => "resource",
            Self::Request => "request",
            Self::Metadata => "metadata",
            Self::Revisit => "revisit",
            Self::Conversion => "conversion",
            Self::Continuation => "continuation",
            Self::Other(value) => value,
        }
    }
}

impl FromStr for WarcRecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "warcinfo" => Self::Warcinfo,
            "response" => Self::Response,
            "resource" => Self::Resource,
            "request" => Self::Request,
            "metadata" => Self::Metadata,
            "revisit" => Self::Revisit,
            "conversion" => Self::Conversion,
            "continuation" => Self::Continuation,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for WarcRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header field names with a dedicated slot
pub mod field {
    /// Record type
    pub const WARC_TYPE: &str = "WARC-Type";
    /// Capture date
    pub const WARC_DATE: &str = "WARC-Date";
    /// Globally unique record id
    pub const WARC_RECORD_ID: &str = "WARC-Record-ID";
    /// MIME type of the content block
    pub const CONTENT_TYPE: &str = "Content-Type";
    /// Length of the content block in bytes
    pub const CONTENT_LENGTH: &str = "Content-Length";
}

/// The header block of one record.
///
/// Field names are matched without regard to ASCII case. The well-known
/// fields are kept in their own slots; every other field goes to an ordered
/// metadata list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarcHeader {
    version: String,
    record_type: Option<WarcRecordType>,
    date: Option<String>,
    record_id: Option<String>,
    content_type: Option<String>,
    content_length: Option<String>,
    metadata: Vec<(String, String)>,
}

impl WarcHeader {
    /// Empty header for the given version line, e.g. `WARC/1.0`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Parse one `Key: Value` line and store it.
    ///
    /// Key and value are trimmed. A line without a colon is kept as a
    /// metadata key with an empty value. Returns the trimmed key.
    pub fn push_line<'a>(&mut self, line: &'a str) -> &'a str {
        match line.split_once(':') {
            Some((key, value)) => {
                let key = key.trim();
                self.insert(key, value.trim());
                key
            }
            None => {
                let key = line.trim();
                self.metadata.push((key.to_string(), String::new()));
                key
            }
        }
    }

    /// Store one field, routing well-known names to their slots.
    pub fn insert(&mut self, key: &str, value: &str) {
        let slot = if key.eq_ignore_ascii_case(field::WARC_TYPE) {
            self.record_type = value.parse().ok();
            return;
        } else if key.eq_ignore_ascii_case(field::WARC_DATE) {
            &mut self.date
        } else if key.eq_ignore_ascii_case(field::WARC_RECORD_ID) {
            &mut self.record_id
        } else if key.eq_ignore_ascii_case(field::CONTENT_TYPE) {
            &mut self.content_type
        } else if key.eq_ignore_ascii_case(field::CONTENT_LENGTH) {
            &mut self.content_length
        } else {
            self.metadata.push((key.to_string(), value.to_string()));
            return;
        };
        *slot = Some(value.to_string());
    }

    /// Look up any field by name.
    ///
    /// For metadata fields that appear more than once, the first wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.eq_ignore_ascii_case(field::WARC_TYPE) {
            return self.record_type.as_ref().map(WarcRecordType::as_str);
        }
        let slot = if key.eq_ignore_ascii_case(field::WARC_DATE) {
            &self.date
        } else if key.eq_ignore_ascii_case(field::WARC_RECORD_ID) {
            &self.record_id
        } else if key.eq_ignore_ascii_case(field::CONTENT_TYPE) {
            &self.content_type
        } else if key.eq_ignore_ascii_case(field::CONTENT_LENGTH) {
            &self.content_length
        } else {
            return self.metadata(key);
        };
        slot.as_deref()
    }

    /// Look up a metadata (non well-known) field.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All metadata fields in header order
    pub fn metadata_fields(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Version line that opened the record
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Parsed `WARC-Type`
    pub const fn record_type(&self) -> Option<&WarcRecordType> {
        self.record_type.as_ref()
    }

    /// `WARC-Date`
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// `WARC-Record-ID`
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// `Content-Type`
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// `Content-Length` as written
    pub fn content_length_raw(&self) -> Option<&str> {
        self.content_length.as_deref()
    }

    /// `Content-Length` parsed as a byte count.
    ///
    /// `None` when the field is absent or is not a non-negative integer.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length.as_deref()?.trim().parse().ok()
    }
}
