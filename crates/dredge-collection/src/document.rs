//! The uniform document shape handed to the indexer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A raw document produced by a format adapter.
///
/// Documents are immutable once built. `indexable` is false for structural
/// records (archive info blocks, request records) that are parsed but must
/// not reach the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    contents: String,
    raw: String,
    indexable: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, String>,
}

impl Document {
    /// Create a document with no extra fields.
    pub fn new(
        id: impl Into<String>,
        contents: impl Into<String>,
        raw: impl Into<String>,
        indexable: bool,
    ) -> Self {
        Self {
            id: id.into(),
            contents: contents.into(),
            raw: raw.into(),
            indexable,
            fields: BTreeMap::new(),
        }
    }

    /// Start building a document with the given id.
    pub fn builder(id: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(id)
    }

    /// Identifier, unique within a collection
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Text to index
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Original representation of the record
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether the document should be indexed
    pub const fn indexable(&self) -> bool {
        self.indexable
    }

    /// Extra named fields carried by multi-field sources
    pub const fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Look up one extra field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Builder for [`Document`].
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    id: String,
    contents: String,
    raw: Option<String>,
    indexable: bool,
    fields: BTreeMap<String, String>,
}

impl DocumentBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contents: String::new(),
            raw: None,
            indexable: true,
            fields: BTreeMap::new(),
        }
    }

    /// Set the indexed text.
    pub fn contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = contents.into();
        self
    }

    /// Set the raw representation. Defaults to the contents.
    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Mark the document as (not) indexable. Defaults to `true`.
    pub fn indexable(mut self, indexable: bool) -> Self {
        self.indexable = indexable;
        self
    }

    /// Attach an extra named field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Finish the document.
    pub fn build(self) -> Document {
        let raw = self.raw.unwrap_or_else(|| self.contents.clone());
        Document {
            id: self.id,
            contents: self.contents,
            raw,
            indexable: self.indexable,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_raw_to_contents() {
        let doc = Document::builder("doc1").contents("hello world").build();
        assert_eq!(doc.id(), "doc1");
        assert_eq!(doc.raw(), "hello world");
        assert!(doc.indexable());
        assert!(doc.fields().is_empty());
    }

    #[test]
    fn test_builder_fields() {
        let doc = Document::builder("doc2")
            .contents("body")
            .raw("{\"id\":\"doc2\"}")
            .indexable(false)
            .field("title", "A title")
            .build();

        assert_eq!(doc.raw(), "{\"id\":\"doc2\"}");
        assert!(!doc.indexable());
        assert_eq!(doc.field("title"), Some("A title"));
        assert_eq!(doc.field("missing"), None);
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let doc = Document::new("d", "c", "r", true);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(
            json,
            r#"{"id":"d","contents":"c","raw":"r","indexable":true}"#
        );

        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
