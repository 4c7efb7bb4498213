//! Document information for the merged PDF.
//!
//! Writes the Info dictionary: Producer and Creator always, Title, Author,
//! Subject and Keywords when configured.

use lopdf::{Dictionary, Document, Object};

use crate::config::Metadata;

/// Value written to `/Producer` and `/Creator`.
const PRODUCER: &str = concat!("pdfpick ", env!("CARGO_PKG_VERSION"));

/// Writes and reads PDF Info dictionaries.
#[derive(Debug, Clone, Default)]
pub struct MetadataWriter;

impl MetadataWriter {
    /// Create a new metadata writer.
    pub fn new() -> Self {
        Self
    }

    /// Set metadata on a document, creating the Info dictionary if needed.
    ///
    /// Only non-empty fields of `metadata` are written.
    pub fn apply(&self, doc: &mut Document, metadata: &Metadata) {
        let existing = doc
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .ok()
            .filter(|id| matches!(doc.objects.get(id), Some(Object::Dictionary(_))));

        let info_id = match existing {
            Some(id) => id,
            None => {
                let id = doc.add_object(Dictionary::new());
                doc.trailer.set("Info", Object::Reference(id));
                id
            }
        };

        let Ok(info) = doc.get_dictionary_mut(info_id) else {
            return;
        };

        let fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                info.set(key, Object::string_literal(value.as_str()));
            }
        }

        info.set("Creator", Object::string_literal(PRODUCER));
        info.set("Producer", Object::string_literal(PRODUCER));
    }

    /// Read metadata back from a document.
    pub fn read(&self, doc: &Document) -> Metadata {
        let Some(info) = doc
            .trailer
            .get(b"Info")
            .and_then(Object::as_reference)
            .and_then(|id| doc.get_dictionary(id))
            .ok()
        else {
            return Metadata::default();
        };

        Metadata::new(
            string_field(info, b"Title"),
            string_field(info, b"Author"),
            string_field(info, b"Subject"),
            string_field(info, b"Keywords"),
        )
    }

    /// Check if a document has an Info dictionary.
    pub fn has_metadata(&self, doc: &Document) -> bool {
        doc.trailer.has(b"Info")
    }
}

fn string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key) {
        Ok(Object::String(bytes, _)) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}
