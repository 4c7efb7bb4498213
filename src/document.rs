//! Source documents taking part in a merge.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::utils::format_file_size;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a source document within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Allocate a fresh id, unique for the lifetime of the process.
    pub fn generate() -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("doc-{n}"))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A PDF accepted for merging.
///
/// The content is shared, so cloning a document does not copy its bytes.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Identifier used to look up this document's page selection.
    pub id: DocumentId,

    /// Display name, usually the uploaded file name.
    pub name: String,

    /// Number of pages, counted from 1.
    pub page_count: u32,

    content: Arc<[u8]>,
}

impl SourceDocument {
    /// Create a document whose page count is already known.
    pub fn new(
        id: DocumentId,
        name: impl Into<String>,
        page_count: u32,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            page_count,
            content: content.into(),
        }
    }

    /// Raw PDF bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Shared handle to the raw bytes, for handing to background tasks.
    pub fn shared_content(&self) -> Arc<[u8]> {
        Arc::clone(&self.content)
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Size as a human-readable string.
    pub fn format_size(&self) -> String {
        format_file_size(self.size())
    }
}
