//! PDF document engine.
//!
//! The merge orchestrator never touches PDF internals itself. It drives a
//! [`PdfEngine`], which knows how to load documents, copy pages between
//! them and serialize the result. [`LopdfEngine`] is the implementation
//! backed by `lopdf`; tests substitute their own.

pub mod lopdf_engine;

pub use lopdf_engine::{CopiedPage, LopdfEngine, OutputDocument};

use thiserror::Error;

/// Failure reported by a PDF engine.
///
/// The orchestrator turns this into a [`PdfPickError`](crate::PdfPickError)
/// according to the step that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(String);

impl EngineError {
    /// Create an engine error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl From<lopdf::Error> for EngineError {
    fn from(err: lopdf::Error) -> Self {
        Self(err.to_string())
    }
}

/// Operations the merge needs from a PDF library.
///
/// Page indices are zero-based at this boundary.
pub trait PdfEngine: Send + Sync + 'static {
    /// A loaded source document.
    type Source: Send + 'static;

    /// The document being assembled.
    type Output: Send + 'static;

    /// A page copied into an output but not yet placed in its page tree.
    type Page;

    /// Create an empty output document.
    fn create(&self) -> Self::Output;

    /// Load a source document from raw bytes.
    fn load(&self, bytes: &[u8]) -> Result<Self::Source, EngineError>;

    /// Number of pages in a loaded source.
    fn page_count(&self, source: &Self::Source) -> u32;

    /// Copy the pages at `indices` from `source` into `output`, in the given
    /// order. Fails as a whole if any index does not exist.
    fn copy_pages(
        &self,
        output: &mut Self::Output,
        source: &Self::Source,
        indices: &[usize],
    ) -> Result<Vec<Self::Page>, EngineError>;

    /// Append a copied page to the end of the output.
    fn add_page(&self, output: &mut Self::Output, page: Self::Page) -> Result<(), EngineError>;

    /// Serialize the output into PDF bytes.
    fn save(&self, output: Self::Output) -> Result<Vec<u8>, EngineError>;
}
