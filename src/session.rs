//! Merge session state.
//!
//! A [`MergeSession`] is the single context an application drives: it owns
//! the uploaded documents in upload order, the page range text typed for each
//! of them, their parsed selections and the in-flight flag of the merge.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpick::session::{MergeSession, Notice};
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> pdfpick::Result<()> {
//! let mut session = MergeSession::default();
//! let first = session.add_document("a.pdf", a).await?;
//! session.add_document("b.pdf", b).await?;
//!
//! session.set_page_text(&first, "1-3, 5")?;
//!
//! match session.merge().await {
//!     Ok(artifact) => println!("{}: {}", artifact.name, Notice::success()),
//!     Err(e) => println!("{}", Notice::from_error(&e)),
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task;
use tracing::{debug, info, warn};

use crate::config::MergeOptions;
use crate::document::{DocumentId, SourceDocument};
use crate::engine::{LopdfEngine, PdfEngine};
use crate::error::{PdfPickError, Result};
use crate::merge::{MergeProgress, MergedArtifact, Merger};
use crate::selection::{PageSelection, SelectionStore};

/// Shared view of whether a merge is running.
///
/// Cloning is cheap; every clone observes the same flag.
#[derive(Debug, Clone, Default)]
pub struct MergeStatus {
    processing: Arc<AtomicBool>,
}

impl MergeStatus {
    /// True while a merge is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Mark a merge as started.
    ///
    /// Returns `None` if one is already running. The flag is cleared when the
    /// returned guard is dropped.
    pub fn try_begin(&self) -> Option<ProcessingGuard> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingGuard {
                processing: Arc::clone(&self.processing),
            })
    }
}

/// Holds the in-flight flag of a [`MergeStatus`] until dropped.
#[derive(Debug)]
pub struct ProcessingGuard {
    processing: Arc<AtomicBool>,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.processing.store(false, Ordering::Release);
    }
}

/// How a [`Notice`] should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Destructive,
}

/// User-facing outcome of a merge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline.
    pub title: String,
    /// One-sentence explanation.
    pub description: String,
    /// Presentation variant.
    pub severity: Severity,
}

impl Notice {
    fn new(title: &str, description: &str, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        }
    }

    /// Notice for a successful merge.
    pub fn success() -> Self {
        Self::new(
            "Success!",
            "Your PDFs have been merged and downloaded.",
            Severity::Success,
        )
    }

    /// Notice for a failed merge.
    ///
    /// Detailed reasons stay in the logs; the user sees one of two messages.
    pub fn from_error(err: &PdfPickError) -> Self {
        match err {
            PdfPickError::EmptyInput => Self::new(
                "No files selected",
                "Please upload at least one PDF file.",
                Severity::Destructive,
            ),
            _ => Self::new(
                "Error",
                "Failed to merge PDFs. Please try again.",
                Severity::Destructive,
            ),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Documents, selections and merge state of one user session.
pub struct MergeSession<E: PdfEngine = LopdfEngine> {
    documents: Vec<SourceDocument>,
    selections: SelectionStore,
    page_texts: HashMap<DocumentId, String>,
    status: MergeStatus,
    merger: Merger<E>,
}

impl MergeSession<LopdfEngine> {
    /// Create a session backed by `lopdf`.
    pub fn new(options: MergeOptions) -> Self {
        Self::from_merger(Merger::new(options))
    }
}

impl Default for MergeSession<LopdfEngine> {
    fn default() -> Self {
        Self::new(MergeOptions::default())
    }
}

impl<E: PdfEngine> MergeSession<E> {
    /// Create a session driving the given engine.
    pub fn with_engine(engine: E, options: MergeOptions) -> Self {
        Self::from_merger(Merger::with_engine(engine, options))
    }

    fn from_merger(merger: Merger<E>) -> Self {
        Self {
            documents: Vec::new(),
            selections: SelectionStore::new(),
            page_texts: HashMap::new(),
            status: MergeStatus::default(),
            merger,
        }
    }

    /// Load a PDF and append it to the session.
    ///
    /// The engine parses the bytes on the blocking pool to learn the page
    /// count; the document is appended only if that succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPickError::DocumentLoad`] if the bytes cannot be loaded.
    pub async fn add_document(
        &mut self,
        name: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Result<DocumentId> {
        let name = name.into();
        let content: Arc<[u8]> = content.into();

        let engine = self.merger.shared_engine();
        let bytes = Arc::clone(&content);
        let page_count = task::spawn_blocking(move || {
            engine
                .load(&bytes)
                .map(|source| engine.page_count(&source))
        })
        .await?
        .map_err(|e| {
            warn!(document = %name, error = %e, "Rejected document");
            PdfPickError::document_load(&name, e.message())
        })?;

        // Caller-supplied ids may already use the generated form.
        let mut id = DocumentId::generate();
        while self.document(&id).is_some() {
            id = DocumentId::generate();
        }
        debug!(document = %name, %id, page_count, "Added document");
        self.documents
            .push(SourceDocument::new(id.clone(), name, page_count, content));

        Ok(id)
    }

    /// Append a document whose page count is already known.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPickError::DuplicateDocument`] if a document with the
    /// same id is already in the session.
    pub fn insert_document(&mut self, document: SourceDocument) -> Result<()> {
        if self.document(&document.id).is_some() {
            warn!(id = %document.id, "Rejected duplicate document id");
            return Err(PdfPickError::duplicate_document(document.id.as_str()));
        }

        self.documents.push(document);
        Ok(())
    }

    /// Remove a document together with its selection and range text.
    pub fn remove_document(&mut self, id: &DocumentId) -> Option<SourceDocument> {
        let position = self.documents.iter().position(|d| &d.id == id)?;
        self.selections.remove_document(id);
        self.page_texts.remove(id);
        Some(self.documents.remove(position))
    }

    /// Set the page range text of a document and update its selection.
    ///
    /// Malformed or out-of-range parts of `text` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPickError::UnknownDocument`] if `id` is not in the
    /// session.
    pub fn set_page_text(
        &mut self,
        id: &DocumentId,
        text: impl Into<String>,
    ) -> Result<&PageSelection> {
        let page_count = self
            .document(id)
            .map(|d| d.page_count)
            .ok_or_else(|| PdfPickError::unknown_document(id.as_str()))?;

        let text = text.into();
        let selection = PageSelection::parse(&text, page_count);
        self.page_texts.insert(id.clone(), text);

        Ok(self.selections.set_selection(id.clone(), selection))
    }

    /// The page range text last entered for a document.
    pub fn page_text(&self, id: &DocumentId) -> Option<&str> {
        self.page_texts.get(id).map(String::as_str)
    }

    /// Look up a document by id.
    pub fn document(&self, id: &DocumentId) -> Option<&SourceDocument> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// Documents in upload order.
    pub fn documents(&self) -> &[SourceDocument] {
        &self.documents
    }

    /// Current page selections.
    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    /// Handle reporting whether a merge is running.
    pub fn status(&self) -> MergeStatus {
        self.status.clone()
    }

    /// Merge the session's documents.
    ///
    /// On success the session is reset; on failure it is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`PdfPickError::MergeInProgress`] while another merge holds
    /// the status flag, otherwise any error of [`Merger::merge`].
    pub async fn merge(&mut self) -> Result<MergedArtifact> {
        self.merge_with_progress(|_| {}).await
    }

    /// Merge with a callback receiving [`MergeProgress`] events.
    pub async fn merge_with_progress<F>(&mut self, on_progress: F) -> Result<MergedArtifact>
    where
        F: FnMut(MergeProgress),
    {
        let Some(_guard) = self.status.try_begin() else {
            warn!("Merge requested while another is running");
            return Err(PdfPickError::MergeInProgress);
        };

        let result = self
            .merger
            .merge_with_progress(&self.documents, &self.selections, on_progress)
            .await?;

        info!(
            documents = result.statistics.documents_merged,
            pages = result.statistics.total_pages,
            "Session merge succeeded, resetting"
        );
        self.reset();

        Ok(result.artifact)
    }

    /// Drop all documents, selections and range text.
    pub fn reset(&mut self) {
        self.documents.clear();
        self.selections.clear();
        self.page_texts.clear();
    }
}
