//! Merge orchestration.
//!
//! Combines the selected pages of several source documents into one output
//! PDF. Documents are loaded concurrently, then their pages are appended
//! strictly in document order. Any failure aborts the whole merge and no
//! partial output is produced.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info, warn};

use crate::config::MergeOptions;
use crate::document::{DocumentId, SourceDocument};
use crate::engine::{EngineError, LopdfEngine, PdfEngine};
use crate::error::{PdfPickError, Result};
use crate::selection::SelectionStore;
use crate::utils::format_file_size;

/// Statistics about a merge operation.
#[derive(Debug, Clone, Serialize)]
pub struct MergeStatistics {
    /// Number of source documents merged.
    pub documents_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Time taken to load all source documents.
    pub load_time: Duration,

    /// Total time taken for the merge.
    pub merge_time: Duration,

    /// Size of the merged document in bytes.
    pub output_size: u64,
}

impl MergeStatistics {
    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// The merged PDF, ready to hand to a download mechanism.
#[derive(Debug, Clone)]
pub struct MergedArtifact {
    /// File name for the download.
    pub name: String,

    /// Serialized PDF.
    pub bytes: Vec<u8>,

    /// Number of pages in the merged document.
    pub page_count: usize,
}

impl MergedArtifact {
    /// Size of the artifact in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size as a human-readable string.
    pub fn format_size(&self) -> String {
        format_file_size(self.size())
    }
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// The merged document.
    pub artifact: MergedArtifact,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// Progress reported while a merge runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeProgress {
    /// A source document was loaded. Reported in document order.
    Loaded {
        /// Position of the document in the merge.
        index: usize,
        /// The document's id.
        document: DocumentId,
        /// Page count reported by the engine.
        page_count: u32,
    },

    /// The selected pages of a document were appended to the output.
    Appended {
        /// Position of the document in the merge.
        index: usize,
        /// The document's id.
        document: DocumentId,
        /// Number of pages appended.
        pages: usize,
    },

    /// All pages are in place and the output is being serialized.
    Finalizing {
        /// Number of pages in the output.
        total_pages: usize,
    },
}

/// One document of a merge and the pages taken from it.
#[derive(Debug, Clone)]
pub struct MergeItem<'a> {
    /// The source document.
    pub document: &'a SourceDocument,

    /// Resolved 1-based page numbers, ascending.
    pub pages: Vec<u32>,
}

impl MergeItem<'_> {
    /// Zero-based page indices as the engine expects them.
    pub fn indices(&self) -> Vec<usize> {
        self.pages
            .iter()
            .map(|&page| page.saturating_sub(1) as usize)
            .collect()
    }
}

/// The resolved plan of a merge: every document with its pages, in order.
#[derive(Debug, Clone, Default)]
pub struct MergeRequest<'a> {
    items: Vec<MergeItem<'a>>,
}

impl<'a> MergeRequest<'a> {
    /// Items in merge order.
    pub fn items(&self) -> &[MergeItem<'a>] {
        &self.items
    }

    /// Number of documents in the request.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the request has no documents.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages the merged document will have.
    pub fn total_pages(&self) -> usize {
        self.items.iter().map(|item| item.pages.len()).sum()
    }
}

/// PDF merger driving a [`PdfEngine`].
///
/// # Examples
///
/// ```no_run
/// use pdfpick::document::SourceDocument;
/// use pdfpick::merge::Merger;
/// use pdfpick::selection::SelectionStore;
///
/// # async fn example(documents: Vec<SourceDocument>) -> pdfpick::Result<()> {
/// let merger = Merger::default();
/// let result = merger.merge(&documents, &SelectionStore::new()).await?;
/// println!(
///     "Merged {} documents into {} pages",
///     result.statistics.documents_merged, result.statistics.total_pages
/// );
/// # Ok(())
/// # }
/// ```
pub struct Merger<E: PdfEngine = LopdfEngine> {
    engine: Arc<E>,
    options: MergeOptions,
}

impl Merger<LopdfEngine> {
    /// Create a merger backed by `lopdf`.
    pub fn new(options: MergeOptions) -> Self {
        let engine = LopdfEngine::from_options(&options);
        Self::with_engine(engine, options)
    }
}

impl Default for Merger<LopdfEngine> {
    fn default() -> Self {
        Self::new(MergeOptions::default())
    }
}

impl<E: PdfEngine> Merger<E> {
    /// Create a merger driving the given engine.
    pub fn with_engine(engine: E, options: MergeOptions) -> Self {
        Self {
            engine: Arc::new(engine),
            options,
        }
    }

    /// The options this merger was built with.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// The engine this merger drives.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn shared_engine(&self) -> Arc<E> {
        Arc::clone(&self.engine)
    }

    /// Resolve the pages of every document.
    ///
    /// `page_counts[i]` is the page count of `documents[i]` as reported by
    /// the engine; documents without an entry fall back to their own
    /// recorded count.
    pub fn build_request<'a>(
        documents: &'a [SourceDocument],
        selections: &SelectionStore,
        page_counts: &[u32],
    ) -> MergeRequest<'a> {
        let items = documents
            .iter()
            .enumerate()
            .map(|(i, document)| {
                let page_count = page_counts.get(i).copied().unwrap_or(document.page_count);
                MergeItem {
                    document,
                    pages: selections.resolve(&document.id, page_count),
                }
            })
            .collect();

        MergeRequest { items }
    }

    /// Merge the selected pages of `documents`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `documents` is empty
    /// - The options are invalid
    /// - Any document fails to load or to yield its pages
    /// - The output cannot be serialized
    pub async fn merge(
        &self,
        documents: &[SourceDocument],
        selections: &SelectionStore,
    ) -> Result<MergeResult> {
        self.merge_with_progress(documents, selections, |_| {}).await
    }

    /// Merge with a callback receiving [`MergeProgress`] events in order.
    pub async fn merge_with_progress<F>(
        &self,
        documents: &[SourceDocument],
        selections: &SelectionStore,
        mut on_progress: F,
    ) -> Result<MergeResult>
    where
        F: FnMut(MergeProgress),
    {
        if documents.is_empty() {
            return Err(PdfPickError::EmptyInput);
        }
        self.options.validate()?;

        let merge_start = Instant::now();
        info!(documents = documents.len(), "Starting merge");

        // Load phase
        let load_start = Instant::now();
        let sources = self.load_all(documents, &mut on_progress).await?;
        let load_time = load_start.elapsed();

        let page_counts: Vec<u32> = sources
            .iter()
            .map(|source| self.engine.page_count(source))
            .collect();
        let request = Self::build_request(documents, selections, &page_counts);

        // Copy phase
        let mut output = self.engine.create();
        for (index, (item, source)) in request.items().iter().zip(sources).enumerate() {
            let engine = Arc::clone(&self.engine);
            let indices = item.indices();

            let (returned, appended) = task::spawn_blocking(move || {
                let appended = append_pages(engine.as_ref(), &mut output, &source, &indices);
                (output, appended)
            })
            .await?;
            output = returned;

            let pages = appended.map_err(|e| {
                warn!(document = %item.document.name, error = %e, "Page extraction failed");
                PdfPickError::page_extraction(&item.document.name, e.message())
            })?;

            debug!(document = %item.document.name, pages, "Appended pages");
            on_progress(MergeProgress::Appended {
                index,
                document: item.document.id.clone(),
                pages,
            });
        }

        // Finalize
        let total_pages = request.total_pages();
        on_progress(MergeProgress::Finalizing { total_pages });

        let engine = Arc::clone(&self.engine);
        let bytes = task::spawn_blocking(move || engine.save(output))
            .await?
            .map_err(|e| {
                warn!(error = %e, "Serialization failed");
                PdfPickError::serialization(e.message())
            })?;

        let statistics = MergeStatistics {
            documents_merged: documents.len(),
            total_pages,
            load_time,
            merge_time: merge_start.elapsed(),
            output_size: bytes.len() as u64,
        };

        info!(
            documents = statistics.documents_merged,
            pages = statistics.total_pages,
            size = %statistics.format_output_size(),
            elapsed = ?statistics.merge_time,
            "Merge complete"
        );

        Ok(MergeResult {
            artifact: MergedArtifact {
                name: self.options.output_name.trim().to_string(),
                bytes,
                page_count: total_pages,
            },
            statistics,
        })
    }

    /// Load every document on the blocking pool, keeping input order.
    async fn load_all<F>(
        &self,
        documents: &[SourceDocument],
        on_progress: &mut F,
    ) -> Result<Vec<E::Source>>
    where
        F: FnMut(MergeProgress),
    {
        let jobs = self.options.effective_jobs().max(1);

        let tasks = documents.iter().map(|document| {
            let engine = Arc::clone(&self.engine);
            let content = document.shared_content();
            async move {
                let loaded = task::spawn_blocking(move || engine.load(&content)).await;
                (document, loaded)
            }
        });
        let mut loads = stream::iter(tasks).buffered(jobs);

        let mut sources = Vec::with_capacity(documents.len());
        while let Some((document, loaded)) = loads.next().await {
            let source = loaded?.map_err(|e| {
                warn!(document = %document.name, error = %e, "Failed to load document");
                PdfPickError::document_load(&document.name, e.message())
            })?;

            let page_count = self.engine.page_count(&source);
            debug!(document = %document.name, page_count, "Loaded document");
            on_progress(MergeProgress::Loaded {
                index: sources.len(),
                document: document.id.clone(),
                page_count,
            });

            sources.push(source);
        }

        Ok(sources)
    }
}

/// Copy `indices` out of `source` and append them to `output`.
fn append_pages<E: PdfEngine>(
    engine: &E,
    output: &mut E::Output,
    source: &E::Source,
    indices: &[usize],
) -> std::result::Result<usize, EngineError> {
    let pages = engine.copy_pages(output, source, indices)?;
    let count = pages.len();
    for page in pages {
        engine.add_page(output, page)?;
    }
    Ok(count)
}
