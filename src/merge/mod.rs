//! PDF merging functionality.
//!
//! This module provides the core merge logic:
//! - [`merger`]: orchestrates a merge across documents
//! - [`pages`]: copies pages between `lopdf` documents
//! - [`metadata`]: writes the Info dictionary of the output

pub mod merger;
pub mod metadata;
pub mod pages;

pub use merger::{
    MergeItem, MergeProgress, MergeRequest, MergeResult, MergeStatistics, MergedArtifact, Merger,
};
pub use metadata::MetadataWriter;
pub use pages::PageCopier;

use crate::config::MergeOptions;
use crate::document::SourceDocument;
use crate::error::Result;
use crate::selection::SelectionStore;

/// Merge documents with the `lopdf` engine.
///
/// Convenience wrapper around [`Merger::merge`].
pub async fn merge_documents(
    documents: &[SourceDocument],
    selections: &SelectionStore,
    options: MergeOptions,
) -> Result<MergeResult> {
    Merger::new(options).merge(documents, selections).await
}
