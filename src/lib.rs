//! pdfpick - Pick pages from several PDF documents and merge them into one.
//!
//! This library provides:
//!
//! - Page range parsing (`"1-3, 5"`) that silently ignores what it cannot use
//! - Per-document page selections with a take-everything default
//! - Merge orchestration over a pluggable PDF engine
//! - A `lopdf`-backed engine
//! - Session state for applications: uploads, range text, in-flight flag
//!
//! # Examples
//!
//! ## Parsing Page Ranges
//!
//! ```
//! use pdfpick::parse_ranges;
//!
//! assert_eq!(parse_ranges("5, 1-3, 2-4, abc, 9", 6), vec![1, 2, 3, 4, 5]);
//! ```
//!
//! ## Merging
//!
//! ```no_run
//! use pdfpick::config::MergeOptions;
//! use pdfpick::document::{DocumentId, SourceDocument};
//! use pdfpick::merge::merge_documents;
//! use pdfpick::selection::{PageSelection, SelectionStore};
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> pdfpick::Result<()> {
//! let documents = vec![
//!     SourceDocument::new(DocumentId::from("a"), "a.pdf", 4, a),
//!     SourceDocument::new(DocumentId::from("b"), "b.pdf", 2, b),
//! ];
//!
//! let mut selections = SelectionStore::new();
//! selections.set_selection(DocumentId::from("a"), PageSelection::parse("1-2", 4));
//!
//! let result = merge_documents(&documents, &selections, MergeOptions::default()).await?;
//! println!("{} pages, {}", result.artifact.page_count, result.artifact.format_size());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod io;
pub mod merge;
pub mod selection;
pub mod session;
pub mod utils;


// Re-export commonly used types
pub use config::MergeOptions;
pub use document::{DocumentId, SourceDocument};
pub use engine::{EngineError, LopdfEngine, PdfEngine};
pub use error::{PdfPickError, Result};
pub use merge::{MergeResult, MergedArtifact, Merger};
pub use selection::{PageSelection, SelectionStore, parse_ranges};
pub use session::{MergeSession, Notice};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
