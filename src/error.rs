//! Error types for pdfpick.
//!
//! Every failure a caller can observe is a [`PdfPickError`]. Malformed page
//! range tokens are deliberately absent: the range parser drops them without
//! reporting anything.
//!
//! # Error Categories
//!
//! - **Input Errors**: no documents, unknown document ids, bad options
//! - **Document Errors**: a source cannot be loaded or its pages copied
//! - **Output Errors**: the merged document cannot be serialized
//! - **Session Errors**: a merge is already running

use thiserror::Error;

/// Result type alias for pdfpick operations.
pub type Result<T> = std::result::Result<T, PdfPickError>;

/// Main error type for pdfpick operations.
#[derive(Debug, Error)]
pub enum PdfPickError {
    /// No documents were supplied to the merge.
    #[error("No documents to merge\n  Hint: add at least one PDF document first")]
    EmptyInput,

    /// A source document could not be interpreted as a PDF.
    #[error("Failed to load PDF: {document}\n  Reason: {reason}")]
    DocumentLoad {
        /// Display name of the document.
        document: String,
        /// Reason reported by the PDF engine.
        reason: String,
    },

    /// Requested pages could not be copied out of a source document.
    #[error("Failed to extract pages from: {document}\n  Reason: {reason}")]
    PageExtraction {
        /// Display name of the document.
        document: String,
        /// Reason reported by the PDF engine.
        reason: String,
    },

    /// The merged document could not be serialized.
    #[error("Failed to serialize merged PDF: {reason}")]
    Serialization {
        /// Reason reported by the PDF engine.
        reason: String,
    },

    /// No document with this id is part of the session.
    #[error("Unknown document: {id}")]
    UnknownDocument {
        /// The id that was looked up.
        id: String,
    },

    /// A document with this id is already part of the session.
    #[error("Duplicate document: {id}\n  Hint: every document in a session needs its own id")]
    DuplicateDocument {
        /// The id that is already in use.
        id: String,
    },

    /// A merge is already running for this session.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// A page selection violates its ordering invariant.
    #[error("Invalid page selection: {reason}")]
    InvalidSelection {
        /// What is wrong with the selection.
        reason: String,
    },

    /// Invalid merge options.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for PdfPickError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(format!("{err:#}"))
    }
}

impl From<tokio::task::JoinError> for PdfPickError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::other(format!("Background task failed: {err}"))
    }
}

impl PdfPickError {
    /// Create a DocumentLoad error.
    pub fn document_load(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DocumentLoad {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Create a PageExtraction error.
    pub fn page_extraction(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PageExtraction {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }

    /// Create an UnknownDocument error.
    pub fn unknown_document(id: impl Into<String>) -> Self {
        Self::UnknownDocument { id: id.into() }
    }

    /// Create a DuplicateDocument error.
    pub fn duplicate_document(id: impl Into<String>) -> Self {
        Self::DuplicateDocument { id: id.into() }
    }

    /// Create an InvalidSelection error.
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        Self::InvalidSelection {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error came from processing a document.
    ///
    /// These abort a merge as a whole; the session keeps its state so the
    /// user can fix the offending document and try again.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::DocumentLoad { .. } | Self::PageExtraction { .. } | Self::Serialization { .. }
        )
    }

    /// Check if this error was raised before any PDF work started.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::UnknownDocument { .. }
                | Self::DuplicateDocument { .. }
                | Self::InvalidSelection { .. }
                | Self::InvalidConfig { .. }
        )
    }
}
