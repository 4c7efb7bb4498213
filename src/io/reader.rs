//! PDF loading from memory.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpick::io::reader::PdfReader;
//!
//! # fn example(bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.read(bytes)?;
//! println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::engine::EngineError;
use crate::utils::format_file_size;

/// A parsed PDF document with load metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Number of pages in the document.
    pub page_count: u32,

    /// Time taken to parse the document.
    pub load_time: Duration,

    /// Size of the source bytes.
    pub size: u64,
}

impl LoadedPdf {
    /// Size as a human-readable string.
    pub fn format_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// PDF reader with configurable loading behavior.
#[derive(Debug, Clone)]
pub struct PdfReader {
    /// Whether to reject documents without pages.
    verify: bool,
}

impl PdfReader {
    /// Create a new PDF reader with default settings.
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create a reader that accepts documents with an empty page tree.
    pub fn without_verification() -> Self {
        Self { verify: false }
    }

    /// Parse a PDF held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The bytes are not a PDF lopdf can parse
    /// - The PDF is encrypted
    /// - Verification is on and the PDF has no pages
    pub fn read(&self, bytes: &[u8]) -> Result<LoadedPdf, EngineError> {
        let start = Instant::now();

        let document = Document::load_mem(bytes).map_err(|e| {
            let err_msg = e.to_string();
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                EngineError::new("PDF is encrypted and cannot be processed")
            } else {
                EngineError::new(err_msg)
            }
        })?;

        if document.is_encrypted() {
            return Err(EngineError::new(
                "PDF is encrypted and cannot be processed",
            ));
        }

        let page_count = document.get_pages().len() as u32;
        if self.verify && page_count == 0 {
            return Err(EngineError::new("PDF has no pages"));
        }

        Ok(LoadedPdf {
            document,
            page_count,
            load_time: start.elapsed(),
            size: bytes.len() as u64,
        })
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
