//! PDF serialization into memory.
//!
//! # Examples
//!
//! ```no_run
//! use pdfpick::io::writer::PdfWriter;
//! use lopdf::Document;
//!
//! # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let bytes = writer.to_bytes(doc)?;
//! println!("Serialized {} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::config::CompressionLevel;
use crate::engine::EngineError;
use crate::utils::format_file_size;

/// Options for serializing PDF documents.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// Renumber objects so ids are dense.
    pub optimize: bool,

    /// Initial capacity of the output buffer (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: CompressionLevel::Standard,
            optimize: true,
            buffer_size: 64 * 1024,
        }
    }
}

/// Statistics about a serialization.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to serialize.
    pub write_time: Duration,

    /// Number of bytes produced.
    pub size: u64,

    /// Whether compression was applied.
    pub compressed: bool,

    /// Number of unreachable objects removed.
    pub pruned_objects: usize,
}

impl WriteStatistics {
    /// Format size as human-readable string.
    pub fn format_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer for the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            options: WriteOptions {
                compression,
                ..Default::default()
            },
        }
    }

    /// Serialize a document into PDF bytes.
    pub fn to_bytes(&self, doc: Document) -> Result<Vec<u8>, EngineError> {
        self.to_bytes_with_stats(doc).map(|(bytes, _)| bytes)
    }

    /// Serialize a document and report statistics about the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if lopdf fails to write the document.
    pub fn to_bytes_with_stats(
        &self,
        mut doc: Document,
    ) -> Result<(Vec<u8>, WriteStatistics), EngineError> {
        let start = Instant::now();
        let mut pruned_objects = 0;

        match self.options.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => doc.compress(),
            CompressionLevel::Maximum => {
                pruned_objects = doc.prune_objects().len();
                doc.compress();
            }
        }

        if self.options.optimize {
            doc.renumber_objects();
        }

        let mut buffer = Vec::with_capacity(self.options.buffer_size);
        doc.save_to(&mut buffer)
            .map_err(|e| EngineError::new(format!("Failed to write PDF: {e}")))?;

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            size: buffer.len() as u64,
            compressed: self.options.compression != CompressionLevel::None,
            pruned_objects,
        };

        Ok((buffer, stats))
    }
}
