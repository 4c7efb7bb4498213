//! PDF input and output in memory.
//!
//! - [`reader`]: parse PDF bytes into `lopdf` documents
//! - [`writer`]: compress and serialize documents back to bytes

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
