//! [`PdfEngine`] implementation backed by `lopdf`.

use lopdf::{Document, Object, ObjectId, dictionary};

use super::{EngineError, PdfEngine};
use crate::config::{MergeOptions, Metadata};
use crate::io::reader::{LoadedPdf, PdfReader};
use crate::io::writer::PdfWriter;
use crate::merge::metadata::MetadataWriter;
use crate::merge::pages::PageCopier;

/// PDF version written for merged documents.
const OUTPUT_VERSION: &str = "1.7";

/// A merged document under construction.
#[derive(Debug)]
pub struct OutputDocument {
    /// The document being assembled.
    pub document: Document,

    /// Root of the page tree new pages are appended to.
    pub pages_id: ObjectId,
}

impl OutputDocument {
    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }
}

/// A page copied into an [`OutputDocument`], waiting to be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopiedPage(pub ObjectId);

/// Engine that loads, copies and writes PDFs with `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct LopdfEngine {
    reader: PdfReader,
    writer: PdfWriter,
    metadata: Metadata,
}

impl LopdfEngine {
    /// Create an engine with default reader and writer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine configured from merge options.
    pub fn from_options(options: &MergeOptions) -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::with_compression(options.compression),
            metadata: options.metadata.normalized(),
        }
    }
}

impl PdfEngine for LopdfEngine {
    type Source = LoadedPdf;
    type Output = OutputDocument;
    type Page = CopiedPage;

    fn create(&self) -> OutputDocument {
        let mut document = Document::with_version(OUTPUT_VERSION);

        let pages_id = document.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        OutputDocument { document, pages_id }
    }

    fn load(&self, bytes: &[u8]) -> Result<LoadedPdf, EngineError> {
        self.reader.read(bytes)
    }

    fn page_count(&self, source: &LoadedPdf) -> u32 {
        source.page_count
    }

    fn copy_pages(
        &self,
        output: &mut OutputDocument,
        source: &LoadedPdf,
        indices: &[usize],
    ) -> Result<Vec<CopiedPage>, EngineError> {
        let copied = PageCopier::new(&source.document, &mut output.document).copy_pages(indices)?;
        Ok(copied.into_iter().map(CopiedPage).collect())
    }

    fn add_page(&self, output: &mut OutputDocument, page: CopiedPage) -> Result<(), EngineError> {
        let CopiedPage(page_id) = page;
        let pages_id = output.pages_id;

        output
            .document
            .get_dictionary_mut(page_id)
            .map_err(|e| EngineError::new(format!("Copied page is not a dictionary: {e}")))?
            .set("Parent", Object::Reference(pages_id));

        let pages = output
            .document
            .get_dictionary_mut(pages_id)
            .map_err(|e| EngineError::new(format!("Failed to get pages object: {e}")))?;

        match pages.get_mut(b"Kids") {
            Ok(Object::Array(kids)) => kids.push(Object::Reference(page_id)),
            Ok(_) => return Err(EngineError::new("Kids is not an array")),
            Err(_) => return Err(EngineError::new("Pages dictionary missing Kids array")),
        }

        let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", Object::Integer(count + 1));

        Ok(())
    }

    fn save(&self, output: OutputDocument) -> Result<Vec<u8>, EngineError> {
        let OutputDocument { mut document, .. } = output;
        MetadataWriter::new().apply(&mut document, &self.metadata);
        self.writer.to_bytes(document)
    }
}
