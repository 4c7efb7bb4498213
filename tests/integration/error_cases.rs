//! Integration tests for error handling and edge cases.

use pdfpick::config::MergeOptions;
use pdfpick::document::{DocumentId, SourceDocument};
use pdfpick::error::PdfPickError;
use pdfpick::merge::Merger;
use pdfpick::selection::{PageSelection, SelectionStore};
use pdfpick::session::Notice;

use crate::common::{Call, RecordingEngine, fake_document, pdf_document};

#[tokio::test]
async fn test_error_empty_input_makes_no_engine_calls() {
    let engine = RecordingEngine::new();
    let merger = Merger::with_engine(engine.clone(), MergeOptions::default());

    let err = merger
        .merge(&[], &SelectionStore::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfPickError::EmptyInput));
    assert!(engine.calls().is_empty());
    assert!(err.to_string().contains("add at least one PDF"));
}

#[tokio::test]
async fn test_error_extraction_failure_is_atomic() {
    let engine = RecordingEngine::failing_copy("D2");
    let merger = Merger::with_engine(engine.clone(), MergeOptions::default());
    let documents = vec![fake_document("D1", 2), fake_document("D2", 2)];

    let err = merger
        .merge(&documents, &SelectionStore::new())
        .await
        .unwrap_err();

    match err {
        PdfPickError::PageExtraction { document, reason } => {
            assert_eq!(document, "D2.pdf");
            assert_eq!(reason, "copy refused");
        }
        other => panic!("expected PageExtraction, got {other:?}"),
    }
    assert!(
        !engine.calls().iter().any(|call| matches!(call, Call::Save(_))),
        "nothing may be serialized after a failure"
    );
}

#[tokio::test]
async fn test_error_load_failure_names_document() {
    let engine = RecordingEngine::new();
    let merger = Merger::with_engine(engine.clone(), MergeOptions::default());
    let documents = vec![
        fake_document("D1", 1),
        SourceDocument::new(DocumentId::from("x"), "scan.pdf", 1, b"garbage".to_vec()),
    ];

    let err = merger
        .merge(&documents, &SelectionStore::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PdfPickError::DocumentLoad { ref document, .. } if document == "scan.pdf"
    ));
    assert!(err.is_document_error());
    assert!(!engine.calls().iter().any(|call| matches!(call, Call::CopyPages(..))));
}

#[tokio::test]
async fn test_error_serialization_failure() {
    let merger = Merger::with_engine(RecordingEngine::failing_save(), MergeOptions::default());

    let err = merger
        .merge(&[fake_document("D1", 1)], &SelectionStore::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfPickError::Serialization { .. }));
    assert_eq!(Notice::from_error(&err).title, "Error");
}

#[tokio::test]
async fn test_error_selection_beyond_loaded_document() {
    // The recorded page count claims more pages than the engine finds.
    let mut document = fake_document("D1", 2);
    document.page_count = 5;
    let mut selections = SelectionStore::new();
    selections.set_selection(DocumentId::from("D1"), PageSelection::parse("5", 5));

    let merger = Merger::with_engine(RecordingEngine::new(), MergeOptions::default());
    let err = merger.merge(&[document], &selections).await.unwrap_err();

    assert!(matches!(err, PdfPickError::PageExtraction { .. }));
}

#[tokio::test]
async fn test_error_corrupted_pdf_with_lopdf() {
    let documents = vec![
        pdf_document("D1", 1),
        SourceDocument::new(DocumentId::from("empty"), "empty.pdf", 0, Vec::new()),
    ];

    let err = Merger::default()
        .merge(&documents, &SelectionStore::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfPickError::DocumentLoad { .. }));
}

#[tokio::test]
async fn test_error_invalid_options() {
    let options = MergeOptions {
        jobs: Some(0),
        ..Default::default()
    };

    let err = Merger::new(options)
        .merge(&[pdf_document("D1", 1)], &SelectionStore::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfPickError::InvalidConfig { .. }));
}

#[test]
fn test_error_malformed_selection_json() {
    let result: Result<PageSelection, _> = serde_json::from_str("[3, 1]");
    assert!(result.is_err());

    let result: Result<PageSelection, _> = serde_json::from_str("[0, 1]");
    assert!(result.is_err());
}
