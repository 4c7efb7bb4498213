//! Integration tests for the merge session lifecycle.

use pdfpick::config::MergeOptions;
use pdfpick::error::PdfPickError;
use pdfpick::session::{MergeSession, Notice, Severity};

use crate::common::{RecordingEngine, assert_pages, fake_document, fake_pages, pdf_bytes};

#[tokio::test]
async fn test_upload_select_merge() {
    let mut session = MergeSession::default();
    let report = session
        .add_document("report.pdf", pdf_bytes("R", 5))
        .await
        .unwrap();
    let slides = session
        .add_document("slides.pdf", pdf_bytes("S", 3))
        .await
        .unwrap();

    session.set_page_text(&report, "4-5, 1").unwrap();
    session.set_page_text(&slides, "2").unwrap();
    assert_eq!(session.selections().resolve(&report, 5), vec![1, 4, 5]);

    let artifact = session.merge().await.unwrap();

    assert_pages(
        &artifact.bytes,
        &["R-Page-1", "R-Page-4", "R-Page-5", "S-Page-2"],
    );
    assert_eq!(artifact.page_count, 4);
    assert_eq!(Notice::success().severity, Severity::Success);

    // A successful merge starts the session over.
    assert!(session.documents().is_empty());
    assert!(session.selections().is_empty());
    assert_eq!(session.page_text(&report), None);
}

#[tokio::test]
async fn test_retyping_replaces_selection() {
    let mut session = MergeSession::default();
    let id = session.add_document("a.pdf", pdf_bytes("A", 4)).await.unwrap();

    session.set_page_text(&id, "1-2").unwrap();
    let selection = session.set_page_text(&id, "3").unwrap();
    assert_eq!(selection.pages(), &[3]);

    let cleared = session.set_page_text(&id, "").unwrap();
    assert!(cleared.is_empty());
    assert!(session.selections().get_selection(&id).is_none());
    assert_eq!(session.selections().resolve(&id, 4), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_removed_document_is_not_merged() {
    let mut session =
        MergeSession::with_engine(RecordingEngine::new(), MergeOptions::default());
    session.insert_document(fake_document("D1", 2)).unwrap();
    session.insert_document(fake_document("D2", 1)).unwrap();
    session.insert_document(fake_document("D3", 1)).unwrap();

    session.remove_document(&fake_document("D2", 1).id).unwrap();
    let artifact = session.merge().await.unwrap();

    assert_eq!(
        fake_pages(&artifact.bytes),
        vec!["D1-Page-1", "D1-Page-2", "D3-Page-1"]
    );
}

#[tokio::test]
async fn test_failed_merge_keeps_session_for_retry() {
    let mut session =
        MergeSession::with_engine(RecordingEngine::failing_copy("D2"), MergeOptions::default());
    session.insert_document(fake_document("D1", 3)).unwrap();
    session.insert_document(fake_document("D2", 1)).unwrap();
    let d1 = fake_document("D1", 3).id;
    session.set_page_text(&d1, "2-3").unwrap();

    let err = session.merge().await.unwrap_err();
    assert!(matches!(err, PdfPickError::PageExtraction { .. }));

    let notice = Notice::from_error(&err);
    assert_eq!(notice.description, "Failed to merge PDFs. Please try again.");
    assert_eq!(notice.severity, Severity::Destructive);

    assert_eq!(session.documents().len(), 2);
    assert_eq!(session.page_text(&d1), Some("2-3"));
    assert!(!session.status().is_processing());

    // Dropping the failing document makes the retry succeed.
    session.remove_document(&fake_document("D2", 1).id);
    let artifact = session.merge().await.unwrap();
    assert_eq!(fake_pages(&artifact.bytes), vec!["D1-Page-2", "D1-Page-3"]);
}

#[tokio::test]
async fn test_empty_session_notice() {
    let mut session = MergeSession::default();

    let err = session.merge().await.unwrap_err();
    let notice = Notice::from_error(&err);

    assert_eq!(notice.title, "No files selected");
    assert_eq!(notice.description, "Please upload at least one PDF file.");
}

#[tokio::test]
async fn test_status_visible_during_merge() {
    let mut session =
        MergeSession::with_engine(RecordingEngine::new(), MergeOptions::default());
    session.insert_document(fake_document("D1", 1)).unwrap();
    let status = session.status();

    let mut seen_processing = false;
    session
        .merge_with_progress(|_| seen_processing |= status.is_processing())
        .await
        .unwrap();

    assert!(seen_processing);
    assert!(!status.is_processing());
}
