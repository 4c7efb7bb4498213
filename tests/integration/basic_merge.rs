//! Integration tests for merging with page selections.

use pdfpick::config::{CompressionLevel, MergeOptions, Metadata};
use pdfpick::document::DocumentId;
use pdfpick::merge::{MergeProgress, Merger, merge_documents};
use pdfpick::selection::{PageSelection, SelectionStore};
use rstest::rstest;

use crate::common::{
    Call, RecordingEngine, assert_pages, fake_document, fake_pages, pdf_document,
};

fn select(store: &mut SelectionStore, id: &str, text: &str, page_count: u32) {
    store.set_selection(DocumentId::from(id), PageSelection::parse(text, page_count));
}

#[tokio::test]
async fn test_merge_selected_pages_in_document_order() {
    let documents = vec![pdf_document("D1", 3), pdf_document("D2", 2)];
    let mut selections = SelectionStore::new();
    select(&mut selections, "D1", "1,2", 3);
    select(&mut selections, "D2", "1", 2);

    let result = merge_documents(&documents, &selections, MergeOptions::default())
        .await
        .unwrap();

    assert_pages(
        &result.artifact.bytes,
        &["D1-Page-1", "D1-Page-2", "D2-Page-1"],
    );
    assert_eq!(result.artifact.name, "merged-document.pdf");
}

#[tokio::test]
async fn test_merge_defaults_to_all_pages() {
    let documents = vec![pdf_document("A", 2), pdf_document("B", 3)];
    let mut selections = SelectionStore::new();
    select(&mut selections, "A", "2", 2);

    let result = merge_documents(&documents, &selections, MergeOptions::default())
        .await
        .unwrap();

    assert_pages(
        &result.artifact.bytes,
        &["A-Page-2", "B-Page-1", "B-Page-2", "B-Page-3"],
    );
}

#[tokio::test]
async fn test_fully_invalid_text_means_all_pages() {
    let documents = vec![pdf_document("A", 3)];
    let mut selections = SelectionStore::new();
    select(&mut selections, "A", "abc, 0, 9-12", 3);

    let result = merge_documents(&documents, &selections, MergeOptions::default())
        .await
        .unwrap();

    assert_pages(&result.artifact.bytes, &["A-Page-1", "A-Page-2", "A-Page-3"]);
}

#[tokio::test]
async fn test_selected_pages_come_out_ascending() {
    let documents = vec![pdf_document("A", 6)];
    let mut selections = SelectionStore::new();
    select(&mut selections, "A", "5, 1-3, 2-4", 6);

    let result = merge_documents(&documents, &selections, MergeOptions::default())
        .await
        .unwrap();

    assert_pages(
        &result.artifact.bytes,
        &["A-Page-1", "A-Page-2", "A-Page-3", "A-Page-4", "A-Page-5"],
    );
}

#[tokio::test]
async fn test_same_source_twice() {
    let mut second = pdf_document("A", 2);
    second.id = DocumentId::from("A-again");
    let documents = vec![pdf_document("A", 2), second];
    let mut selections = SelectionStore::new();
    select(&mut selections, "A-again", "2", 2);

    let result = merge_documents(&documents, &selections, MergeOptions::default())
        .await
        .unwrap();

    assert_pages(
        &result.artifact.bytes,
        &["A-Page-1", "A-Page-2", "A-Page-2"],
    );
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_merge_with_compression_levels(#[case] compression: CompressionLevel) {
    let documents = vec![pdf_document("D1", 2), pdf_document("D2", 2)];
    let options = MergeOptions {
        compression,
        ..Default::default()
    };

    let result = merge_documents(&documents, &SelectionStore::new(), options)
        .await
        .unwrap();

    assert_pages(
        &result.artifact.bytes,
        &["D1-Page-1", "D1-Page-2", "D2-Page-1", "D2-Page-2"],
    );
    assert_eq!(result.statistics.documents_merged, 2);
    assert_eq!(result.statistics.total_pages, 4);
}

#[tokio::test]
async fn test_metadata_written_to_output() {
    let options = MergeOptions::from_json(
        r#"{ "output_name": "pack.pdf", "metadata": { "title": "  Week 3  ", "author": "" } }"#,
    )
    .unwrap();
    assert_eq!(
        options.metadata,
        Metadata::new(Some("Week 3".to_string()), None, None, None)
    );

    let result = merge_documents(&[pdf_document("A", 1)], &SelectionStore::new(), options)
        .await
        .unwrap();

    let doc = lopdf::Document::load_mem(&result.artifact.bytes).unwrap();
    let metadata = pdfpick::merge::MetadataWriter::new().read(&doc);
    assert_eq!(metadata.title.as_deref(), Some("Week 3"));
    assert_eq!(result.artifact.name, "pack.pdf");
}

#[tokio::test]
async fn test_engine_receives_zero_based_indices() {
    let engine = RecordingEngine::new();
    let merger = Merger::with_engine(engine.clone(), MergeOptions::default());
    let documents = vec![fake_document("D1", 4), fake_document("D2", 2)];
    let mut selections = SelectionStore::new();
    select(&mut selections, "D1", "2, 4", 4);

    let result = merger.merge(&documents, &selections).await.unwrap();

    assert_eq!(
        fake_pages(&result.artifact.bytes),
        vec!["D1-Page-2", "D1-Page-4", "D2-Page-1", "D2-Page-2"]
    );

    let copies: Vec<Call> = engine
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::CopyPages(..)))
        .collect();
    assert_eq!(
        copies,
        vec![
            Call::CopyPages("D1".to_string(), vec![1, 3]),
            Call::CopyPages("D2".to_string(), vec![0, 1]),
        ]
    );
}

#[tokio::test]
async fn test_parallel_loads_keep_document_order() {
    let documents: Vec<_> = (1..=8)
        .map(|i| fake_document(&format!("D{i}"), 1))
        .collect();
    let options = MergeOptions {
        jobs: Some(4),
        ..Default::default()
    };
    let merger = Merger::with_engine(RecordingEngine::new(), options);

    let mut loaded = Vec::new();
    let result = merger
        .merge_with_progress(&documents, &SelectionStore::new(), |event| {
            if let MergeProgress::Loaded { document, .. } = event {
                loaded.push(document);
            }
        })
        .await
        .unwrap();

    let expected: Vec<String> = (1..=8).map(|i| format!("D{i}-Page-1")).collect();
    assert_eq!(fake_pages(&result.artifact.bytes), expected);

    let expected_ids: Vec<DocumentId> = documents.iter().map(|d| d.id.clone()).collect();
    assert_eq!(loaded, expected_ids);
}
