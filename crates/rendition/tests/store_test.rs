//! Integration tests for file-backed stores and prompts.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use rendition::{
    AcceptedTranslation, DiffOptions, FilePrompt, JsonlStore, PromptStore, ReviewSession,
    SentenceList, SentenceSource, TextFileStore, TranslationStore,
};

#[test]
fn test_text_store_appends_readable_pairs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("translation.txt");
    let store = TextFileStore::new(&path);

    store
        .record(&AcceptedTranslation::new("The big red fox.", "A grande raposa vermelha."))
        .unwrap();
    store
        .record(&AcceptedTranslation::new("Line one\nline two", "Linha um\nlinha dois"))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(
        "Original: The big red fox.\nTranslation: A grande raposa vermelha.\n\n"
    ));

    let entries = store.entries().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].original, "Line one line two");
    assert_eq!(entries[1].translation, "Linha um linha dois");
    assert!(store.contains("The big red fox.").unwrap());
}

#[test]
fn test_text_store_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = TextFileStore::new(dir.path().join("absent.txt"));

    assert!(store.entries().unwrap().is_empty());
    assert_eq!(store.context_block().unwrap(), "");
}

#[test]
fn test_text_store_rejects_blank_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translation.txt");
    let store = TextFileStore::new(&path);

    let err = store
        .record(&AcceptedTranslation::new("Hello", "  "))
        .unwrap_err();
    assert_eq!(err.to_string(), "Persistence error: Missing data");
    assert!(!path.exists());
}

#[test]
fn test_jsonl_store_keeps_timestamps() {
    let dir = TempDir::new().unwrap();
    let store = JsonlStore::new(dir.path().join("accepted.jsonl"));

    let entry = AcceptedTranslation::new("Hello", "Olá");
    store.record(&entry).unwrap();

    let entries = store.entries().unwrap();
    assert_eq!(entries, vec![entry]);
}

#[test]
fn test_jsonl_store_reports_bad_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accepted.jsonl");
    fs::write(&path, "{\"original\":\"a\",\"translation\":\"b\"}\nnot json\n").unwrap();

    let err = JsonlStore::new(&path).entries().unwrap_err();
    assert!(err.to_string().contains("line 2"), "{}", err);
}

#[tokio::test]
async fn test_session_commit_lands_in_text_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translation.txt");
    let store = Arc::new(TextFileStore::new(&path));

    let mut session = ReviewSession::new(
        "The cat sat",
        ["O gato sentou", "O gato sentou-se"],
        store.clone(),
        DiffOptions::default(),
    );
    session.commit_as_is(1).unwrap().outcome().await.unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Original: The cat sat\nTranslation: O gato sentou-se\n\n");

    let sentences = SentenceList::new(["The cat sat", "The dog ran"]).with_store(store);
    assert_eq!(sentences.current().unwrap().unwrap().completed, 1);
}

const WRITERS: usize = 16;
const RECORDS_PER_WRITER: usize = 200;

/// Hammer one store from many threads and return what it read back.
fn record_concurrently(store: Arc<dyn TranslationStore>) -> Vec<AcceptedTranslation> {
    std::thread::scope(|scope| {
        for writer in 0..WRITERS {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for i in 0..RECORDS_PER_WRITER {
                    let entry = AcceptedTranslation::new(
                        format!("source {writer}-{i} {}", "x".repeat(i % 50)),
                        format!("target {writer}-{i} {}", "y".repeat(i % 50)),
                    );
                    store.record(&entry).unwrap();
                }
            });
        }
    });
    store.entries().unwrap()
}

fn assert_pairs_intact(entries: &[AcceptedTranslation]) {
    assert_eq!(entries.len(), WRITERS * RECORDS_PER_WRITER);
    for entry in entries {
        let original = entry.original.strip_prefix("source ").unwrap();
        let translation = entry.translation.strip_prefix("target ").unwrap();
        assert_eq!(
            original.replace('x', "y"),
            translation,
            "mismatched pair: {entry:?}"
        );
    }
}

#[test]
fn test_jsonl_store_concurrent_writers_keep_lines_whole() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translations.jsonl");
    let entries = record_concurrently(Arc::new(JsonlStore::new(&path)));

    assert_pairs_intact(&entries);
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), WRITERS * RECORDS_PER_WRITER);
}

#[test]
fn test_text_store_concurrent_writers_keep_pairs_together() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("translation.txt");
    let entries = record_concurrently(Arc::new(TextFileStore::new(&path)));

    assert_pairs_intact(&entries);
    let content = fs::read_to_string(&path).unwrap();
    let originals = content.lines().filter(|l| l.starts_with("Original: ")).count();
    assert_eq!(originals, WRITERS * RECORDS_PER_WRITER);
}

#[test]
fn test_file_prompt_round_trip() {
    let dir = TempDir::new().unwrap();
    let prompt = FilePrompt::new(dir.path().join("config").join("prompt.txt"));

    assert_eq!(prompt.get().unwrap(), "");
    prompt.set("Use European Portuguese.").unwrap();
    assert_eq!(prompt.get().unwrap(), "Use European Portuguese.");
}

#[test]
fn test_sentence_list_loads_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sentences.txt");
    fs::write(&path, "First sentence.\n\n   \nSecond sentence.\n").unwrap();

    let list = SentenceList::load(&path).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.current().unwrap().unwrap().sentence, "First sentence.");
}
