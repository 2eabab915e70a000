//! End-to-end tests for review sessions.

use std::sync::Arc;

use rendition::{
    DiffOptions, MemoryStore, MockProvider, ModelSelector, Rendition, RenditionError,
    ReviewSession, ReviewState, SegmentKind, TranslationStore,
};

const SOURCE: &str = "The cat sat on the mat";

fn session_with(store: Arc<MemoryStore>, candidates: &[&str]) -> ReviewSession {
    ReviewSession::new(
        SOURCE,
        candidates.iter().copied(),
        store,
        DiffOptions::default(),
    )
}

#[tokio::test]
async fn test_commit_unedited_candidate() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(
        Arc::clone(&store),
        &["The cat sat on the mat", "The dog sat on the mat"],
    );

    let kinds: Vec<_> = session.item(1).unwrap().segments().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SegmentKind::Equal,
            SegmentKind::Deleted,
            SegmentKind::Inserted,
            SegmentKind::Equal
        ]
    );

    let pending = session.commit_as_is(1).unwrap();
    assert_eq!(pending.entry().translation, "The dog sat on the mat");

    // State is already updated before the save is observed.
    let item = session.item(1).unwrap();
    assert!(item.is_committed());
    assert_eq!(item.text(), "The dog sat on the mat");

    pending.outcome().await.unwrap();
    let entries = store.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].original, SOURCE);
    assert_eq!(entries[0].translation, "The dog sat on the mat");
}

#[tokio::test]
async fn test_edit_then_commit_matches_direct_commit() {
    let edited = "The dog lay on the rug";

    let store_a = Arc::new(MemoryStore::new());
    let mut via_edit = session_with(Arc::clone(&store_a), &["The dog sat on the mat"]);
    assert_eq!(via_edit.start_edit(0).unwrap(), "The dog sat on the mat");
    via_edit.update_buffer(0, edited).unwrap();
    via_edit.commit_as_is(0).unwrap().outcome().await.unwrap();

    let store_b = Arc::new(MemoryStore::new());
    let mut direct = session_with(Arc::clone(&store_b), &["The dog sat on the mat"]);
    direct.commit(0, edited).unwrap().outcome().await.unwrap();

    let a = via_edit.item(0).unwrap();
    let b = direct.item(0).unwrap();
    assert_eq!(a.text(), b.text());
    assert_eq!(a.state(), b.state());
    assert_eq!(a.segments(), b.segments());
    assert_eq!(a.accepted(), Some(edited));

    let pairs = |store: &MemoryStore| -> Vec<(String, String)> {
        store
            .entries()
            .unwrap()
            .into_iter()
            .map(|e| (e.original, e.translation))
            .collect()
    };
    assert_eq!(pairs(&store_a), pairs(&store_b));
}

#[tokio::test]
async fn test_commit_recomputes_diff_for_new_text() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(store, &["The dog sat on the mat"]);

    let before = session.item(0).unwrap().segments().to_vec();
    session.commit(0, SOURCE).unwrap();

    let item = session.item(0).unwrap();
    assert!(!item.is_diff_cached());
    assert_ne!(item.segments(), before.as_slice());
    assert_eq!(item.segments().len(), 1);
    assert_eq!(item.segments()[0].kind, SegmentKind::Equal);
}

#[tokio::test]
async fn test_failed_save_does_not_roll_back() {
    let store = Arc::new(MemoryStore::failing());
    let mut session = session_with(Arc::clone(&store), &["The dog sat on the mat"]);

    session.start_edit(0).unwrap();
    session.update_buffer(0, "The dog sat").unwrap();
    let pending = session.commit_as_is(0).unwrap();

    let err = pending.outcome().await.unwrap_err();
    assert!(matches!(err, RenditionError::Persistence(_)));

    let item = session.item(0).unwrap();
    assert_eq!(item.text(), "The dog sat");
    assert_eq!(item.state(), &ReviewState::Viewing);
    assert!(item.is_committed());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_repeated_commits_each_persist() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(Arc::clone(&store), &["A", "B"]);

    session.commit(0, "first").unwrap().outcome().await.unwrap();
    session.commit(0, "second").unwrap().outcome().await.unwrap();
    session.commit_as_is(1).unwrap().outcome().await.unwrap();

    assert_eq!(session.item(0).unwrap().commit_count(), 2);
    assert_eq!(session.item(0).unwrap().text(), "second");
    assert_eq!(session.accepted(), vec![(0, "second"), (1, "B")]);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_empty_commit_is_kept_locally_but_rejected_by_store() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(Arc::clone(&store), &["A"]);

    let err = session.commit(0, "").unwrap().outcome().await.unwrap_err();
    assert_eq!(err.to_string(), "Persistence error: Missing data");
    assert_eq!(session.item(0).unwrap().text(), "");
    assert!(store.is_empty());
}

#[test]
fn test_commit_outside_runtime() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(Arc::clone(&store), &["A"]);
    let pending = session.commit_as_is(0).unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    runtime.block_on(pending.outcome()).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn test_empty_candidate_list() {
    let rendition = Rendition::new(
        Arc::new(MockProvider::with_candidates(Vec::<String>::new())),
        Arc::new(MemoryStore::new()),
    );
    let mut session = rendition.review(SOURCE, vec![], ModelSelector::Primary).unwrap();

    assert!(session.is_empty());
    assert!(session.views().is_empty());
    assert!(matches!(
        session.commit_as_is(0),
        Err(RenditionError::ItemNotFound { index: 0, len: 0 })
    ));
}

#[test]
fn test_views_serialize_state() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session_with(store, &["The dog sat on the mat", "A cat"]);
    session.start_edit(1).unwrap();

    let views = serde_json::to_value(session.views()).unwrap();
    assert_eq!(views[0]["state"], "viewing");
    assert_eq!(views[1]["state"], "editing");
    assert_eq!(views[1]["buffer"], "A cat");
    assert!(views[0]["html"]
        .as_str()
        .unwrap()
        .contains("<span class=\"diff-insert\">dog</span>"));
}
