//! End-to-end exercises of the store, editor and form working together,
//! the way an admin table view drives them.

use sphere_core::{
    editor::{CommitOutcome, OptimisticEditor, RollbackPolicy, RowState},
    fixtures::{InMemoryGateway, SampleRecord, sample_records},
    store::{RemoteCollectionStore, Sort, SortDirection},
};
use testresult::TestResult;

#[tokio::test]
async fn load_filter_sort_edit_commit() -> TestResult {
    let gateway = InMemoryGateway::new(sample_records());
    let mut store: RemoteCollectionStore<SampleRecord> = RemoteCollectionStore::new();
    store.declare_filter("name", |r| r.name.clone());
    let mut editor = OptimisticEditor::new();

    store.load(&gateway).await?;
    store.set_filter("name", "sphere");
    store.set_sort(Sort::new(
        |a, b| a.rating.cmp(&b.rating),
        SortDirection::Descending,
    ));

    let view: Vec<i64> = store.view().iter().map(|r| r.id).collect();
    assert_eq!(view, vec![1, 2, 5], "filtered then rating-descending");

    // Edit one visible row and commit it.
    assert!(editor.begin_edit(&store, 5), "row becomes editable");
    editor.stage(&mut store, 5, |r| r.rating = 4)?;
    let outcome = editor.commit(&mut store, &gateway, 5).await?;

    assert!(matches!(outcome, CommitOutcome::Confirmed), "commit landed");
    assert_eq!(editor.row_state(5), RowState::Viewing, "row read-only again");

    // The projection reflects the new rating without being re-declared.
    let view: Vec<i64> = store.view().iter().map(|r| r.id).collect();
    assert_eq!(view, vec![1, 5, 2], "sort re-derives over the edited value");

    // And the gateway saw the full record.
    assert_eq!(
        gateway.records().iter().find(|r| r.id == 5).map(|r| r.rating),
        Some(4),
        "persisted state matches"
    );

    Ok(())
}

#[tokio::test]
async fn outage_mid_session_empties_then_recovers() -> TestResult {
    let gateway = InMemoryGateway::new(sample_records());
    let mut store: RemoteCollectionStore<SampleRecord> = RemoteCollectionStore::new();

    store.load(&gateway).await?;
    assert_eq!(store.len(), 10, "first load lands");

    gateway.set_unavailable(true);
    assert!(store.load(&gateway).await.is_err(), "outage surfaces");
    assert!(store.is_empty(), "failed load leaves the collection empty");

    gateway.set_unavailable(false);
    store.load(&gateway).await?;
    assert_eq!(store.len(), 10, "next load replaces wholesale");

    Ok(())
}

#[tokio::test]
async fn divergence_is_opt_in_per_policy() -> TestResult {
    let gateway = InMemoryGateway::new(sample_records());
    let mut store: RemoteCollectionStore<SampleRecord> = RemoteCollectionStore::new();
    let mut keep_local = OptimisticEditor::with_policy(RollbackPolicy::KeepLocal);

    store.load(&gateway).await?;

    keep_local.begin_edit(&store, 1);
    keep_local.stage(&mut store, 1, |r| r.name = "renamed offline".to_string())?;
    gateway.set_unavailable(true);
    let outcome = keep_local.commit(&mut store, &gateway, 1).await?;

    assert!(
        matches!(outcome, CommitOutcome::FailedKeptLocal(_)),
        "divergence is reported, not hidden"
    );
    assert_eq!(
        store.get(1).map(|r| r.name.as_str()),
        Some("renamed offline"),
        "local keeps the optimistic value"
    );

    // A later successful load reconciles the divergence.
    gateway.set_unavailable(false);
    store.load(&gateway).await?;
    assert_eq!(
        store.get(1).map(|r| r.name.as_str()),
        Some("disco sphere"),
        "full reload restores the server's truth"
    );

    Ok(())
}
