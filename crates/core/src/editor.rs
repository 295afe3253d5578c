//! Optimistic per-row editing over a [`RemoteCollectionStore`].
//!
//! Each row carries an explicit state machine rather than a boolean flag,
//! and every edit snapshots the last-known-server record so a failed commit
//! can replay it. Snapshot-revert is the default policy; keep-local is the
//! explicit opt-in for callers that accept local/server divergence until
//! the next full load.
//!
//! [`RemoteCollectionStore`]: crate::store::RemoteCollectionStore

use rustc_hash::FxHashMap;

use crate::{
    entity::Entity,
    error::{EditError, GatewayError},
    gateway::CollectionGateway,
    store::RemoteCollectionStore,
};

/// Lifecycle of one row under the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    /// Read-only; no edit in progress.
    #[default]
    Viewing,

    /// Locally mutable; a server snapshot is held for revert.
    Editing,

    /// A commit is in flight. Further staging is refused.
    Saving,
}

/// What happens to staged local changes when a commit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackPolicy {
    /// Replay the last-known-server snapshot. The default.
    #[default]
    Revert,

    /// Leave the optimistic value in place; local and server state diverge
    /// until the next full load.
    KeepLocal,
}

/// Terminal state of one commit.
#[derive(Debug)]
pub enum CommitOutcome {
    /// The server accepted the record; local state holds the server's copy.
    Confirmed,

    /// The commit failed and the snapshot was replayed.
    FailedReverted(GatewayError),

    /// The commit failed and the optimistic value was kept.
    FailedKeptLocal(GatewayError),
}

#[derive(Debug)]
struct RowSlot<T> {
    state: RowState,
    snapshot: T,
}

/// Field-level optimistic editing, one state machine per row.
///
/// Rows edit independently; holding several rows in `Editing` at once is
/// supported. The editor owns no records itself — it operates on the
/// store's contents and keys everything by entity id.
#[derive(Debug)]
pub struct OptimisticEditor<T: Entity> {
    policy: RollbackPolicy,
    rows: FxHashMap<T::Id, RowSlot<T>>,
}

impl<T: Entity> Default for OptimisticEditor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> OptimisticEditor<T> {
    /// An editor with the snapshot-revert policy.
    pub fn new() -> Self {
        Self::with_policy(RollbackPolicy::default())
    }

    /// An editor with the given rollback policy.
    pub fn with_policy(policy: RollbackPolicy) -> Self {
        Self {
            policy,
            rows: FxHashMap::default(),
        }
    }

    /// Current state of a row. Rows the editor has never touched are
    /// `Viewing`.
    pub fn row_state(&self, id: T::Id) -> RowState {
        self.rows.get(&id).map_or(RowState::Viewing, |row| row.state)
    }

    /// Mark a row editable and snapshot its last-known-server record.
    ///
    /// Returns `false` when the record is absent or the row is already
    /// editing or saving.
    pub fn begin_edit(&mut self, store: &RemoteCollectionStore<T>, id: T::Id) -> bool {
        if self.row_state(id) != RowState::Viewing {
            return false;
        }
        let Some(record) = store.get(id) else {
            return false;
        };
        self.rows.insert(
            id,
            RowSlot {
                state: RowState::Editing,
                snapshot: record.clone(),
            },
        );
        true
    }

    /// Apply a field-level change to the local record immediately.
    ///
    /// No validation happens at this layer.
    ///
    /// # Errors
    ///
    /// [`EditError::NotEditing`] when the row is not in `Editing`;
    /// [`EditError::Missing`] when the record left the collection since the
    /// edit began.
    pub fn stage(
        &mut self,
        store: &mut RemoteCollectionStore<T>,
        id: T::Id,
        mutate: impl FnOnce(&mut T),
    ) -> Result<(), EditError> {
        if self.row_state(id) != RowState::Editing {
            return Err(EditError::NotEditing);
        }
        let record = store.get_mut(id).ok_or(EditError::Missing)?;
        mutate(record);
        Ok(())
    }

    /// Persist the full updated record.
    ///
    /// The row returns to `Viewing` regardless of outcome. On success the
    /// server's copy is merged back; on failure the rollback policy decides
    /// whether the snapshot is replayed or the optimistic value stays.
    ///
    /// # Errors
    ///
    /// [`EditError::NotEditing`] when the row is not in `Editing`;
    /// [`EditError::Missing`] when the record left the collection.
    pub async fn commit(
        &mut self,
        store: &mut RemoteCollectionStore<T>,
        gateway: &dyn CollectionGateway<T>,
        id: T::Id,
    ) -> Result<CommitOutcome, EditError> {
        if self.row_state(id) != RowState::Editing {
            return Err(EditError::NotEditing);
        }
        let Some(record) = store.get(id).cloned() else {
            self.rows.remove(&id);
            return Err(EditError::Missing);
        };

        if let Some(row) = self.rows.get_mut(&id) {
            row.state = RowState::Saving;
        }
        let result = gateway.update(record).await;

        // Read-only again no matter how the request went.
        let Some(row) = self.rows.remove(&id) else {
            return Err(EditError::NotEditing);
        };

        match result {
            Ok(updated) => {
                store.apply_update(updated);
                Ok(CommitOutcome::Confirmed)
            }
            Err(error) => {
                tracing::warn!(error = %error, "commit failed");
                match self.policy {
                    RollbackPolicy::Revert => {
                        store.apply_update(row.snapshot);
                        Ok(CommitOutcome::FailedReverted(error))
                    }
                    RollbackPolicy::KeepLocal => Ok(CommitOutcome::FailedKeptLocal(error)),
                }
            }
        }
    }

    /// Leave edit mode without saving.
    ///
    /// Staged changes are handled by the rollback policy, exactly as a
    /// failed commit would handle them.
    pub fn abandon(&mut self, store: &mut RemoteCollectionStore<T>, id: T::Id) {
        let Some(row) = self.rows.remove(&id) else {
            return;
        };
        if row.state == RowState::Editing && self.policy == RollbackPolicy::Revert {
            store.apply_update(row.snapshot);
        }
    }

    /// Remove the record remotely, then locally.
    ///
    /// Local state changes if and only if the remote delete succeeds.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched in that case.
    pub async fn delete(
        &mut self,
        store: &mut RemoteCollectionStore<T>,
        gateway: &dyn CollectionGateway<T>,
        id: T::Id,
    ) -> Result<(), GatewayError> {
        gateway.delete(id).await.inspect_err(|error| {
            tracing::warn!(error = %error, "delete failed");
        })?;
        store.remove(id);
        self.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::fixtures::{InMemoryGateway, SampleRecord, sample_records};

    use super::*;

    async fn loaded(
        gateway: &InMemoryGateway<SampleRecord>,
    ) -> RemoteCollectionStore<SampleRecord> {
        let mut store = RemoteCollectionStore::new();
        store
            .load(gateway)
            .await
            .expect("fixture gateway should list");
        store
    }

    #[tokio::test]
    async fn rows_edit_independently() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        assert!(editor.begin_edit(&store, 1), "row 1 becomes editable");
        assert!(editor.begin_edit(&store, 2), "row 2 edits concurrently");
        assert_eq!(editor.row_state(1), RowState::Editing);
        assert_eq!(editor.row_state(2), RowState::Editing);
        assert_eq!(editor.row_state(3), RowState::Viewing);

        Ok(())
    }

    #[tokio::test]
    async fn begin_edit_refuses_unknown_and_busy_rows() {
        let gateway = InMemoryGateway::new(sample_records());
        let store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        assert!(!editor.begin_edit(&store, 999), "unknown id is refused");
        assert!(editor.begin_edit(&store, 1), "first edit is accepted");
        assert!(!editor.begin_edit(&store, 1), "double edit is refused");
    }

    #[tokio::test]
    async fn stage_mutates_local_record_immediately() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        editor.begin_edit(&store, 1);
        editor.stage(&mut store, 1, |r| r.name = "edited".to_string())?;

        assert_eq!(
            store.get(1).map(|r| r.name.as_str()),
            Some("edited"),
            "local state reflects the staged value before any commit"
        );
        assert_eq!(
            gateway.records().first().map(|r| r.name.clone()),
            Some("disco sphere".to_string()),
            "gateway state is untouched until commit"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stage_requires_editing_state() {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        let result = editor.stage(&mut store, 1, |r| r.rating = 2);

        assert_eq!(result, Err(EditError::NotEditing), "no edit was begun");
    }

    #[tokio::test]
    async fn commit_persists_and_returns_row_to_viewing() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        editor.begin_edit(&store, 1);
        editor.stage(&mut store, 1, |r| r.name = "edited".to_string())?;
        let outcome = editor.commit(&mut store, &gateway, 1).await?;

        assert!(matches!(outcome, CommitOutcome::Confirmed), "commit landed");
        assert_eq!(editor.row_state(1), RowState::Viewing);
        assert_eq!(
            gateway.records().first().map(|r| r.name.clone()),
            Some("edited".to_string()),
            "gateway received the full updated record"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_commit_reverts_under_default_policy() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        editor.begin_edit(&store, 1);
        editor.stage(&mut store, 1, |r| r.name = "edited".to_string())?;
        gateway.set_unavailable(true);

        let outcome = editor.commit(&mut store, &gateway, 1).await?;

        assert!(
            matches!(outcome, CommitOutcome::FailedReverted(_)),
            "default policy replays the snapshot"
        );
        assert_eq!(
            store.get(1).map(|r| r.name.as_str()),
            Some("disco sphere"),
            "local state holds the server snapshot again"
        );
        assert_eq!(editor.row_state(1), RowState::Viewing, "read-only either way");

        Ok(())
    }

    #[tokio::test]
    async fn failed_commit_keeps_optimistic_value_when_asked() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::with_policy(RollbackPolicy::KeepLocal);

        editor.begin_edit(&store, 1);
        editor.stage(&mut store, 1, |r| r.name = "edited".to_string())?;
        gateway.set_unavailable(true);

        let outcome = editor.commit(&mut store, &gateway, 1).await?;

        assert!(
            matches!(outcome, CommitOutcome::FailedKeptLocal(_)),
            "keep-local preserves the divergence"
        );
        assert_eq!(
            store.get(1).map(|r| r.name.as_str()),
            Some("edited"),
            "local field still holds the staged value"
        );
        assert_eq!(
            gateway.records().first().map(|r| r.name.clone()),
            Some("disco sphere".to_string()),
            "persisted state is unchanged"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_locally_only_on_success() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        editor.delete(&mut store, &gateway, 1).await?;
        assert!(store.get(1).is_none(), "success removes the row locally");

        gateway.set_unavailable(true);
        let result = editor.delete(&mut store, &gateway, 2).await;

        assert!(result.is_err(), "failure is surfaced");
        assert!(store.get(2).is_some(), "failure leaves local state untouched");

        Ok(())
    }

    #[tokio::test]
    async fn abandon_reverts_staged_changes() -> TestResult {
        let gateway = InMemoryGateway::new(sample_records());
        let mut store = loaded(&gateway).await;
        let mut editor = OptimisticEditor::new();

        editor.begin_edit(&store, 1);
        editor.stage(&mut store, 1, |r| r.name = "edited".to_string())?;
        editor.abandon(&mut store, 1);

        assert_eq!(
            store.get(1).map(|r| r.name.as_str()),
            Some("disco sphere"),
            "abandon replays the snapshot under the default policy"
        );
        assert_eq!(editor.row_state(1), RowState::Viewing);

        Ok(())
    }
}
