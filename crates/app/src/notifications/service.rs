//! Notifications service.

use sphere_core::{
    editor::{CommitOutcome, OptimisticEditor, RowState},
    error::{EditError, FormError, GatewayError},
    form::{FormFlow, FormState},
    store::RemoteCollectionStore,
};

use super::{
    models::{NewNotification, Notification, NotificationId},
    repository::NotificationsRepository,
};

#[derive(Debug)]
pub struct NotificationsService<R: NotificationsRepository> {
    repository: R,
    store: RemoteCollectionStore<Notification>,
    editor: OptimisticEditor<Notification>,
    create_form: FormFlow<NewNotification>,
}

impl<R: NotificationsRepository> NotificationsService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        let mut store = RemoteCollectionStore::new();
        store.declare_filter("description", |n: &Notification| n.description.clone());
        store.declare_exact_filter("id", |n: &Notification| n.id.to_string());

        Self {
            repository,
            store,
            editor: OptimisticEditor::new(),
            create_form: FormFlow::new(),
        }
    }

    /// Fetch all notifications, replacing local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the local list is left empty.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        self.store.load(&self.repository).await
    }

    /// All notifications in fetch order.
    pub fn notifications(&self) -> &[Notification] {
        self.store.items()
    }

    /// The filtered projection.
    pub fn view(&self) -> Vec<&Notification> {
        self.store.view()
    }

    /// Search by description substring.
    pub fn search(&mut self, term: impl Into<String>) {
        self.store.set_filter("description", term);
    }

    /// Admin lookup by exact id.
    pub fn filter_id(&mut self, id: impl Into<String>) {
        self.store.set_filter("id", id);
    }

    /// Edit state of one admin row.
    pub fn row_state(&self, id: NotificationId) -> RowState {
        self.editor.row_state(id)
    }

    /// Mark a row editable.
    pub fn begin_edit(&mut self, id: NotificationId) -> bool {
        self.editor.begin_edit(&self.store, id)
    }

    /// Stage a field-level change on an editable row.
    ///
    /// # Errors
    ///
    /// See [`OptimisticEditor::stage`].
    pub fn stage(
        &mut self,
        id: NotificationId,
        mutate: impl FnOnce(&mut Notification),
    ) -> Result<(), EditError> {
        self.editor.stage(&mut self.store, id, mutate)
    }

    /// Persist a staged row.
    ///
    /// # Errors
    ///
    /// See [`OptimisticEditor::commit`].
    pub async fn commit(&mut self, id: NotificationId) -> Result<CommitOutcome, EditError> {
        self.editor
            .commit(&mut self.store, &self.repository, id)
            .await
    }

    /// Delete a notification remotely, then locally on success.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; local state is untouched.
    pub async fn delete(&mut self, id: NotificationId) -> Result<(), GatewayError> {
        self.editor
            .delete(&mut self.store, &self.repository, id)
            .await
    }

    /// The "add notification" draft.
    pub fn draft(&self) -> &NewNotification {
        self.create_form.draft()
    }

    /// State of the "add notification" form.
    pub fn form_state(&self) -> FormState {
        self.create_form.state()
    }

    /// Mutate the "add notification" draft.
    pub fn edit_draft(&mut self, mutate: impl FnOnce(&mut NewNotification)) {
        self.create_form.update(mutate);
    }

    /// Submit the draft; on success the draft resets and the list reloads.
    ///
    /// # Errors
    ///
    /// Returns the submission failure; the draft is preserved.
    pub async fn create(&mut self) -> Result<Notification, FormError> {
        let created = self.create_form.submit(&self.repository).await?;
        self.load().await.ok();
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use jiff::Timestamp;
    use mockall::mock;
    use sphere_core::{form::SubmitTarget, gateway::CollectionGateway};
    use testresult::TestResult;

    use super::*;

    mock! {
        pub NotificationsRepo {}

        #[async_trait]
        impl CollectionGateway<Notification> for NotificationsRepo {
            async fn list(&self) -> Result<Vec<Notification>, GatewayError>;
            async fn update(&self, record: Notification) -> Result<Notification, GatewayError>;
            async fn delete(&self, id: NotificationId) -> Result<(), GatewayError>;
        }

        #[async_trait]
        impl SubmitTarget<NewNotification, Notification> for NotificationsRepo {
            async fn submit(&self, draft: NewNotification) -> Result<Notification, GatewayError>;
        }
    }

    impl NotificationsRepository for MockNotificationsRepo {}

    fn notification(id: i64, description: &str) -> Notification {
        Notification {
            id: NotificationId::from_raw(id),
            description: description.to_string(),
            image_url: format!("https://img.example/note-{id}.jpg"),
            timeline: 60,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn description_search_narrows_the_view() -> TestResult {
        let mut repo = MockNotificationsRepo::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                notification(1, "weekend sale"),
                notification(2, "new arrivals"),
                notification(3, "holiday sale"),
            ])
        });

        let mut service = NotificationsService::new(repo);
        service.load().await?;

        service.search("sale");

        let ids: Vec<i64> = service.view().iter().map(|n| n.id.into_raw()).collect();
        assert_eq!(ids, vec![1, 3], "matches in fetch order");

        Ok(())
    }

    #[tokio::test]
    async fn create_uses_the_default_timeline() -> TestResult {
        let mut repo = MockNotificationsRepo::new();
        repo.expect_list().returning(|| Ok(Vec::new()));
        repo.expect_submit()
            .times(1)
            .withf(|draft| draft.timeline == 60)
            .returning(|draft| {
                Ok(Notification {
                    id: NotificationId::from_raw(9),
                    description: draft.description,
                    image_url: draft.image_url,
                    timeline: draft.timeline,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut service = NotificationsService::new(repo);
        service.edit_draft(|d| d.description = "flash sale".to_string());

        let created = service.create().await?;

        assert_eq!(created.id.into_raw(), 9, "server assigns the id");
        assert_eq!(service.draft(), &NewNotification::default(), "draft reset");

        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_row() -> TestResult {
        let mut repo = MockNotificationsRepo::new();
        repo.expect_list()
            .returning(|| Ok(vec![notification(1, "weekend sale")]));
        repo.expect_delete().times(1).returning(|_| {
            Err(GatewayError::Rejected {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let mut service = NotificationsService::new(repo);
        service.load().await?;

        let result = service.delete(NotificationId::from_raw(1)).await;

        assert!(result.is_err(), "failure is surfaced");
        assert_eq!(service.notifications().len(), 1, "row kept on failure");

        Ok(())
    }
}
