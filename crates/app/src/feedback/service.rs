//! Feedback service.

use sphere_core::{
    editor::{CommitOutcome, OptimisticEditor},
    error::{EditError, FormError, GatewayError, ValidationErrors},
    form::FormFlow,
    store::RemoteCollectionStore,
};
use thiserror::Error;

use crate::session::Session;

use super::{
    models::{Feedback, FeedbackId, NewFeedback},
    repository::FeedbackRepository,
};

/// How many comments the wall shows before "view more".
const INITIAL_WINDOW: usize = 3;

/// Failures from the comment wall.
#[derive(Debug, Error)]
pub enum FeedbackServiceError {
    /// Editing or deleting someone else's comment; nothing was sent.
    #[error("only the comment's author may change it")]
    NotOwner,

    /// The comment id is not in the loaded wall.
    #[error("comment not found")]
    NotFound,

    /// The acting session is anonymous; nothing was sent.
    #[error("log in to comment")]
    NotAuthenticated,

    /// The draft failed its schema; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// A local edit-state misuse.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The request reached the backend and failed there.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug)]
pub struct FeedbackService<R: FeedbackRepository> {
    repository: R,
    session: Option<Session>,
    store: RemoteCollectionStore<Feedback>,
    editor: OptimisticEditor<Feedback>,
    comment_form: FormFlow<NewFeedback>,
    show_all: bool,
}

impl<R: FeedbackRepository> FeedbackService<R> {
    /// A service acting on behalf of `session`, or read-only with `None`.
    #[must_use]
    pub fn new(repository: R, session: Option<Session>) -> Self {
        Self {
            repository,
            session,
            store: RemoteCollectionStore::new(),
            editor: OptimisticEditor::new(),
            comment_form: FormFlow::new(),
            show_all: false,
        }
    }

    /// Fetch the comment wall, replacing local state wholesale.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the local wall is left empty.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        self.store.load(&self.repository).await
    }

    /// Every comment in fetch order.
    pub fn comments(&self) -> &[Feedback] {
        self.store.items()
    }

    /// The windowed wall: the first few comments until "view more".
    pub fn displayed(&self) -> &[Feedback] {
        let items = self.store.items();
        if self.show_all {
            items
        } else {
            items.get(..items.len().min(INITIAL_WINDOW)).unwrap_or(items)
        }
    }

    /// Expand the wall to every comment.
    pub fn view_more(&mut self) {
        self.show_all = true;
    }

    /// The comment draft.
    pub fn draft(&self) -> &NewFeedback {
        self.comment_form.draft()
    }

    /// Mutate the comment draft.
    pub fn edit_draft(&mut self, mutate: impl FnOnce(&mut NewFeedback)) {
        self.comment_form.update(mutate);
    }

    /// Post the drafted comment and reload the wall.
    ///
    /// # Errors
    ///
    /// [`FeedbackServiceError::NotAuthenticated`] locally, a blank-comment
    /// validation failure, or the gateway failure.
    pub async fn post(&mut self) -> Result<Feedback, FeedbackServiceError> {
        if self.session.is_none() {
            return Err(FeedbackServiceError::NotAuthenticated);
        }
        let created = self
            .comment_form
            .submit(&self.repository)
            .await
            .map_err(|error| match error {
                FormError::Invalid(errors) => FeedbackServiceError::Invalid(errors),
                FormError::Gateway(error) => FeedbackServiceError::Gateway(error),
            })?;
        self.load().await.ok();
        Ok(created)
    }

    /// Replace the body of one's own comment.
    ///
    /// Ownership is checked locally; editing someone else's comment never
    /// produces a request.
    ///
    /// # Errors
    ///
    /// [`FeedbackServiceError::NotOwner`] locally, or the commit failure.
    pub async fn edit(
        &mut self,
        id: FeedbackId,
        comment: impl Into<String>,
    ) -> Result<CommitOutcome, FeedbackServiceError> {
        self.check_owner(id)?;

        if !self.editor.begin_edit(&self.store, id) {
            return Err(FeedbackServiceError::Edit(EditError::NotEditing));
        }
        let comment = comment.into();
        self.editor
            .stage(&mut self.store, id, |f| f.comment = comment)?;
        let outcome = self
            .editor
            .commit(&mut self.store, &self.repository, id)
            .await?;
        Ok(outcome)
    }

    /// Delete one's own comment.
    ///
    /// # Errors
    ///
    /// [`FeedbackServiceError::NotOwner`] locally, or the gateway failure
    /// with local state untouched.
    pub async fn delete(&mut self, id: FeedbackId) -> Result<(), FeedbackServiceError> {
        self.check_owner(id)?;
        self.editor
            .delete(&mut self.store, &self.repository, id)
            .await?;
        Ok(())
    }

    fn check_owner(&self, id: FeedbackId) -> Result<(), FeedbackServiceError> {
        let session = self
            .session
            .as_ref()
            .ok_or(FeedbackServiceError::NotAuthenticated)?;
        let comment = self
            .store
            .get(id)
            .ok_or(FeedbackServiceError::NotFound)?;
        if comment.user_id != session.user.id {
            return Err(FeedbackServiceError::NotOwner);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use sphere_core::{form::SubmitTarget, gateway::CollectionGateway};
    use testresult::TestResult;

    use crate::users::models::{Role, User, UserId};

    use super::*;

    mock! {
        pub FeedbackRepo {}

        #[async_trait]
        impl CollectionGateway<Feedback> for FeedbackRepo {
            async fn list(&self) -> Result<Vec<Feedback>, GatewayError>;
            async fn update(&self, record: Feedback) -> Result<Feedback, GatewayError>;
            async fn delete(&self, id: FeedbackId) -> Result<(), GatewayError>;
        }

        #[async_trait]
        impl SubmitTarget<NewFeedback, Feedback> for FeedbackRepo {
            async fn submit(&self, draft: NewFeedback) -> Result<Feedback, GatewayError>;
        }
    }

    impl FeedbackRepository for MockFeedbackRepo {}

    fn comment(id: i64, user: i64, body: &str) -> Feedback {
        Feedback {
            id: FeedbackId::from_raw(id),
            user_id: UserId::from_raw(user),
            username: format!("user{user}"),
            comment: body.to_string(),
        }
    }

    fn session_for(user: i64) -> Session {
        Session {
            token: "opaque-token".to_string(),
            user: User {
                id: UserId::from_raw(user),
                username: format!("user{user}"),
                email: format!("user{user}@example.com"),
                phone: "0700000000".to_string(),
                role: Role::Customer,
                merit_points: 0,
                is_active: true,
            },
        }
    }

    fn wall() -> Vec<Feedback> {
        vec![
            comment(1, 7, "great service"),
            comment(2, 8, "fast delivery"),
            comment(3, 7, "will buy again"),
            comment(4, 9, "lovely packaging"),
        ]
    }

    #[tokio::test]
    async fn the_wall_windows_to_three_until_view_more() -> TestResult {
        let mut repo = MockFeedbackRepo::new();
        repo.expect_list().returning(|| Ok(wall()));

        let mut service = FeedbackService::new(repo, None);
        service.load().await?;

        assert_eq!(service.displayed().len(), 3, "first three comments");

        service.view_more();
        assert_eq!(service.displayed().len(), 4, "expanded to all");

        Ok(())
    }

    #[tokio::test]
    async fn editing_someone_elses_comment_sends_nothing() -> TestResult {
        let mut repo = MockFeedbackRepo::new();
        repo.expect_list().returning(|| Ok(wall()));
        repo.expect_update().times(0);

        let mut service = FeedbackService::new(repo, Some(session_for(7)));
        service.load().await?;

        let result = service.edit(FeedbackId::from_raw(2), "hijacked").await;

        assert!(
            matches!(result, Err(FeedbackServiceError::NotOwner)),
            "user 7 does not own comment 2"
        );
        assert_eq!(
            service.comments().get(1).map(|f| f.comment.as_str()),
            Some("fast delivery"),
            "comment untouched"
        );

        Ok(())
    }

    #[tokio::test]
    async fn owners_can_edit_their_comment() -> TestResult {
        let mut repo = MockFeedbackRepo::new();
        repo.expect_list().returning(|| Ok(wall()));
        repo.expect_update()
            .times(1)
            .returning(|record| Ok(record));

        let mut service = FeedbackService::new(repo, Some(session_for(7)));
        service.load().await?;

        let outcome = service
            .edit(FeedbackId::from_raw(1), "great service, updated")
            .await?;

        assert!(matches!(outcome, CommitOutcome::Confirmed), "edit landed");
        assert_eq!(
            service.comments().first().map(|f| f.comment.as_str()),
            Some("great service, updated"),
            "wall reflects the edit"
        );

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_posting_sends_nothing() {
        let mut repo = MockFeedbackRepo::new();
        repo.expect_submit().times(0);

        let mut service = FeedbackService::new(repo, None);
        service.edit_draft(|d| d.comment = "hello".to_string());

        let result = service.post().await;

        assert!(
            matches!(result, Err(FeedbackServiceError::NotAuthenticated)),
            "login required"
        );
    }

    #[tokio::test]
    async fn owners_can_delete_their_comment() -> TestResult {
        let mut repo = MockFeedbackRepo::new();
        repo.expect_list().returning(|| Ok(wall()));
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let mut service = FeedbackService::new(repo, Some(session_for(7)));
        service.load().await?;

        service.delete(FeedbackId::from_raw(1)).await?;

        assert!(
            service.comments().iter().all(|f| f.id.into_raw() != 1),
            "comment removed locally after remote success"
        );

        Ok(())
    }
}
