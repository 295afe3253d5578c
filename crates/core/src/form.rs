//! Draft-based form submission flow.

use async_trait::async_trait;
use mockall::automock;

use crate::error::{FormError, GatewayError, ValidationErrors};

/// Client-side validation of a draft.
///
/// Drafts that declare no schema validate vacuously; only forms with a
/// declared schema (account and password flows) override this.
pub trait Validate {
    /// Check the draft.
    ///
    /// # Errors
    ///
    /// Returns every failed check at once.
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// The create/update endpoint a form submits to.
#[automock]
#[async_trait]
pub trait SubmitTarget<D: Send + Sync + 'static, T: Send + Sync + 'static>: Send + Sync {
    /// Persist the draft, returning the created record.
    async fn submit(&self, draft: D) -> Result<T, GatewayError>;
}

/// Lifecycle of one form instance.
///
/// `Idle → Editing → Submitting → { Idle on success, Editing on failure }`.
/// There is no terminal state short of dropping the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    /// Pristine draft, seeded with defaults.
    #[default]
    Idle,

    /// The draft has been touched since the last reset.
    Editing,

    /// A submission is in flight.
    Submitting,
}

/// A form: a draft record plus its submission state machine.
#[derive(Debug, Default)]
pub struct FormFlow<D: Validate + Clone + Default> {
    draft: D,
    state: FormState,
}

impl<D: Validate + Clone + Default + Send + Sync + 'static> FormFlow<D> {
    /// A pristine form with a default draft.
    pub fn new() -> Self {
        Self {
            draft: D::default(),
            state: FormState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Read the draft.
    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutate the draft in place.
    pub fn update(&mut self, mutate: impl FnOnce(&mut D)) {
        mutate(&mut self.draft);
        self.state = FormState::Editing;
    }

    /// Validate and submit the draft.
    ///
    /// On success the draft resets to defaults, the state returns to
    /// `Idle`, and the created record is handed back so the caller can
    /// close a modal or reload a store. On failure the draft is preserved
    /// and the state returns to `Editing`.
    ///
    /// # Errors
    ///
    /// [`FormError::Invalid`] when validation fails (nothing is sent);
    /// [`FormError::Gateway`] when the submission itself fails.
    pub async fn submit<T: Send + Sync + 'static>(
        &mut self,
        target: &dyn SubmitTarget<D, T>,
    ) -> Result<T, FormError> {
        self.draft.validate()?;

        self.state = FormState::Submitting;
        match target.submit(self.draft.clone()).await {
            Ok(created) => {
                self.draft = D::default();
                self.state = FormState::Idle;
                Ok(created)
            }
            Err(error) => {
                tracing::warn!(error = %error, "form submission failed");
                self.state = FormState::Editing;
                Err(error.into())
            }
        }
    }

    /// Discard the draft and return to `Idle`.
    pub fn reset(&mut self) {
        self.draft = D::default();
        self.state = FormState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct NoteDraft {
        body: String,
    }

    impl Validate for NoteDraft {
        fn validate(&self) -> Result<(), ValidationErrors> {
            let mut errors = ValidationErrors::new();
            if self.body.trim().is_empty() {
                errors.push("body", "Body is required");
            }
            errors.into_result()
        }
    }

    // An unvalidated draft, the way catalog create forms behave.
    #[derive(Debug, Clone, Default)]
    struct LooseDraft {
        anything: String,
    }

    impl Validate for LooseDraft {}

    #[tokio::test]
    async fn successful_submit_resets_draft_and_returns_created() -> TestResult {
        let mut target = MockSubmitTarget::<NoteDraft, i64>::new();
        target.expect_submit().times(1).returning(|_| Ok(7));

        let mut form: FormFlow<NoteDraft> = FormFlow::new();
        form.update(|d| d.body = "hello".to_string());
        assert_eq!(form.state(), FormState::Editing);

        let created = form.submit(&target).await?;

        assert_eq!(created, 7, "created record is handed back");
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.draft(), &NoteDraft::default(), "draft reset");

        Ok(())
    }

    #[tokio::test]
    async fn validation_failure_sends_nothing_and_keeps_draft() {
        let mut target = MockSubmitTarget::<NoteDraft, i64>::new();
        target.expect_submit().times(0);

        let mut form: FormFlow<NoteDraft> = FormFlow::new();
        form.update(|d| d.body = "   ".to_string());

        let result = form.submit(&target).await;

        assert!(
            matches!(result, Err(FormError::Invalid(_))),
            "blank body fails the schema"
        );
        assert_eq!(form.draft().body, "   ", "draft intact");
        assert_eq!(form.state(), FormState::Editing);
    }

    #[tokio::test]
    async fn gateway_failure_preserves_draft_for_retry() {
        let mut target = MockSubmitTarget::<NoteDraft, i64>::new();
        target.expect_submit().times(1).returning(|_| {
            Err(GatewayError::Rejected {
                status: 409,
                message: "duplicate".to_string(),
            })
        });

        let mut form: FormFlow<NoteDraft> = FormFlow::new();
        form.update(|d| d.body = "hello".to_string());

        let result = form.submit(&target).await;

        assert!(matches!(result, Err(FormError::Gateway(_))), "surfaced once");
        assert_eq!(form.draft().body, "hello", "draft preserved on failure");
        assert_eq!(form.state(), FormState::Editing);
    }

    #[tokio::test]
    async fn undeclared_schema_validates_vacuously() -> TestResult {
        let mut target = MockSubmitTarget::<LooseDraft, ()>::new();
        target.expect_submit().times(1).returning(|_| Ok(()));

        let mut form: FormFlow<LooseDraft> = FormFlow::new();
        form.update(|d| d.anything = String::new());

        form.submit(&target).await?;

        Ok(())
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut form: FormFlow<NoteDraft> = FormFlow::new();
        form.update(|d| d.body = "draft".to_string());

        form.reset();

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.draft(), &NoteDraft::default());
    }
}
