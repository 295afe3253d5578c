//! The create-form flow composed with a store reload, the way a modal
//! "add record" dialog drives them.

use async_trait::async_trait;
use sphere_core::{
    error::{FormError, GatewayError, ValidationErrors},
    fixtures::{InMemoryGateway, SampleRecord},
    form::{FormFlow, FormState, SubmitTarget, Validate},
    store::RemoteCollectionStore,
};
use testresult::TestResult;

#[derive(Debug, Clone, Default)]
struct RecordDraft {
    name: String,
    tag: String,
}

impl Validate for RecordDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }
        errors.into_result()
    }
}

/// Create endpoint over the fixture gateway.
struct CreateTarget<'a> {
    gateway: &'a InMemoryGateway<SampleRecord>,
}

#[async_trait]
impl SubmitTarget<RecordDraft, SampleRecord> for CreateTarget<'_> {
    async fn submit(&self, draft: RecordDraft) -> Result<SampleRecord, GatewayError> {
        let id = i64::try_from(self.gateway.records().len()).unwrap_or(0) + 1;
        let created = SampleRecord::new(id, &draft.name, &draft.tag);
        self.gateway.push(created.clone());
        Ok(created)
    }
}

#[tokio::test]
async fn successful_create_reset_and_reload() -> TestResult {
    let gateway = InMemoryGateway::new(vec![SampleRecord::new(1, "disco sphere", "decor")]);
    let target = CreateTarget { gateway: &gateway };
    let mut store: RemoteCollectionStore<SampleRecord> = RemoteCollectionStore::new();
    let mut form: FormFlow<RecordDraft> = FormFlow::new();

    form.update(|d| {
        d.name = "fog machine".to_string();
        d.tag = "effects".to_string();
    });
    let created = form.submit(&target).await?;

    // Success resets the draft; the completion step reloads the store.
    assert_eq!(form.state(), FormState::Idle, "modal closes");
    assert!(form.draft().name.is_empty(), "draft reset to defaults");

    store.load(&gateway).await?;
    assert!(
        store.get(created.id).is_some(),
        "reloaded collection contains the created record"
    );

    Ok(())
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_gateway() -> TestResult {
    let gateway = InMemoryGateway::new(Vec::new());
    let target = CreateTarget { gateway: &gateway };
    let mut form: FormFlow<RecordDraft> = FormFlow::new();

    form.update(|d| d.tag = "effects".to_string());
    let result = form.submit(&target).await;

    assert!(
        matches!(result, Err(FormError::Invalid(_))),
        "blank name fails the schema"
    );
    assert!(gateway.records().is_empty(), "nothing was created");
    assert_eq!(form.draft().tag, "effects", "draft preserved for fixing");

    Ok(())
}
