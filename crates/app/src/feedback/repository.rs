//! Feedback Repository

use async_trait::async_trait;
use serde::Serialize;
use sphere_core::{error::GatewayError, form::SubmitTarget, gateway::CollectionGateway};

use crate::api::ApiClient;

use super::models::{Feedback, FeedbackId, NewFeedback};

/// Remote side of the feedback resource.
pub trait FeedbackRepository:
    CollectionGateway<Feedback> + SubmitTarget<NewFeedback, Feedback>
{
}

#[derive(Debug, Serialize)]
struct CommentPatch {
    comment: String,
}

/// REST-backed feedback repository.
#[derive(Debug, Clone)]
pub struct HttpFeedbackRepository {
    api: ApiClient,
}

impl HttpFeedbackRepository {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CollectionGateway<Feedback> for HttpFeedbackRepository {
    async fn list(&self) -> Result<Vec<Feedback>, GatewayError> {
        self.api.get("feedbacks").await
    }

    async fn update(&self, record: Feedback) -> Result<Feedback, GatewayError> {
        // Only the comment body is writable; the patch carries just that.
        self.api
            .patch(
                &format!("feedbacks/{}", record.id),
                &CommentPatch {
                    comment: record.comment.clone(),
                },
            )
            .await
    }

    async fn delete(&self, id: FeedbackId) -> Result<(), GatewayError> {
        self.api.delete(&format!("feedbacks/{id}")).await
    }
}

#[async_trait]
impl SubmitTarget<NewFeedback, Feedback> for HttpFeedbackRepository {
    async fn submit(&self, draft: NewFeedback) -> Result<Feedback, GatewayError> {
        self.api.post("feedbacks", &draft).await
    }
}

impl FeedbackRepository for HttpFeedbackRepository {}
