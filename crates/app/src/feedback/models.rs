//! Feedback Models

use serde::{Deserialize, Serialize};
use sphere_core::{entity::Entity, error::ValidationErrors, form::Validate};

use crate::ids::TypedId;
use crate::users::models::UserId;

/// Feedback id
pub type FeedbackId = TypedId<Feedback>;

/// Feedback Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: UserId,
    pub username: String,
    pub comment: String,
}

impl Entity for Feedback {
    type Id = FeedbackId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// New comment draft. Blank comments are rejected before a request is
/// made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub comment: String,
}

impl Validate for NewFeedback {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.comment.trim().is_empty() {
            errors.push("comment", "Comment cannot be empty");
        }
        errors.into_result()
    }
}
