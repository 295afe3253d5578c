//! User Models

use serde::{Deserialize, Serialize};
use sphere_core::{
    entity::Entity,
    error::ValidationErrors,
    form::Validate,
};

use crate::ids::TypedId;

/// User id
pub type UserId = TypedId<User>;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

/// User Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    /// Loyalty balance; never negative.
    pub merit_points: u64,
    /// Suspended accounts are inactive.
    pub is_active: bool,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Admin password-reset draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReset {
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for PasswordReset {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.new_password.len() < 8 {
            errors.push("new_password", "Password must be at least 8 characters");
        }
        if self.confirm_password != self.new_password {
            errors.push("confirm_password", "Passwords must match");
        }
        errors.into_result()
    }
}
