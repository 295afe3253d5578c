//! Auth Models
//!
//! Drafts for the account forms. These are the only forms that declare a
//! validation schema; everything the schema rejects is caught before a
//! request is issued.

use serde::{Deserialize, Serialize};
use sphere_core::{error::ValidationErrors, form::Validate};

use crate::users::models::User;

const PASSWORD_SPECIALS: &str = "!@#$%^&*";

fn looks_like_email(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

fn is_strong_password(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Login draft: username or email plus the password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.identifier.is_empty() {
            errors.push("identifier", "Username or email is required");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result()
    }
}

/// What a successful login hands back: the opaque session blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: User,
}

/// Sign-up draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for Registration {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.username.is_empty() {
            errors.push("username", "Username is required");
        }
        if self.email.is_empty() {
            errors.push("email", "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.push("email", "Invalid email");
        }
        if self.phone.is_empty() {
            errors.push("phone", "Phone number is required");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        } else if self.password.len() < 8 {
            errors.push("password", "Password must be at least 8 characters");
        } else if !is_strong_password(&self.password) {
            errors.push(
                "password",
                "Password must contain at least one uppercase letter, one \
                 lowercase letter, one number, and one special character",
            );
        }
        if self.confirm_password != self.password {
            errors.push("confirm_password", "Passwords must match");
        }
        errors.into_result()
    }
}

/// Change-password draft for the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for PasswordChange {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.old_password.is_empty() {
            errors.push("old_password", "Old Password is required");
        }
        if self.new_password.is_empty() {
            errors.push("new_password", "New Password is required");
        } else if self.new_password.len() < 8 {
            errors.push("new_password", "Password must be at least 8 characters long");
        }
        if self.confirm_password != self.new_password {
            errors.push("confirm_password", "Passwords must match");
        }
        errors.into_result()
    }
}

/// Merit-points redemption draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemPoints {
    pub points: u64,
}

impl Validate for RedeemPoints {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.points < 1 {
            errors.push("points", "Points must be at least 1");
        }
        errors.into_result()
    }
}
