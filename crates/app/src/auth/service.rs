//! Auth service.
//!
//! Owns the customer-facing account flows: login, sign-up, the profile
//! view, password changes, merit-point redemption and account deletion.
//! Redemption is the one business rule checked client-side — asking for
//! more points than the balance holds never produces a request.

use async_trait::async_trait;
use sphere_core::{
    error::{FormError, GatewayError, ValidationErrors},
    form::{FormFlow, FormState, SubmitTarget, Validate},
};
use thiserror::Error;

use crate::session::Session;
use crate::users::models::User;

use super::{
    models::{Credentials, PasswordChange, RedeemPoints, Registration},
    repository::AuthRepository,
};

/// Failures from the account flows.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// A draft failed its schema; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Redemption asked for more points than the balance holds; nothing
    /// was sent.
    #[error("cannot redeem {requested} points from a balance of {balance}")]
    InsufficientPoints { requested: u64, balance: u64 },

    /// A flow that needs the profile ran before it was loaded.
    #[error("profile is not loaded")]
    ProfileNotLoaded,

    /// The request reached the backend and failed there.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<FormError> for AuthServiceError {
    fn from(error: FormError) -> Self {
        match error {
            FormError::Invalid(errors) => Self::Invalid(errors),
            FormError::Gateway(error) => Self::Gateway(error),
        }
    }
}

// Bridge one repository verb to the form it backs.
struct SignupTarget<'a, R>(&'a R);
struct PasswordTarget<'a, R>(&'a R);
struct RedeemTarget<'a, R>(&'a R);

#[async_trait]
impl<R: AuthRepository> SubmitTarget<Registration, User> for SignupTarget<'_, R> {
    async fn submit(&self, draft: Registration) -> Result<User, GatewayError> {
        self.0.register(draft).await
    }
}

#[async_trait]
impl<R: AuthRepository> SubmitTarget<PasswordChange, ()> for PasswordTarget<'_, R> {
    async fn submit(&self, draft: PasswordChange) -> Result<(), GatewayError> {
        self.0.change_password(draft).await
    }
}

#[async_trait]
impl<R: AuthRepository> SubmitTarget<RedeemPoints, ()> for RedeemTarget<'_, R> {
    async fn submit(&self, draft: RedeemPoints) -> Result<(), GatewayError> {
        self.0.redeem(draft).await
    }
}

#[derive(Debug)]
pub struct AuthService<R: AuthRepository> {
    repository: R,
    profile: Option<User>,
    signup_form: FormFlow<Registration>,
    password_form: FormFlow<PasswordChange>,
    redeem_form: FormFlow<RedeemPoints>,
}

impl<R: AuthRepository> AuthService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            profile: None,
            signup_form: FormFlow::new(),
            password_form: FormFlow::new(),
            redeem_form: FormFlow::new(),
        }
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Validation failures send nothing; otherwise the backend's rejection
    /// (wrong password, unknown user) is surfaced as-is.
    pub async fn login(&self, credentials: Credentials) -> Result<Session, AuthServiceError> {
        credentials.validate()?;
        let response = self.repository.login(credentials).await?;
        Ok(Session {
            token: response.token,
            user: response.user,
        })
    }

    /// The sign-up draft.
    pub fn signup_draft(&self) -> &Registration {
        self.signup_form.draft()
    }

    /// State of the sign-up form.
    pub fn signup_state(&self) -> FormState {
        self.signup_form.state()
    }

    /// Mutate the sign-up draft.
    pub fn edit_signup(&mut self, mutate: impl FnOnce(&mut Registration)) {
        self.signup_form.update(mutate);
    }

    /// Submit the sign-up draft.
    ///
    /// # Errors
    ///
    /// Schema failures send nothing; server-side rejections (duplicate
    /// username) preserve the draft.
    pub async fn signup(&mut self) -> Result<User, FormError> {
        let target = SignupTarget(&self.repository);
        self.signup_form.submit(&target).await
    }

    /// Fetch the profile for the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; a previously loaded profile is kept.
    pub async fn load_profile(&mut self) -> Result<&User, GatewayError> {
        let user = self.repository.profile().await?;
        Ok(self.profile.insert(user))
    }

    /// The loaded profile, if any.
    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// The change-password draft.
    pub fn password_draft(&self) -> &PasswordChange {
        self.password_form.draft()
    }

    /// Mutate the change-password draft.
    pub fn edit_password(&mut self, mutate: impl FnOnce(&mut PasswordChange)) {
        self.password_form.update(mutate);
    }

    /// Submit the change-password draft.
    ///
    /// # Errors
    ///
    /// Schema failures send nothing; a wrong old password comes back from
    /// the server and preserves the draft.
    pub async fn change_password(&mut self) -> Result<(), FormError> {
        let target = PasswordTarget(&self.repository);
        self.password_form.submit(&target).await
    }

    /// The redemption draft.
    pub fn redeem_draft(&self) -> &RedeemPoints {
        self.redeem_form.draft()
    }

    /// Mutate the redemption draft.
    pub fn edit_redeem(&mut self, mutate: impl FnOnce(&mut RedeemPoints)) {
        self.redeem_form.update(mutate);
    }

    /// Redeem the drafted number of merit points.
    ///
    /// The balance check happens locally: over-redemption is rejected
    /// without a request. On success the local balance is debited.
    ///
    /// # Errors
    ///
    /// [`AuthServiceError::InsufficientPoints`] locally, schema failures,
    /// or the gateway failure.
    pub async fn redeem_points(&mut self) -> Result<(), AuthServiceError> {
        let balance = self
            .profile
            .as_ref()
            .ok_or(AuthServiceError::ProfileNotLoaded)?
            .merit_points;
        let requested = self.redeem_form.draft().points;
        if requested > balance {
            return Err(AuthServiceError::InsufficientPoints { requested, balance });
        }

        let target = RedeemTarget(&self.repository);
        self.redeem_form.submit(&target).await?;

        if let Some(profile) = &mut self.profile {
            profile.merit_points = balance - requested;
        }
        Ok(())
    }

    /// Delete the logged-in user's account.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the profile is kept on failure.
    pub async fn delete_account(&mut self) -> Result<(), GatewayError> {
        self.repository.delete_account().await?;
        self.profile = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::auth::models::LoginResponse;
    use crate::auth::repository::MockAuthRepository;
    use crate::users::models::{Role, UserId};

    use super::*;

    fn customer(merit_points: u64) -> User {
        User {
            id: UserId::from_raw(7),
            username: "amara".to_string(),
            email: "amara@example.com".to_string(),
            phone: "0700000000".to_string(),
            role: Role::Customer,
            merit_points,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn login_returns_the_session_blob() -> TestResult {
        let mut repo = MockAuthRepository::new();
        repo.expect_login().times(1).returning(|_| {
            Ok(LoginResponse {
                message: Some("welcome back".to_string()),
                token: "opaque-token".to_string(),
                user: customer(200),
            })
        });

        let service = AuthService::new(repo);
        let session = service
            .login(Credentials {
                identifier: "amara".to_string(),
                password: "Str0ng!pass".to_string(),
            })
            .await?;

        assert_eq!(session.token, "opaque-token");
        assert_eq!(session.user.username, "amara");

        Ok(())
    }

    #[tokio::test]
    async fn login_with_blank_fields_sends_nothing() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login().times(0);

        let service = AuthService::new(repo);
        let result = service.login(Credentials::default()).await;

        assert!(
            matches!(result, Err(AuthServiceError::Invalid(_))),
            "both fields are required"
        );
    }

    #[tokio::test]
    async fn redeeming_within_the_balance_debits_locally() -> TestResult {
        let mut repo = MockAuthRepository::new();
        repo.expect_profile().returning(|| Ok(customer(200)));
        repo.expect_redeem()
            .times(1)
            .withf(|redemption| redemption.points == 150)
            .returning(|_| Ok(()));

        let mut service = AuthService::new(repo);
        service.load_profile().await?;
        service.edit_redeem(|d| d.points = 150);

        service.redeem_points().await?;

        assert_eq!(
            service.profile().map(|u| u.merit_points),
            Some(50),
            "balance debited locally after success"
        );

        Ok(())
    }

    #[tokio::test]
    async fn over_redemption_sends_no_request() -> TestResult {
        let mut repo = MockAuthRepository::new();
        repo.expect_profile().returning(|| Ok(customer(200)));
        repo.expect_redeem().times(0);

        let mut service = AuthService::new(repo);
        service.load_profile().await?;
        service.edit_redeem(|d| d.points = 500);

        let result = service.redeem_points().await;

        assert!(
            matches!(
                result,
                Err(AuthServiceError::InsufficientPoints {
                    requested: 500,
                    balance: 200
                })
            ),
            "checked locally, surfaced locally"
        );
        assert_eq!(
            service.profile().map(|u| u.merit_points),
            Some(200),
            "balance untouched"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_signup_preserves_the_draft() -> TestResult {
        let mut repo = MockAuthRepository::new();
        repo.expect_register().times(1).returning(|_| {
            Err(GatewayError::Rejected {
                status: 409,
                message: "username already taken".to_string(),
            })
        });

        let mut service = AuthService::new(repo);
        service.edit_signup(|d| {
            d.username = "amara".to_string();
            d.email = "amara@example.com".to_string();
            d.phone = "0700000000".to_string();
            d.password = "Str0ng!pass".to_string();
            d.confirm_password = "Str0ng!pass".to_string();
        });

        let result = service.signup().await;

        assert!(matches!(result, Err(FormError::Gateway(_))), "surfaced once");
        assert_eq!(service.signup_draft().username, "amara", "draft intact");
        assert_eq!(service.signup_state(), FormState::Editing, "still editing");

        Ok(())
    }

    #[tokio::test]
    async fn invalid_signup_sends_nothing() {
        let mut repo = MockAuthRepository::new();
        repo.expect_register().times(0);

        let mut service = AuthService::new(repo);
        service.edit_signup(|d| {
            d.username = "amara".to_string();
            // Missing email, phone and password.
        });

        let result = service.signup().await;

        assert!(matches!(result, Err(FormError::Invalid(_))), "schema fails");
    }

    #[tokio::test]
    async fn delete_account_forgets_the_profile() -> TestResult {
        let mut repo = MockAuthRepository::new();
        repo.expect_profile().returning(|| Ok(customer(200)));
        repo.expect_delete_account().times(1).returning(|| Ok(()));

        let mut service = AuthService::new(repo);
        service.load_profile().await?;

        service.delete_account().await?;

        assert!(service.profile().is_none(), "profile cleared");

        Ok(())
    }
}
