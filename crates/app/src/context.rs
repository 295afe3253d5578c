//! App Context

use crate::api::{ApiClient, ApiConfig};
use crate::auth::{AuthService, HttpAuthRepository};
use crate::catalog::{CatalogService, HttpProductsRepository};
use crate::config::AppConfig;
use crate::feedback::{FeedbackService, HttpFeedbackRepository};
use crate::notifications::{HttpNotificationsRepository, NotificationsService};
use crate::offers::{HttpOffersRepository, OffersService};
use crate::orders::{HttpOrdersRepository, OrdersService};
use crate::session::{Session, SessionStore};
use crate::users::{HttpUsersRepository, UsersService};

/// Wires the HTTP client, the persisted session and the per-view
/// services together. Each service accessor hands out a fresh instance
/// with its own store — state is per view, never shared across views.
#[derive(Debug, Clone)]
pub struct AppContext {
    api: ApiClient,
    sessions: SessionStore,
    session: Option<Session>,
}

impl AppContext {
    /// Build the context from configuration, picking up any persisted
    /// session so its token rides along on every request.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let sessions = SessionStore::new(&config.session_file);
        let session = sessions.load();

        let mut api = ApiClient::new(ApiConfig {
            base_url: config.api_url.clone(),
        });
        if let Some(session) = &session {
            api = api.with_token(&session.token);
        }

        Self {
            api,
            sessions,
            session,
        }
    }

    /// The active session, if someone is logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The session persistence handle.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Adopt a freshly minted session: persist it and re-arm the client
    /// with its token.
    ///
    /// # Errors
    ///
    /// Returns the persistence failure; the in-memory session still
    /// switches so the current process works either way.
    pub fn adopt_session(
        &mut self,
        session: Session,
    ) -> Result<(), crate::session::SessionStoreError> {
        self.api = self.api.clone().with_token(&session.token);
        let persisted = self.sessions.save(&session);
        self.session = Some(session);
        persisted
    }

    /// Forget the session: clear the blob and drop the token.
    ///
    /// # Errors
    ///
    /// Returns the persistence failure.
    pub fn clear_session(&mut self) -> Result<(), crate::session::SessionStoreError> {
        self.session = None;
        self.sessions.clear()
    }

    /// A fresh catalog view.
    pub fn catalog(&self) -> CatalogService<HttpProductsRepository> {
        CatalogService::new(HttpProductsRepository::new(self.api.clone()))
    }

    /// A fresh offers view.
    pub fn offers(&self) -> OffersService<HttpOffersRepository> {
        OffersService::new(HttpOffersRepository::new(self.api.clone()))
    }

    /// A fresh auth/account view.
    pub fn auth(&self) -> AuthService<HttpAuthRepository> {
        AuthService::new(HttpAuthRepository::new(self.api.clone()))
    }

    /// A fresh admin users view.
    pub fn users(&self) -> UsersService<HttpUsersRepository> {
        UsersService::new(HttpUsersRepository::new(self.api.clone()))
    }

    /// A fresh orders view acting as the current session.
    pub fn orders(&self) -> OrdersService<HttpOrdersRepository> {
        OrdersService::new(
            HttpOrdersRepository::new(self.api.clone()),
            self.session.clone(),
        )
    }

    /// A fresh notifications view.
    pub fn notifications(&self) -> NotificationsService<HttpNotificationsRepository> {
        NotificationsService::new(HttpNotificationsRepository::new(self.api.clone()))
    }

    /// A fresh feedback view acting as the current session.
    pub fn feedback(&self) -> FeedbackService<HttpFeedbackRepository> {
        FeedbackService::new(
            HttpFeedbackRepository::new(self.api.clone()),
            self.session.clone(),
        )
    }
}
