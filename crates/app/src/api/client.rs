//! JSON client for the storefront backend.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sphere_core::error::GatewayError;

/// Configuration for connecting to the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `"http://localhost:3000/api"`.
    pub base_url: String,
}

/// HTTP client for the storefront REST API.
///
/// One instance is shared by every repository; it owns the base URL and
/// the session's bearer token. All request/response bodies are JSON.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    token: Option<String>,
    http: Client,
}

/// Error envelope the backend uses for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

impl ApiClient {
    /// Create an unauthenticated client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            token: None,
            http: Client::new(),
        }
    }

    /// Attach a session token; subsequent requests carry it as a bearer.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = builder.send().await.map_err(GatewayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejection(status, response.text().await.ok()));
        }

        response.json().await.map_err(GatewayError::transport)
    }

    async fn dispatch_empty(&self, builder: RequestBuilder) -> Result<(), GatewayError> {
        let response = builder.send().await.map_err(GatewayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejection(status, response.text().await.ok()));
        }

        Ok(())
    }

    fn rejection(status: StatusCode, body: Option<String>) -> GatewayError {
        let message = body
            .as_deref()
            .and_then(|text| serde_json::from_str::<ErrorBody>(text).ok())
            .map_or_else(
                || body.clone().unwrap_or_default(),
                |parsed| parsed.message,
            );

        GatewayError::Rejected {
            status: status.as_u16(),
            message,
        }
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses, with the server's message
    /// preserved.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.dispatch(self.request(Method::GET, path)).await
    }

    /// `POST` a JSON body, returning the created resource.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        self.dispatch(self.request(Method::POST, path).json(body))
            .await
    }

    /// `POST` a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn post_empty<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        self.dispatch_empty(self.request(Method::POST, path).json(body))
            .await
    }

    /// `PUT` a JSON body, returning the updated resource.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        self.dispatch(self.request(Method::PUT, path).json(body))
            .await
    }

    /// `PUT` a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn put_empty<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), GatewayError> {
        self.dispatch_empty(self.request(Method::PUT, path).json(body))
            .await
    }

    /// `PUT` with no body and no response body.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn put_unit(&self, path: &str) -> Result<(), GatewayError> {
        self.dispatch_empty(self.request(Method::PUT, path)).await
    }

    /// `PATCH` a JSON body, returning the updated resource.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        self.dispatch(self.request(Method::PATCH, path).json(body))
            .await
    }

    /// `DELETE` a resource, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses.
    pub async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        self.dispatch_empty(self.request(Method::DELETE, path))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_the_server_message() {
        let error = ApiClient::rejection(
            StatusCode::CONFLICT,
            Some(r#"{"message":"username already taken"}"#.to_string()),
        );

        match error {
            GatewayError::Rejected { status, message } => {
                assert_eq!(status, 409, "status is preserved");
                assert_eq!(message, "username already taken");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn rejection_accepts_the_error_alias() {
        let error = ApiClient::rejection(
            StatusCode::BAD_REQUEST,
            Some(r#"{"error":"invalid payload"}"#.to_string()),
        );

        match error {
            GatewayError::Rejected { message, .. } => {
                assert_eq!(message, "invalid payload");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn rejection_falls_back_to_raw_text() {
        let error =
            ApiClient::rejection(StatusCode::BAD_GATEWAY, Some("upstream down".to_string()));

        match error {
            GatewayError::Rejected { status, message } => {
                assert_eq!(status, 502, "status is preserved");
                assert_eq!(message, "upstream down");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
