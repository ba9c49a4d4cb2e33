//! Caller authentication against the identity service.
//!
//! One outbound `GET <apiUrl>/user-details` per request, no retries. The
//! response is classified into an [`Identity`] or an [`AuthError`], and the
//! session cookie is refreshed when the service hands back a new token.

use std::time::Duration;

use async_trait::async_trait;
use hyper::StatusCode;
use ide_core::{CookieDirective, ExternalId, Identity, SessionToken};

use crate::http_client::{build_client, get_text, HttpClient};
use crate::AuthError;

/// Default limit on a single identity-service exchange.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Message the identity service uses for an unknown project on a 404.
const NO_SUCH_PROJECT: &str = "No such project";

/// Everything authentication needs to know about one incoming request.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    /// Token picked from the query or cookie, if any.
    pub token: Option<&'a SessionToken>,
    /// Value of the incoming `sessionId` cookie.
    pub cookie_token: Option<&'a str>,
    pub project_id: &'a ExternalId,
    /// Request `Host` header, used to scope a refreshed cookie.
    pub host: &'a str,
}

/// A successfully authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub identity: Identity,
    /// Present only when the service's token differs from the cookie.
    pub cookie: Option<CookieDirective>,
}

/// Identity-service abstraction.
///
/// Implementations must be `Send + Sync` so one instance can serve every
/// request.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Look up the caller's identity for `project_id`.
    ///
    /// # Errors
    /// Returns an [`AuthError`] describing why the caller was not accepted.
    async fn fetch_identity(
        &self,
        token: Option<&SessionToken>,
        project_id: &ExternalId,
    ) -> Result<Identity, AuthError>;

    /// Authenticate the request and decide whether the cookie needs updating.
    ///
    /// # Errors
    /// Propagates errors from [`AuthGateway::fetch_identity`].
    async fn authenticate(&self, request: AuthRequest<'_>) -> Result<Authenticated, AuthError> {
        let identity = self.fetch_identity(request.token, request.project_id).await?;
        let cookie = CookieDirective::when_changed(&identity.token, request.cookie_token, request.host);
        Ok(Authenticated { identity, cookie })
    }
}

/// [`AuthGateway`] backed by the HTTP identity service.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    api_url: String,
    timeout: Option<Duration>,
    client: HttpClient,
}

impl HttpAuthGateway {
    /// Create a gateway for the service at `api_url` with
    /// [`DEFAULT_AUTH_TIMEOUT`].
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_timeout(api_url, Some(DEFAULT_AUTH_TIMEOUT))
    }

    /// Create a gateway with a custom timeout; `None` waits indefinitely.
    #[must_use]
    pub fn with_timeout(api_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout,
            client: build_client(),
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn fetch_identity(
        &self,
        token: Option<&SessionToken>,
        project_id: &ExternalId,
    ) -> Result<Identity, AuthError> {
        let url = user_details_url(&self.api_url, project_id, token);
        tracing::debug!(%project_id, has_token = token.is_some(), "querying identity service");

        let (status, body) = get_text(&self.client, &url, self.timeout)
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "identity service unreachable"))?;
        classify_response(status, &body)
            .inspect_err(|e| tracing::debug!(%status, error = %e, "identity service rejected request"))
    }
}

/// Build `<api_url>/user-details?projectId=<id>[&sessionId=<token>]`.
#[must_use]
pub fn user_details_url(api_url: &str, project_id: &ExternalId, token: Option<&SessionToken>) -> String {
    let mut url = format!(
        "{api_url}/user-details?projectId={}",
        urlencoding::encode(&project_id.to_string())
    );
    if let Some(token) = token {
        url.push_str("&sessionId=");
        url.push_str(&urlencoding::encode(token.as_str()));
    }
    url
}

/// Interpret an identity-service response.
///
/// # Errors
/// - 404 with an unparseable body: [`AuthError::MalformedResponse`]
/// - 404 with message `No such project`: [`AuthError::ProjectNotFound`]
/// - any other non-2xx: [`AuthError::Upstream`] carrying the raw body
/// - 2xx with a body that is not an identity: [`AuthError::MalformedResponse`]
pub fn classify_response(status: StatusCode, body: &str) -> Result<Identity, AuthError> {
    if status == StatusCode::NOT_FOUND {
        let details: serde_json::Value =
            serde_json::from_str(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
        if details.get("message").and_then(serde_json::Value::as_str) == Some(NO_SUCH_PROJECT) {
            return Err(AuthError::ProjectNotFound);
        }
        return Err(AuthError::Upstream(body.to_owned()));
    }
    if !status.is_success() {
        return Err(AuthError::Upstream(body.to_owned()));
    }
    serde_json::from_str(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
}
