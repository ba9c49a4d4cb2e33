//! Axum route handlers for the IDE gateway.

use axum::{
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, HOST, LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use ide_boot::AuthRequest;
use ide_core::{resolve_token, IdeQuery, RequestOverrides, SESSION_COOKIE};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    cookies::cookie_value,
    error::GatewayError,
    render::RenderContext,
    state::AppState,
};

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ide.html", get(ide_html))
        .route("/_ping", get(ping))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /`: redirect to the IDE or the places page.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let target = if state.base.sdk { "/ide.html" } else { "/static/places.html" };
    (StatusCode::FOUND, [(LOCATION, target)])
}

/// `GET /_ping`: liveness probe.
pub async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({"ping": "pong"}))
}

/// `GET /ide.html`: authenticate the caller and render the IDE bootstrap
/// page with the resolved client configuration.
///
/// # Errors
/// Returns [`GatewayError::Auth`] if authentication fails (written as a
/// terminal plain-text response), or [`GatewayError::ConfigLoad`] /
/// [`GatewayError::Render`] for failures after authentication.
pub async fn ide_html(
    State(state): State<AppState>,
    Query(query): Query<IdeQuery>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ide_html", %request_id);
    boot_session(&state, &query, &headers).instrument(span).await
}

async fn boot_session(
    state: &AppState,
    query: &IdeQuery,
    headers: &HeaderMap,
) -> Result<Response, GatewayError> {
    let cookie_token = cookie_value(headers, SESSION_COOKIE);
    let token = resolve_token(
        query.session_id.as_deref(),
        query.access_token.as_deref(),
        cookie_token.as_deref(),
    );
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    let overrides = RequestOverrides::from_query(query);

    let auth = state
        .auth
        .authenticate(AuthRequest {
            token: token.as_ref(),
            cookie_token: cookie_token.as_deref(),
            project_id: state.base.project_id(),
            host,
        })
        .await?;

    let resolved = state
        .resolver
        .resolve(&state.base, &overrides, &auth.identity)
        .await?;

    let body = state.renderer.render(&RenderContext {
        architect_config: &resolved.architect_config,
        config_name: &resolved.profile,
        packed: resolved.packed,
        version: resolved.version.as_deref(),
    })?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
    response_headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    if let Some(cookie) = auth.cookie {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response_headers.insert(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "session cookie is not a valid header value"),
        }
    }

    tracing::info!(
        profile = %resolved.profile,
        readonly = resolved.readonly,
        packed = resolved.packed,
        "IDE session booted"
    );
    Ok((StatusCode::OK, response_headers, body).into_response())
}
