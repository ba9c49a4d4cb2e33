//! Minimal HTTP/1 client for the identity service.
//!
//! Built on hyper's pooled legacy client over plain TCP. Only `GET` is
//! needed; the caller decides what a status code means.

use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, StatusCode, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::AuthError;

pub(crate) type HttpClient = Client<HttpConnector, Full<Bytes>>;

pub(crate) fn build_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build_http()
}

/// Issue a `GET` and return the status and body text.
///
/// # Errors
/// Returns [`AuthError::Transport`] on connection, protocol or timeout
/// failures. Non-2xx statuses are not errors here.
pub(crate) async fn get_text(
    client: &HttpClient,
    url: &str,
    timeout: Option<Duration>,
) -> Result<(StatusCode, String), AuthError> {
    let uri: Uri = url
        .parse()
        .map_err(|e| AuthError::Transport(format!("invalid identity service URL {url}: {e}")))?;

    let req = Request::get(uri)
        .body(Full::default())
        .map_err(|e| AuthError::Transport(format!("build request: {e}")))?;

    let exchange = async {
        let resp = client
            .request(req)
            .await
            .map_err(|e| AuthError::Transport(format!("identity service request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| AuthError::Transport(format!("read identity service response: {e}")))?
            .to_bytes();

        Ok::<_, AuthError>((status, String::from_utf8_lossy(&body).into_owned()))
    };

    match timeout {
        Some(limit) => tokio::time::timeout(limit, exchange).await.map_err(|_| {
            AuthError::Transport(format!(
                "identity service did not respond within {}ms",
                limit.as_millis()
            ))
        })?,
        None => exchange.await,
    }
}
