//! HTTP clients - one anonymous, one that attaches the stored bearer token

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::network::endpoints::Endpoint;
use crate::storage::SessionStore;

/// A client bound to the API base URL.
///
/// Both flavours share the same pooled `reqwest::Client`; they differ only
/// in whether a bearer token is attached.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<SessionStore>,
}

impl HttpClient {
    /// Client that never sends credentials
    pub fn anonymous(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        HttpClient {
            http,
            base_url: base_url.into(),
            credentials: None,
        }
    }

    /// Client that reads the token from `sessions` for every request
    pub fn authenticated(
        http: reqwest::Client,
        base_url: impl Into<String>,
        sessions: SessionStore,
    ) -> Self {
        HttpClient {
            http,
            base_url: base_url.into(),
            credentials: Some(sessions),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request to `endpoint`
    pub fn request(&self, method: Method, endpoint: Endpoint) -> RequestBuilder {
        let url = endpoint.url(&self.base_url);
        let builder = self.http.request(method, url);

        match &self.credentials {
            Some(store) => match store.token() {
                Some(token) => builder.bearer_auth(token),
                None => {
                    // Sent anyway; the server decides
                    tracing::warn!(path = %endpoint.path(), "No stored token for authenticated request");
                    builder
                }
            },
            None => builder,
        }
    }
}

/// Decode a JSON body, mapping non-2xx statuses to [`ApiError::Status`]
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Accept any successful response, ignoring the body
pub async fn read_empty(response: Response) -> Result<()> {
    check_status(response).await?;
    Ok(())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: server_message(&body, status),
    })
}

/// Pull a readable message out of an error body
fn server_message(body: &str, status: StatusCode) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = json.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        trimmed.to_string()
    }
}

/// Create an HTTP client with default configuration
pub fn create_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
