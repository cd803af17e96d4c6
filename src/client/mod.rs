//! HTTP client wrapper
//!
//! Builds the configured reqwest client, attaches the session's bearer token
//! to every request and folds every failure into [`TransportError`] or
//! [`Error::MalformedResponse`].

use crate::config::Config;
use crate::constants::messages::REQUEST_FAILED;
use crate::error::{Error, Result, TransportError};
use crate::session::SessionContext;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("fitspace/", env!("CARGO_PKG_VERSION"));

/// Backend client bound to one base URL and one session
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Create a client for `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration, session: SessionContext) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config, session: SessionContext) -> Result<Self> {
        Self::new(config.api_base_url(), config.request_timeout(), session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let request = self.authorize(self.http.get(self.url(path)));
        self.dispatch(request, path).await
    }

    /// POST `body` as JSON to `path` and decode the JSON body
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let request = self.authorize(self.http.post(self.url(path)).json(body));
        self.dispatch(request, path).await
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            warn!(path, error = %e, "Request failed");
            TransportError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let error = TransportError::from_status(status, &body);
            warn!(path, status = status.as_u16(), message = %error.message, "Backend returned an error");
            return Err(error.into());
        }

        let body = response.bytes().await.map_err(TransportError::from)?;
        decode(path, &body)
    }
}

/// Decode a successful response body
pub fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", path, e)))
}

impl TransportError {
    /// Build the error for a non-2xx response
    ///
    /// The message comes from the body's `message` field when present,
    /// otherwise from the status code.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let details = if body.is_empty() {
            None
        } else {
            serde_json::from_slice::<serde_json::Value>(body).ok().or_else(|| {
                Some(serde_json::Value::String(
                    String::from_utf8_lossy(body).into_owned(),
                ))
            })
        };

        let message = details
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

        Self {
            message,
            status: Some(status.as_u16()),
            details,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Could not reach the server".to_string()
        } else {
            let text = err.to_string();
            if text.is_empty() {
                REQUEST_FAILED.to_string()
            } else {
                text
            }
        };

        Self {
            message,
            status: err.status().map(|s| s.as_u16()),
            details: None,
        }
    }
}
