//! The only component that talks to the remote service.
use std::time::Duration;

use alertfeed_core::UserId;
use feed_logging::{feed_debug, feed_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::GatewayError;

/// Header carrying the caller's identity on every call.
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One JSON call relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Sent as [`USER_ID_HEADER`] when set.
    pub user_id: Option<UserId>,
}

impl GatewayRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            user_id: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn caller(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// Performs the call and returns the decoded JSON body (`Null` for an empty body).
    async fn send(&self, request: GatewayRequest) -> Result<Value, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn url_for(&self, request: &GatewayRequest) -> Result<reqwest::Url, GatewayError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!("{base}{}", request.path))
            .map_err(|err| GatewayError::Network(format!("invalid url: {err}")))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn send(&self, request: GatewayRequest) -> Result<Value, GatewayError> {
        let url = self.url_for(&request)?;
        feed_debug!("{:?} {}", request.method, request.path);

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), url)
            .header(ACCEPT, "application/json");
        if let Some(user_id) = request.user_id {
            builder = builder.header(USER_ID_HEADER, user_id.to_string());
        }
        if let Some(body) = &request.body {
            let bytes =
                serde_json::to_vec(body).map_err(|err| GatewayError::Decode(err.to_string()))?;
            builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = error_message(&bytes).unwrap_or_default();
            feed_warn!(
                "{:?} {} failed with status {}",
                request.method,
                request.path,
                status.as_u16()
            );
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

/// Best-effort `{ "error": "..." }` extraction from a failure body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::Network(format!("request timed out: {err}"));
    }
    GatewayError::Network(err.to_string())
}
