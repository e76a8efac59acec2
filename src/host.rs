use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use thiserror::Error;

use crate::credentials::Credentials;
use crate::error::ConnectorError;

/// One fully composed outbound call: absolute URI, headers, query and body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub qs: HashMap<String, Value>,
    pub body: Option<Value>,
}

/// Failure reported by the HTTP helper. `status` is None for transport-level
/// failures; `payload` carries the backend's structured error body when it
/// parsed as JSON.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct HttpError {
    pub status: Option<u16>,
    pub message: String,
    pub payload: Option<Value>,
}

impl From<HttpError> for ConnectorError {
    fn from(err: HttpError) -> Self {
        ConnectorError::Api {
            message: err.message,
            status: err.status,
            payload: err.payload,
        }
    }
}

/// The host's HTTP helper seam. The connector carries no client policy of its
/// own (no retries, timeouts or cancellation); hosts substitute their own
/// instrumented implementation here.
#[async_trait]
pub trait HttpHelper: Send + Sync {
    async fn request(&self, request: HttpRequest) -> Result<Value, HttpError>;
}

/// Default helper backed by reqwest, JSON in and out.
pub struct ReqwestHelper {
    client: reqwest::Client,
}

impl ReqwestHelper {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestHelper {
    fn default() -> Self {
        Self::new()
    }
}

fn qs_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl HttpHelper for ReqwestHelper {
    async fn request(&self, request: HttpRequest) -> Result<Value, HttpError> {
        let mut builder = self.client.request(request.method.clone(), &request.uri);

        for (k, v) in &request.headers {
            builder = builder.header(k, v);
        }

        let query: Vec<(String, String)> = request
            .qs
            .iter()
            .map(|(k, v)| (k.clone(), qs_value(v)))
            .collect();
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| HttpError {
            status: None,
            message: e.to_string(),
            payload: None,
        })?;

        let status = resp.status();
        let bytes = resp.bytes().await.unwrap_or_default();

        if status.is_success() {
            let value: Value = match serde_json::from_slice(&bytes) {
                Ok(v) => v,
                Err(_) => Value::String(String::from_utf8_lossy(&bytes).to_string()),
            };
            Ok(value)
        } else {
            Err(HttpError {
                status: Some(status.as_u16()),
                message: format!("HTTP Error: {}", status),
                payload: serde_json::from_slice(&bytes).ok(),
            })
        }
    }
}

/// Input record handed over by the host: the item's resolved parameter object.
#[derive(Debug, Clone)]
pub struct InputItem {
    pub params: Value,
}

impl InputItem {
    pub fn new(params: Value) -> Self {
        Self { params }
    }
}

/// Per-item result envelope returned to the host. Exactly one of success
/// (backend JSON in `json`) or error (`error` set, `json` empty), always
/// tagged with the originating input index.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionItem {
    pub json: Value,
    pub source_index: usize,
    pub error: Option<String>,
}

impl ExecutionItem {
    pub fn success(json: Value, source_index: usize) -> Self {
        Self {
            json,
            source_index,
            error: None,
        }
    }

    pub fn failure(message: String, source_index: usize) -> Self {
        Self {
            json: json!({}),
            source_index,
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Explicit execution context passed into the executor: resolved credentials
/// plus the host's continue-on-failure switch. No ambient host state.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub credentials: Credentials,
    pub continue_on_fail: bool,
}

impl ExecutionContext {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            continue_on_fail: false,
        }
    }

    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }
}
