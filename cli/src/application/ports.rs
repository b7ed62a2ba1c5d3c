//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::config::ClientSettings;
use crate::domain::error::ClientError;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Which remote service a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Controller,
    Router,
}

/// HTTP verbs used against the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A request to one of the services. Paths are relative to the service base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized to JSON.
    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Post, path).with_body(body)
    }

    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized to JSON.
    pub fn put(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Put, path).with_body(body)
    }

    fn with_body(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).context("cannot serialize request body")?);
        Ok(self)
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true` when the body carries no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Decode the body, failing fast on missing or mistyped fields.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedResponse`] if the body is not valid
    /// JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self, what: &'static str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ClientError::MalformedResponse {
                what,
                detail: e.to_string(),
            }
            .into()
        })
    }

    /// Turn a non-success status into [`ClientError::RemoteCall`].
    ///
    /// # Errors
    ///
    /// Returns an error carrying `step`, the status, and the raw body.
    pub fn require_success(self, step: &'static str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(ClientError::RemoteCall {
            step,
            status: self.status,
            body: self.body,
        }
        .into())
    }
}

// ── Transport Port ────────────────────────────────────────────────────────────

/// Authenticated JSON requests against the controller and router.
///
/// A non-success HTTP status is a normal `Ok` response; `Err` is reserved for
/// requests that never produced one (connection, TLS, timeout).
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send a request and buffer the whole response body.
    async fn send(&self, service: Service, request: ApiRequest) -> Result<ApiResponse>;

    /// Send a request with `Accept: text/event-stream` and hand each body
    /// chunk to `sink` as it arrives.
    ///
    /// On a success status the returned body is empty (it went to `sink`);
    /// otherwise the body is buffered into the response and `sink` is never
    /// called.
    async fn stream(
        &self,
        service: Service,
        request: ApiRequest,
        sink: &mut (dyn FnMut(&[u8]) -> Result<()> + Send),
    ) -> Result<ApiResponse>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Settings Port ─────────────────────────────────────────────────────────────

/// Abstracts loading of persisted client settings.
pub trait SettingsStore {
    /// Load settings, returning defaults if none are stored.
    fn load(&self) -> Result<ClientSettings>;
    /// Location of the settings file.
    fn path(&self) -> Result<std::path::PathBuf>;
}
