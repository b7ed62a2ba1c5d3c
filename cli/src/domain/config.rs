//! Domain types and validators for client configuration.
//!
//! Pure functions only, no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_VERIFY_SSL: bool = false;
pub const DEFAULT_JOB_POLL_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_MAX_JOB_POLLS: u32 = 100;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// ── Settings file schema ─────────────────────────────────────────────────────

/// Settings stored in `~/.flynn/config.yaml`.
///
/// Every field is optional so that flags and environment variables can fill
/// in whatever the file leaves out.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    /// Cluster domain, e.g. `demo.flynnhub.com`.
    pub host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Overrides `https://controller.{host}`.
    pub controller_url: Option<String>,
    /// Overrides `https://router.{host}`.
    pub router_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub verify_ssl: Option<bool>,
    pub job_poll_interval_secs: Option<u64>,
    pub max_job_polls: Option<u32>,
    pub max_retries: Option<u32>,
}

impl ClientSettings {
    /// Layer `other` on top of `self`: any field set in `other` wins.
    #[must_use]
    pub fn overlay(self, other: ClientSettings) -> ClientSettings {
        ClientSettings {
            host: other.host.or(self.host),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            controller_url: other.controller_url.or(self.controller_url),
            router_url: other.router_url.or(self.router_url),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            verify_ssl: other.verify_ssl.or(self.verify_ssl),
            job_poll_interval_secs: other.job_poll_interval_secs.or(self.job_poll_interval_secs),
            max_job_polls: other.max_job_polls.or(self.max_job_polls),
            max_retries: other.max_retries.or(self.max_retries),
        }
    }
}

// ── Validated configuration ──────────────────────────────────────────────────

/// Admin credential pair sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Base URLs of the two services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub controller: String,
    pub router: String,
}

impl Endpoints {
    /// Derive the conventional service URLs for a cluster host.
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        Self {
            controller: format!("https://controller.{host}"),
            router: format!("https://router.{host}"),
        }
    }
}

/// Client-wide tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTuning {
    pub request_timeout: Duration,
    pub verify_ssl: bool,
    pub job_poll_interval: Duration,
    pub max_job_polls: u32,
    /// Connection-level retries per request (0 disables).
    pub max_retries: u32,
}

impl Default for ClientTuning {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            verify_ssl: DEFAULT_VERIFY_SSL,
            job_poll_interval: Duration::from_secs(DEFAULT_JOB_POLL_INTERVAL_SECS),
            max_job_polls: DEFAULT_MAX_JOB_POLLS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Validated client configuration. Construct with [`ClientConfig::new`] or
/// [`ClientConfig::from_settings`]; there is no way to obtain a partially
/// configured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    /// `None` only when built in offline (testing) mode.
    pub credentials: Option<Credentials>,
    pub endpoints: Endpoints,
    pub tuning: ClientTuning,
}

impl ClientConfig {
    /// Build a configuration from raw connection values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHost`] when `host` is absent or blank,
    /// and a missing-credential error when not `offline` and either half of
    /// the credential pair is absent.
    pub fn new(
        host: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
        offline: bool,
    ) -> Result<Self> {
        let host = non_blank(host).ok_or(ConfigError::MissingHost)?;
        let credentials = match (non_blank(username), non_blank(password)) {
            (Some(u), Some(p)) => Some(Credentials {
                username: u.to_string(),
                password: p.to_string(),
            }),
            _ if offline => None,
            (None, _) => return Err(ConfigError::MissingUsername.into()),
            (Some(_), None) => return Err(ConfigError::MissingPassword.into()),
        };
        Ok(Self {
            host: host.to_string(),
            credentials,
            endpoints: Endpoints::for_host(host),
            tuning: ClientTuning::default(),
        })
    }

    /// Build a configuration from merged settings.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::new`], plus [`ConfigError::InvalidValue`] for a
    /// zero poll bound.
    pub fn from_settings(settings: &ClientSettings, offline: bool) -> Result<Self> {
        let mut config = Self::new(
            settings.host.as_deref(),
            settings.username.as_deref(),
            settings.password.as_deref(),
            offline,
        )?;
        if let Some(url) = non_blank(settings.controller_url.as_deref()) {
            config.endpoints.controller = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = non_blank(settings.router_url.as_deref()) {
            config.endpoints.router = url.trim_end_matches('/').to_string();
        }
        config.tuning = tuning_from(settings)?;
        Ok(config)
    }

    /// Replace the tunables.
    #[must_use]
    pub fn with_tuning(mut self, tuning: ClientTuning) -> Self {
        self.tuning = tuning;
        self
    }
}

fn tuning_from(settings: &ClientSettings) -> Result<ClientTuning> {
    let defaults = ClientTuning::default();
    if settings.max_job_polls == Some(0) {
        return Err(ConfigError::InvalidValue {
            key: "max_job_polls".to_string(),
            value: "0".to_string(),
        }
        .into());
    }
    Ok(ClientTuning {
        request_timeout: settings
            .request_timeout_secs
            .map_or(defaults.request_timeout, Duration::from_secs),
        verify_ssl: settings.verify_ssl.unwrap_or(defaults.verify_ssl),
        job_poll_interval: settings
            .job_poll_interval_secs
            .map_or(defaults.job_poll_interval, Duration::from_secs),
        max_job_polls: settings.max_job_polls.unwrap_or(defaults.max_job_polls),
        max_retries: settings.max_retries.unwrap_or(defaults.max_retries),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
