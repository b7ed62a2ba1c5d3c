//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator, so
//! callers can still `downcast_ref` to branch on the kind of failure.

use thiserror::Error;

// ── Client errors ─────────────────────────────────────────────────────────────

/// Failures raised by control-plane operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Missing {0}!")]
    MissingArgument(&'static str),

    #[error("Unknown process type '{0}' (expected one of: web, worker, clock)")]
    UnknownProcessType(String),

    #[error("Command is empty")]
    EmptyCommand,

    #[error("App '{0}' has no release to run against")]
    NoRelease(String),

    #[error("No route for domain '{domain}' on service '{service}'")]
    RouteNotFound { service: String, domain: String },

    #[error("Failed to {step}: HTTP {status}\n{body}")]
    RemoteCall {
        step: &'static str,
        status: u16,
        body: String,
    },

    #[error("Job {job_id} did not finish after {polls} polls (last state: {last_state})")]
    PollTimeout {
        job_id: String,
        polls: u32,
        last_state: String,
    },

    #[error("Job {job_id} failed with status {exit_status} ({state})\n{log}")]
    JobFailure {
        job_id: String,
        exit_status: String,
        state: String,
        log: String,
    },

    #[error("Malformed {what} response: {detail}")]
    MalformedResponse { what: &'static str, detail: String },
}

impl ClientError {
    /// `true` for errors raised before any remote call was made.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument(_)
                | Self::UnknownProcessType(_)
                | Self::EmptyCommand
                | Self::NoRelease(_)
                | Self::RouteNotFound { .. }
        )
    }

    /// Short machine-readable code for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingArgument(_)
            | Self::UnknownProcessType(_)
            | Self::EmptyCommand
            | Self::NoRelease(_)
            | Self::RouteNotFound { .. } => "PRECONDITION",
            Self::RemoteCall { .. } => "REMOTE_CALL_FAILED",
            Self::PollTimeout { .. } => "POLL_TIMEOUT",
            Self::JobFailure { .. } => "JOB_FAILED",
            Self::MalformedResponse { .. } => "MALFORMED_RESPONSE",
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while building a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing host! Pass --host or set FLYNN_HOST.")]
    MissingHost,

    #[error("Missing admin username! Pass --username or set FLYNN_USERNAME.")]
    MissingUsername,

    #[error("Missing admin password! Pass --password or set FLYNN_PASSWORD.")]
    MissingPassword,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
