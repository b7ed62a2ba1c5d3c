//! Wire types shared by the Flynn controller and router clients.
//!
//! Every resource keeps unknown fields in a flattened `extra` map so that a
//! read-modify-write cycle never drops data the client does not model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Apps ──────────────────────────────────────────────────────────────────────

/// An application registered with the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /apps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApp {
    pub name: String,
}

// ── Releases ──────────────────────────────────────────────────────────────────

/// An immutable snapshot of an app's configuration.
///
/// `id` is absent on a release that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `PUT /apps/{id}/release`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasePointer {
    pub id: String,
}

// ── Formations ────────────────────────────────────────────────────────────────

/// Desired process counts bound to a release.
///
/// The controller calls the bound release `release`, and the formation
/// listing uses that same value as the formation's address
/// (`/apps/{id}/formations/{release}`). There is no separate formation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    #[serde(rename = "release")]
    pub release_id: String,
    #[serde(default)]
    pub processes: BTreeMap<String, u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Jobs ──────────────────────────────────────────────────────────────────────

/// Body of `POST /apps/{id}/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
    pub release: String,
    pub cmd: Vec<String>,
    pub release_env: bool,
}

/// Remote job state as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Starting,
    Up,
    Stopping,
    Down,
    Crashed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// States from which the job will never report a zero exit status.
    #[must_use]
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Crashed | Self::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Starting => "starting",
            Self::Up => "up",
            Self::Stopping => "stopping",
            Self::Down => "down",
            Self::Crashed => "crashed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A one-off job as observed by polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default, rename = "release", skip_serializing_if = "Option::is_none")]
    pub release_id: Option<String>,
    #[serde(default)]
    pub cmd: Vec<String>,
    #[serde(default)]
    pub exit_status: Option<i32>,
    #[serde(default)]
    pub state: Option<JobState>,
}

// ── Routes ────────────────────────────────────────────────────────────────────

/// A router entry binding a domain to a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "default_route_type")]
    pub kind: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_key: Option<String>,
    #[serde(default)]
    pub sticky: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_route_type() -> String {
    "http".to_string()
}
