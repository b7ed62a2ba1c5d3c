//! Application service: configuration rotation through new releases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through the injected [`Transport`].

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::application::ports::Transport;
use crate::application::services::resources;
use crate::application::services::require;
use crate::domain::formation;
use crate::domain::release::next_release;

/// Result of removing superseded formations. Never an error: failures are
/// collected here and logged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Release ids whose formations were deleted.
    pub deleted: Vec<String>,
    /// Release ids whose formations could not be deleted, with the reason.
    pub failed: Vec<(String, String)>,
    /// Set when the formation list itself could not be fetched.
    pub listing_error: Option<String>,
    /// Set when old formations were left in place because none is bound to
    /// the new release yet.
    pub deferred: Option<String>,
}

impl CleanupReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.listing_error.is_none() && self.deferred.is_none()
    }
}

/// Outcome of [`set_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigChange {
    /// Id of the release now current for the app.
    pub release_id: String,
    pub cleanup: CleanupReport,
}

/// Environment of the app's current release; empty when it has none.
///
/// # Errors
///
/// Returns an error if `app_id` is blank or the release cannot be fetched.
pub async fn get_config(
    transport: &impl Transport,
    app_id: &str,
) -> Result<BTreeMap<String, String>> {
    require("app_id", app_id)?;
    Ok(resources::current_release(transport, app_id)
        .await?
        .map(|r| r.env)
        .unwrap_or_default())
}

/// Merge `patch` into the app's environment by creating a new release and
/// making it current, then delete formations bound to older releases.
///
/// # Errors
///
/// Returns an error if `app_id` is blank, if creating the release or moving
/// the app's release pointer fails, or if the created release has no id.
/// Cleanup failures are reported in [`ConfigChange::cleanup`] instead.
pub async fn set_config(
    transport: &impl Transport,
    app_id: &str,
    patch: &BTreeMap<String, String>,
) -> Result<ConfigChange> {
    require("app_id", app_id)?;
    let current = resources::current_release(transport, app_id).await?;
    let release = next_release(current, patch);

    let release_id = resources::create_release(transport, &release).await?;
    resources::set_app_release(transport, app_id, &release_id).await?;
    info!(app_id, release_id = %release_id, keys = patch.len(), "release rotated");

    let cleanup = delete_old_formations(transport, app_id, &release_id).await;
    Ok(ConfigChange { release_id, cleanup })
}

/// Delete every formation of the app not bound to `keep_release_id`, but
/// only once a formation bound to it is listed.
///
/// Best-effort: a listing failure, a deferral, or an individual delete
/// failure is logged and recorded, and the remaining deletions still run.
pub async fn delete_old_formations(
    transport: &impl Transport,
    app_id: &str,
    keep_release_id: &str,
) -> CleanupReport {
    let mut report = CleanupReport::default();
    let formations = match resources::list_formations(transport, app_id).await {
        Ok(f) => f,
        Err(e) => {
            warn!(app_id, error = %e, "cannot list formations for cleanup");
            report.listing_error = Some(e.to_string());
            return report;
        }
    };

    let Some(old) = formation::superseded(&formations, keep_release_id) else {
        warn!(
            app_id,
            keep_release_id,
            old = formations.len(),
            "no formation for the new release yet, keeping old formations"
        );
        report.deferred = Some(format!(
            "no formation bound to release {keep_release_id}"
        ));
        return report;
    };

    for release_id in old {
        match resources::delete_formation(transport, app_id, release_id).await {
            Ok(()) => report.deleted.push(release_id.to_string()),
            Err(e) => {
                warn!(app_id, release_id, error = %e, "cannot delete superseded formation");
                report.failed.push((release_id.to_string(), e.to_string()));
            }
        }
    }
    report
}
