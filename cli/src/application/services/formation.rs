//! Application service: process scaling and restarts.
//!
//! Every scale is a read-modify-write of the app's current formation. There
//! is no concurrency control: two callers scaling the same app race, and the
//! last write wins.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::application::ports::{ProgressReporter, Transport};
use crate::application::services::{require, resources};
use crate::domain::formation::{plan_scale, restart_plan};
use crate::domain::process::ProcessType;

/// Whether a scale request resulted in a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleOutcome {
    /// The formation was written back with the new count.
    Scaled,
    /// The type is absent from the formation or already at the count.
    Unchanged,
}

/// Scale `process_type` of the app's current formation to `count`.
///
/// The type is validated before any request is made.
///
/// # Errors
///
/// Returns an error if `app_id` is blank, the type is not `web`, `worker`
/// or `clock`, or fetching or writing the formation fails.
pub async fn scale_process(
    transport: &impl Transport,
    app_id: &str,
    process_type: &str,
    count: u32,
) -> Result<ScaleOutcome> {
    require("app_id", app_id)?;
    let process: ProcessType = process_type.parse()?;
    scale(transport, app_id, process, count).await
}

/// # Errors
///
/// See [`scale_process`].
pub async fn scale_web(transport: &impl Transport, app_id: &str, count: u32) -> Result<ScaleOutcome> {
    require("app_id", app_id)?;
    scale(transport, app_id, ProcessType::Web, count).await
}

/// # Errors
///
/// See [`scale_process`].
pub async fn scale_worker(
    transport: &impl Transport,
    app_id: &str,
    count: u32,
) -> Result<ScaleOutcome> {
    require("app_id", app_id)?;
    scale(transport, app_id, ProcessType::Worker, count).await
}

/// # Errors
///
/// See [`scale_process`].
pub async fn scale_clock(
    transport: &impl Transport,
    app_id: &str,
    count: u32,
) -> Result<ScaleOutcome> {
    require("app_id", app_id)?;
    scale(transport, app_id, ProcessType::Clock, count).await
}

pub(crate) async fn scale(
    transport: &impl Transport,
    app_id: &str,
    process: ProcessType,
    count: u32,
) -> Result<ScaleOutcome> {
    let Some(current) = resources::current_formation(transport, app_id).await? else {
        return Ok(ScaleOutcome::Unchanged);
    };
    let Some(next) = plan_scale(&current, process, count) else {
        return Ok(ScaleOutcome::Unchanged);
    };
    resources::put_formation(transport, app_id, &next).await?;
    info!(app_id, process = %process, count, "formation scaled");
    Ok(ScaleOutcome::Scaled)
}

// ── Restart ───────────────────────────────────────────────────────────────────

/// One scale call of a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartStep {
    pub process: ProcessType,
    pub count: u32,
    /// `None` when the step succeeded.
    pub error: Option<String>,
}

/// Outcome of [`restart_app`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestartReport {
    pub app_name: String,
    pub steps: Vec<RestartStep>,
}

impl RestartReport {
    /// `true` only if every scale call succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.error.is_none())
    }
}

/// Force every process of the app to respawn by scaling each type to zero
/// and back, one type at a time.
///
/// This takes the app down. A failing step is recorded and the sequence
/// carries on, so the report always covers every planned step.
///
/// # Errors
///
/// Returns an error if an argument is blank, the current formation cannot be
/// read, or it contains a process type that cannot be scaled. No scale call
/// is made in those cases.
pub async fn restart_app(
    transport: &impl Transport,
    app_id: &str,
    app_name: &str,
    reporter: &impl ProgressReporter,
) -> Result<RestartReport> {
    require("app_id", app_id)?;
    require("app_name", app_name)?;

    let processes = resources::current_formation(transport, app_id)
        .await?
        .map(|f| f.processes)
        .unwrap_or_default();
    let plan = restart_plan(&processes)?;

    let mut steps = Vec::with_capacity(plan.len());
    for step in plan {
        reporter.step(&format!("scaling {app_name} {} to {}", step.process, step.count));
        let error = match scale(transport, app_id, step.process, step.count).await {
            Ok(_) => None,
            Err(e) => {
                warn!(app_id, process = %step.process, count = step.count, error = %e, "restart step failed");
                reporter.warn(&format!("{} -> {}: {e}", step.process, step.count));
                Some(e.to_string())
            }
        };
        steps.push(RestartStep {
            process: step.process,
            count: step.count,
            error,
        });
    }

    let report = RestartReport {
        app_name: app_name.to_string(),
        steps,
    };
    if report.succeeded() {
        reporter.success(&format!("{app_name} restarted"));
    }
    Ok(report)
}
