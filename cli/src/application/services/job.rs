//! Application service: one-off commands and the job poll loop.

use std::time::Duration;

use anyhow::Result;
use flynn_api_types::NewJob;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::ports::{ProgressReporter, Transport};
use crate::application::services::{require, resources};
use crate::domain::config::ClientTuning;
use crate::domain::error::ClientError;
use crate::domain::job::{JobObservation, tokenize};

/// How often and how long to poll a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_polls: u32,
}

impl From<&ClientTuning> for PollPolicy {
    fn from(tuning: &ClientTuning) -> Self {
        Self {
            interval: tuning.job_poll_interval,
            max_polls: tuning.max_job_polls,
        }
    }
}

/// A job that exited with status 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSuccess {
    pub job_id: String,
    /// Number of status fetches it took to observe the exit.
    pub polls: u32,
}

/// Run `command` as a job against the app's current release and wait for it.
///
/// # Errors
///
/// - precondition errors for a blank app id, an empty command, or an app
///   without a release (no request is made for the first two);
/// - [`ClientError::RemoteCall`] with the raw response if submission fails;
/// - [`ClientError::JobFailure`] with the job's log on a non-zero exit;
/// - [`ClientError::PollTimeout`] when the poll bound is exhausted.
pub async fn run_command(
    transport: &impl Transport,
    policy: PollPolicy,
    app_id: &str,
    command: &str,
    reporter: &impl ProgressReporter,
) -> Result<JobSuccess> {
    require("app_id", app_id)?;
    let argv = tokenize(command)?;

    let release = resources::current_release(transport, app_id)
        .await?
        .ok_or_else(|| ClientError::NoRelease(app_id.to_string()))?;
    let release_id = release.id.ok_or_else(|| ClientError::MalformedResponse {
        what: "release",
        detail: "current release has no id".to_string(),
    })?;

    let job = resources::create_job(
        transport,
        app_id,
        &NewJob {
            release: release_id,
            cmd: argv,
            release_env: true,
        },
    )
    .await?;
    info!(app_id, job_id = %job.id, "job submitted");
    reporter.step(&format!("job {} submitted", job.id));

    wait_for_job(transport, policy, app_id, &job.id, reporter).await
}

/// Poll a job until it reaches a terminal state or the poll bound runs out.
///
/// Pending, running, and not-yet-visible jobs all keep the loop going; only
/// an observed exit status (or a failed state) ends it early.
///
/// # Errors
///
/// See [`run_command`].
pub async fn wait_for_job(
    transport: &impl Transport,
    policy: PollPolicy,
    app_id: &str,
    job_id: &str,
    reporter: &impl ProgressReporter,
) -> Result<JobSuccess> {
    let mut last = JobObservation::Unknown;

    for poll in 1..=policy.max_polls {
        let job = resources::get_job(transport, app_id, job_id).await?;
        last = JobObservation::classify(job.as_ref());
        debug!(job_id, poll, state = %last, "job polled");

        match last {
            JobObservation::Succeeded => {
                reporter.success(&format!("job {job_id} succeeded"));
                return Ok(JobSuccess {
                    job_id: job_id.to_string(),
                    polls: poll,
                });
            }
            JobObservation::Failed { exit_status, state } => {
                let log = match resources::app_log(transport, app_id, Some(job_id)).await {
                    Ok(log) => log,
                    Err(e) => format!("(log unavailable: {e})"),
                };
                return Err(ClientError::JobFailure {
                    job_id: job_id.to_string(),
                    exit_status: exit_status.map_or_else(|| "none".to_string(), |c| c.to_string()),
                    state: state.map_or_else(|| "unknown".to_string(), |s| s.to_string()),
                    log,
                }
                .into());
            }
            JobObservation::Unknown | JobObservation::Pending { .. } => {}
        }

        if poll < policy.max_polls {
            reporter.step(&format!("job {job_id}: {last}"));
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(ClientError::PollTimeout {
        job_id: job_id.to_string(),
        polls: policy.max_polls,
        last_state: last.to_string(),
    }
    .into())
}
