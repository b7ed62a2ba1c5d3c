//! Job command tokenisation and poll-state classification.
//!
//! Pure functions only, no I/O, no async.

use std::fmt;

use flynn_api_types::{Job, JobState};

use crate::domain::error::ClientError;

/// Split a command line on whitespace into an argument vector.
///
/// # Errors
///
/// Returns [`ClientError::EmptyCommand`] when nothing but whitespace is given.
pub fn tokenize(command: &str) -> Result<Vec<String>, ClientError> {
    let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    if argv.is_empty() {
        return Err(ClientError::EmptyCommand);
    }
    Ok(argv)
}

/// What one poll of a job tells us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobObservation {
    /// The job could not be fetched (not yet visible, or a transient error).
    Unknown,
    /// The job exists but has not produced an exit status.
    Pending { state: Option<JobState> },
    /// Terminal with exit status 0.
    Succeeded,
    /// Terminal with a non-zero exit status, or a failed/crashed state.
    Failed {
        exit_status: Option<i32>,
        state: Option<JobState>,
    },
}

impl JobObservation {
    /// Classify a fetched job. `None` means the fetch did not succeed.
    ///
    /// A missing `exit_status` means "still pending" unless the state itself
    /// is a failure; only a present `0` counts as success.
    #[must_use]
    pub fn classify(job: Option<&Job>) -> Self {
        let Some(job) = job else {
            return Self::Unknown;
        };
        match (job.exit_status, job.state) {
            (Some(0), _) => Self::Succeeded,
            (Some(code), state) => Self::Failed {
                exit_status: Some(code),
                state,
            },
            (None, Some(state)) if state.is_failed() => Self::Failed {
                exit_status: None,
                state: Some(state),
            },
            (None, state) => Self::Pending { state },
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }
}

impl fmt::Display for JobObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("not visible"),
            Self::Pending { state: Some(s) } => write!(f, "{s}"),
            Self::Pending { state: None } => f.write_str("pending"),
            Self::Succeeded => f.write_str("succeeded"),
            Self::Failed {
                exit_status: Some(code),
                ..
            } => write!(f, "exited {code}"),
            Self::Failed {
                exit_status: None,
                state,
            } => match state {
                Some(s) => write!(f, "{s}"),
                None => f.write_str("failed"),
            },
        }
    }
}
