//! Application services — use-case orchestration.
//!
//! Each service module implements a group of use-cases by composing domain
//! logic with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod apps;
pub mod formation;
pub mod job;
pub mod release;
pub mod resources;
pub mod routes;

use crate::domain::error::ClientError;

/// Reject a blank required argument before any request is made.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::MissingArgument(name));
    }
    Ok(())
}
