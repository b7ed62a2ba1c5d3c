//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, or `reqwest`. All functions are
//! synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod formation;
pub mod job;
pub mod paths;
pub mod process;
pub mod release;
pub mod route;

pub use config::{ClientConfig, ClientSettings, ClientTuning, Credentials, Endpoints};
pub use error::{ClientError, ConfigError};
pub use job::JobObservation;
pub use process::ProcessType;
