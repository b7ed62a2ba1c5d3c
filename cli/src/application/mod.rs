//! Application layer — port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod client;
pub mod ports;
pub mod services;

pub use client::FlynnClient;
pub use ports::{
    ApiRequest, ApiResponse, Method, ProgressReporter, Service, SettingsStore, Transport,
};
