//! `FlynnClient`: one handle over every control-plane operation.
//!
//! Binds a validated [`ClientConfig`] to a [`Transport`]. Holds no remote
//! state: every call re-fetches what it needs.

use std::collections::BTreeMap;

use anyhow::Result;
use flynn_api_types::{App, Route};

use crate::application::ports::{ProgressReporter, Transport};
use crate::application::services::formation::{RestartReport, ScaleOutcome};
use crate::application::services::job::{JobSuccess, PollPolicy};
use crate::application::services::release::ConfigChange;
use crate::application::services::{apps, formation, job, release, routes};
use crate::domain::config::ClientConfig;
use crate::domain::route::TlsBinding;

pub struct FlynnClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> FlynnClient<T> {
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    fn poll_policy(&self) -> PollPolicy {
        PollPolicy::from(&self.config.tuning)
    }

    // ── Apps ──────────────────────────────────────────────────────────────────

    pub async fn create_app(&self, name: &str) -> Result<App> {
        apps::create_app(&self.transport, name).await
    }

    pub async fn destroy_app(&self, app_id: &str) -> Result<()> {
        apps::destroy_app(&self.transport, app_id).await
    }

    pub async fn list_apps(&self) -> Result<Vec<App>> {
        apps::list_apps(&self.transport).await
    }

    pub async fn restart_app(
        &self,
        app_id: &str,
        app_name: &str,
        reporter: &impl ProgressReporter,
    ) -> Result<RestartReport> {
        formation::restart_app(&self.transport, app_id, app_name, reporter).await
    }

    pub async fn get_logs(&self, app_id: &str) -> Result<String> {
        apps::get_logs(&self.transport, app_id).await
    }

    pub async fn follow_logs(
        &self,
        app_id: &str,
        sink: &mut (dyn FnMut(&[u8]) -> Result<()> + Send),
    ) -> Result<()> {
        apps::follow_logs(&self.transport, app_id, sink).await
    }

    // ── Jobs ──────────────────────────────────────────────────────────────────

    pub async fn run_command(
        &self,
        app_id: &str,
        command: &str,
        reporter: &impl ProgressReporter,
    ) -> Result<JobSuccess> {
        job::run_command(&self.transport, self.poll_policy(), app_id, command, reporter).await
    }

    // ── Config ────────────────────────────────────────────────────────────────

    pub async fn get_config(&self, app_id: &str) -> Result<BTreeMap<String, String>> {
        release::get_config(&self.transport, app_id).await
    }

    pub async fn set_config(
        &self,
        app_id: &str,
        patch: &BTreeMap<String, String>,
    ) -> Result<ConfigChange> {
        release::set_config(&self.transport, app_id, patch).await
    }

    // ── Scaling ───────────────────────────────────────────────────────────────

    pub async fn scale_process(
        &self,
        app_id: &str,
        process_type: &str,
        count: u32,
    ) -> Result<ScaleOutcome> {
        formation::scale_process(&self.transport, app_id, process_type, count).await
    }

    pub async fn scale_web(&self, app_id: &str, count: u32) -> Result<ScaleOutcome> {
        formation::scale_web(&self.transport, app_id, count).await
    }

    pub async fn scale_worker(&self, app_id: &str, count: u32) -> Result<ScaleOutcome> {
        formation::scale_worker(&self.transport, app_id, count).await
    }

    pub async fn scale_clock(&self, app_id: &str, count: u32) -> Result<ScaleOutcome> {
        formation::scale_clock(&self.transport, app_id, count).await
    }

    // ── Routes ────────────────────────────────────────────────────────────────

    pub async fn list_routes(&self) -> Result<Vec<Route>> {
        routes::list_routes(&self.transport).await
    }

    pub async fn ssl_domain_create(
        &self,
        app_name: &str,
        domain: &str,
        tls: &TlsBinding<'_>,
    ) -> Result<()> {
        routes::ssl_domain_create(&self.transport, app_name, domain, tls).await
    }

    pub async fn ssl_domain_update(
        &self,
        app_name: &str,
        old_domain: &str,
        new_domain: &str,
        tls: &TlsBinding<'_>,
    ) -> Result<()> {
        routes::ssl_domain_update(&self.transport, app_name, old_domain, new_domain, tls).await
    }

    pub async fn domain_remove(&self, app_name: &str, domain: &str) -> Result<()> {
        routes::domain_remove(&self.transport, app_name, domain).await
    }
}
