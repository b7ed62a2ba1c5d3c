//! Resource accessors: single round-trip fetch/parse helpers.
//!
//! Each helper issues exactly one request through the injected
//! [`Transport`] and decodes the result. Multi-step workflows live in the
//! sibling service modules.

use anyhow::Result;
use flynn_api_types::{App, Formation, Job, NewJob, Release, ReleasePointer, Route};
use tracing::debug;

use crate::application::ports::{ApiRequest, Service, Transport};
use crate::domain::error::ClientError;
use crate::domain::paths;

// ── Apps ──────────────────────────────────────────────────────────────────────

pub async fn list_apps(transport: &impl Transport) -> Result<Vec<App>> {
    transport
        .send(Service::Controller, ApiRequest::get(paths::APPS))
        .await?
        .require_success("list apps")?
        .json("app list")
}

// ── Releases ──────────────────────────────────────────────────────────────────

/// Fetch the app's current release. `None` when the app has none yet.
pub async fn current_release(transport: &impl Transport, app_id: &str) -> Result<Option<Release>> {
    let resp = transport
        .send(Service::Controller, ApiRequest::get(paths::app_release(app_id)))
        .await?;
    if resp.status == 404 || (resp.is_success() && resp.is_empty()) {
        debug!(app_id, "app has no current release");
        return Ok(None);
    }
    let release = resp
        .require_success("fetch current release")?
        .json("release")?;
    Ok(Some(release))
}

/// Persist a new release and return its id.
pub async fn create_release(transport: &impl Transport, release: &Release) -> Result<String> {
    let created: Release = transport
        .send(Service::Controller, ApiRequest::post(paths::RELEASES, release)?)
        .await?
        .require_success("create release")?
        .json("release")?;
    created.id.ok_or_else(|| {
        ClientError::MalformedResponse {
            what: "release",
            detail: "created release has no id".to_string(),
        }
        .into()
    })
}

/// Point the app's current-release pointer at `release_id`.
pub async fn set_app_release(
    transport: &impl Transport,
    app_id: &str,
    release_id: &str,
) -> Result<()> {
    let body = ReleasePointer {
        id: release_id.to_string(),
    };
    transport
        .send(
            Service::Controller,
            ApiRequest::put(paths::app_release(app_id), &body)?,
        )
        .await?
        .require_success("set app release")?;
    Ok(())
}

// ── Formations ────────────────────────────────────────────────────────────────

pub async fn list_formations(transport: &impl Transport, app_id: &str) -> Result<Vec<Formation>> {
    transport
        .send(Service::Controller, ApiRequest::get(paths::app_formations(app_id)))
        .await?
        .require_success("list formations")?
        .json("formation list")
}

pub async fn get_formation(
    transport: &impl Transport,
    app_id: &str,
    release_id: &str,
) -> Result<Formation> {
    let req = ApiRequest::get(paths::app_formation(app_id, release_id)).with_query("expanded", "false");
    transport
        .send(Service::Controller, req)
        .await?
        .require_success("fetch formation")?
        .json("formation")
}

/// The first listed formation, re-fetched by its release id.
pub async fn current_formation(
    transport: &impl Transport,
    app_id: &str,
) -> Result<Option<Formation>> {
    let Some(first) = list_formations(transport, app_id).await?.into_iter().next() else {
        return Ok(None);
    };
    get_formation(transport, app_id, &first.release_id)
        .await
        .map(Some)
}

pub async fn put_formation(
    transport: &impl Transport,
    app_id: &str,
    formation: &Formation,
) -> Result<()> {
    let req = ApiRequest::put(paths::app_formation(app_id, &formation.release_id), formation)?;
    transport
        .send(Service::Controller, req)
        .await?
        .require_success("update formation")?;
    Ok(())
}

pub async fn delete_formation(
    transport: &impl Transport,
    app_id: &str,
    release_id: &str,
) -> Result<()> {
    transport
        .send(
            Service::Controller,
            ApiRequest::delete(paths::app_formation(app_id, release_id)),
        )
        .await?
        .require_success("delete formation")?;
    Ok(())
}

// ── Jobs ──────────────────────────────────────────────────────────────────────

pub async fn create_job(transport: &impl Transport, app_id: &str, job: &NewJob) -> Result<Job> {
    transport
        .send(Service::Controller, ApiRequest::post(paths::app_jobs(app_id), job)?)
        .await?
        .require_success("submit job to run command")?
        .json("job")
}

/// Fetch a job. A non-success status yields `None`: the job may simply not be
/// visible yet.
pub async fn get_job(transport: &impl Transport, app_id: &str, job_id: &str) -> Result<Option<Job>> {
    let resp = transport
        .send(Service::Controller, ApiRequest::get(paths::app_job(app_id, job_id)))
        .await?;
    if !resp.is_success() {
        debug!(app_id, job_id, status = resp.status, "job not visible");
        return Ok(None);
    }
    resp.json("job").map(Some)
}

/// Buffered log output, optionally restricted to one job.
pub async fn app_log(transport: &impl Transport, app_id: &str, job_id: Option<&str>) -> Result<String> {
    let mut req = ApiRequest::get(paths::app_log(app_id));
    if let Some(job_id) = job_id {
        req = req.with_query("job_id", job_id);
    }
    let resp = transport
        .send(Service::Controller, req)
        .await?
        .require_success("fetch logs")?;
    Ok(resp.body)
}

// ── Routes ────────────────────────────────────────────────────────────────────

pub async fn list_routes(transport: &impl Transport) -> Result<Vec<Route>> {
    transport
        .send(Service::Router, ApiRequest::get(paths::ROUTES))
        .await?
        .require_success("list routes")?
        .json("route list")
}
