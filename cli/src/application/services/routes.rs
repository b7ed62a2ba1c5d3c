//! Application service: TLS domains on the router.
//!
//! Single-request CRUD; the only read-modify-write is locating a route by
//! `(service, domain)` before updating or removing it.

use anyhow::Result;
use flynn_api_types::Route;
use tracing::info;

use crate::application::ports::{ApiRequest, Service, Transport};
use crate::application::services::{require, resources};
use crate::domain::error::ClientError;
use crate::domain::paths;
use crate::domain::route::{self, TlsBinding};

/// # Errors
///
/// Returns an error if the router rejects the request.
pub async fn list_routes(transport: &impl Transport) -> Result<Vec<Route>> {
    resources::list_routes(transport).await
}

/// Route `domain` to the app's web service with TLS termination.
///
/// # Errors
///
/// Returns an error if an argument is blank or the router rejects the route.
pub async fn ssl_domain_create(
    transport: &impl Transport,
    app_name: &str,
    domain: &str,
    tls: &TlsBinding<'_>,
) -> Result<()> {
    require_tls(app_name, domain, tls)?;
    let body = route::new_route(app_name, domain, tls);
    transport
        .send(Service::Router, ApiRequest::post(paths::ROUTES, &body)?)
        .await?
        .require_success("create route")?;
    info!(app_name, domain, "route created");
    Ok(())
}

/// Move an existing route from `old_domain` to `new_domain` and replace its
/// TLS material.
///
/// # Errors
///
/// Returns an error if an argument is blank, no route matches, or the router
/// rejects the update.
pub async fn ssl_domain_update(
    transport: &impl Transport,
    app_name: &str,
    old_domain: &str,
    new_domain: &str,
    tls: &TlsBinding<'_>,
) -> Result<()> {
    require_tls(app_name, old_domain, tls)?;
    require("new_domain", new_domain)?;
    let (route_id, existing) = locate(transport, app_name, old_domain).await?;
    let updated = route::rebind(existing, new_domain, tls);
    transport
        .send(
            Service::Router,
            ApiRequest::put(paths::route(&route_id), &updated)?,
        )
        .await?
        .require_success("update route")?;
    info!(app_name, old_domain, new_domain, "route updated");
    Ok(())
}

/// Remove the route serving `domain` for the app.
///
/// # Errors
///
/// Returns an error if an argument is blank, no route matches, or the router
/// rejects the delete.
pub async fn domain_remove(transport: &impl Transport, app_name: &str, domain: &str) -> Result<()> {
    require("app_name", app_name)?;
    require("domain", domain)?;
    let (route_id, _) = locate(transport, app_name, domain).await?;
    transport
        .send(Service::Router, ApiRequest::delete(paths::route(&route_id)))
        .await?
        .require_success("delete route")?;
    info!(app_name, domain, "route removed");
    Ok(())
}

fn require_tls(app_name: &str, domain: &str, tls: &TlsBinding<'_>) -> Result<()> {
    require("app_name", app_name)?;
    require("domain", domain)?;
    require("certificate", tls.certificate)?;
    require("private_key", tls.private_key)?;
    Ok(())
}

async fn locate(transport: &impl Transport, app_name: &str, domain: &str) -> Result<(String, Route)> {
    let service = route::web_service(app_name);
    let routes = resources::list_routes(transport).await?;
    let found = route::find(&routes, &service, domain)
        .cloned()
        .ok_or_else(|| ClientError::RouteNotFound {
            service: service.clone(),
            domain: domain.to_string(),
        })?;
    let id = found.id.clone().ok_or_else(|| ClientError::MalformedResponse {
        what: "route",
        detail: format!("route for {domain} has no id"),
    })?;
    Ok((id, found))
}
