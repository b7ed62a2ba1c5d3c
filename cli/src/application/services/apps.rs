//! Application service: app lifecycle and logs.

use anyhow::Result;
use flynn_api_types::{App, NewApp};
use tracing::info;

use crate::application::ports::{ApiRequest, Service, Transport};
use crate::application::services::{require, resources};
use crate::domain::paths;

/// Create an app named `name`.
///
/// # Errors
///
/// Returns an error if `name` is blank, the controller rejects the request
/// (the error carries the response body), or the reply lacks `id`/`name`.
pub async fn create_app(transport: &impl Transport, name: &str) -> Result<App> {
    require("app_name", name)?;
    let body = NewApp {
        name: name.to_string(),
    };
    let app: App = transport
        .send(Service::Controller, ApiRequest::post(paths::APPS, &body)?)
        .await?
        .require_success("create app")?
        .json("app")?;
    info!(app_id = %app.id, name = %app.name, "app created");
    Ok(app)
}

/// Delete an app.
///
/// # Errors
///
/// Returns an error if `app_id` is blank or the controller rejects the request.
pub async fn destroy_app(transport: &impl Transport, app_id: &str) -> Result<()> {
    require("app_id", app_id)?;
    transport
        .send(Service::Controller, ApiRequest::delete(paths::app(app_id)))
        .await?
        .require_success("destroy app")?;
    info!(app_id, "app destroyed");
    Ok(())
}

/// # Errors
///
/// Returns an error if the controller rejects the request or the list is malformed.
pub async fn list_apps(transport: &impl Transport) -> Result<Vec<App>> {
    resources::list_apps(transport).await
}

/// The app's log output, buffered in full.
///
/// # Errors
///
/// Returns an error if `app_id` is blank or the log cannot be fetched.
pub async fn get_logs(transport: &impl Transport, app_id: &str) -> Result<String> {
    require("app_id", app_id)?;
    resources::app_log(transport, app_id, None).await
}

/// Follow the app's log, handing each chunk to `sink` until the stream ends.
///
/// # Errors
///
/// Returns an error if `app_id` is blank, the stream cannot be opened, the
/// controller answers with a non-success status, or `sink` fails.
pub async fn follow_logs(
    transport: &impl Transport,
    app_id: &str,
    sink: &mut (dyn FnMut(&[u8]) -> Result<()> + Send),
) -> Result<()> {
    require("app_id", app_id)?;
    let req = ApiRequest::get(paths::app_log(app_id)).with_query("follow", "true");
    transport
        .stream(Service::Controller, req, sink)
        .await?
        .require_success("follow logs")?;
    Ok(())
}
