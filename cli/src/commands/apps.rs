//! `flynn apps` — create, list, destroy and restart apps.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::output::json;

/// Apps subcommands.
#[derive(Subcommand)]
pub enum AppsCommand {
    /// Create an app
    Create {
        /// App name
        name: String,
    },
    /// List apps
    List,
    /// Delete an app
    Destroy {
        /// App id
        app_id: String,
    },
    /// Restart every process of an app (takes it down briefly)
    Restart {
        /// App id
        app_id: String,
        /// Name shown in progress output (defaults to the id)
        #[arg(long)]
        name: Option<String>,
    },
}

/// Run the apps command.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the operation fails.
pub async fn run(app: &AppContext, cmd: AppsCommand) -> Result<ExitCode> {
    match cmd {
        AppsCommand::Create { name } => create(app, &name).await,
        AppsCommand::List => list(app).await,
        AppsCommand::Destroy { app_id } => destroy(app, &app_id).await,
        AppsCommand::Restart { app_id, name } => {
            let name = name.unwrap_or_else(|| app_id.clone());
            restart(app, &app_id, &name).await
        }
    }
}

async fn create(app: &AppContext, name: &str) -> Result<ExitCode> {
    let client = app.client()?;
    let created = client.create_app(name).await?;
    if app.is_json() {
        json::print(&created)?;
    } else {
        app.output.success(&format!("Created {}", created.name));
        app.output.field("id", &created.id);
    }
    Ok(ExitCode::SUCCESS)
}

async fn list(app: &AppContext) -> Result<ExitCode> {
    let client = app.client()?;
    let apps = client.list_apps().await?;
    if app.is_json() {
        json::print(&apps)?;
        return Ok(ExitCode::SUCCESS);
    }
    let rows: Vec<_> = apps.iter().map(|a| (a.id.clone(), a.name.clone())).collect();
    app.output.listing("Apps", &rows, "No apps");
    Ok(ExitCode::SUCCESS)
}

async fn destroy(app: &AppContext, app_id: &str) -> Result<ExitCode> {
    if !app.confirm(&format!("Destroy app {app_id}?"), app.non_interactive)? {
        app.output.info("Aborted");
        return Ok(ExitCode::FAILURE);
    }
    let client = app.client()?;
    client.destroy_app(app_id).await?;
    if app.is_json() {
        json::print(&serde_json::json!({ "destroyed": app_id }))?;
    } else {
        app.output.success(&format!("Destroyed {app_id}"));
    }
    Ok(ExitCode::SUCCESS)
}

async fn restart(app: &AppContext, app_id: &str, name: &str) -> Result<ExitCode> {
    let client = app.client()?;
    let report = client.restart_app(app_id, name, &app.reporter()).await?;
    if app.is_json() {
        json::print(&report)?;
    } else if report.steps.is_empty() {
        app.output.info(&format!("{name} has no running processes"));
    } else if !report.succeeded() {
        app.output.error(&format!("{name} restart incomplete"));
    }
    Ok(if report.succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
