//! `flynn config` — show and set an app's environment.

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::domain::release::parse_env_assignment;
use crate::output::json;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the environment of the app's current release
    Get {
        /// App id
        app_id: String,
    },
    /// Set environment variables (creates a new release)
    Set {
        /// App id
        app_id: String,
        /// Assignments of the form KEY=VALUE
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if an assignment is malformed, the client cannot be
/// built, or the operation fails.
pub async fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Get { app_id } => get(app, &app_id).await,
        ConfigCommand::Set {
            app_id,
            assignments,
        } => set(app, &app_id, &assignments).await,
    }
}

async fn get(app: &AppContext, app_id: &str) -> Result<ExitCode> {
    let env = app.client()?.get_config(app_id).await?;
    if app.is_json() {
        json::print(&env)?;
        return Ok(ExitCode::SUCCESS);
    }
    let rows: Vec<_> = env.into_iter().collect();
    app.output.listing(&format!("Config of {app_id}"), &rows, "No config set");
    Ok(ExitCode::SUCCESS)
}

async fn set(app: &AppContext, app_id: &str, assignments: &[String]) -> Result<ExitCode> {
    let patch = assignments
        .iter()
        .map(String::as_str)
        .map(parse_env_assignment)
        .collect::<Result<BTreeMap<_, _>>>()?;

    let change = app.client()?.set_config(app_id, &patch).await?;
    if app.is_json() {
        json::print(&change)?;
        return Ok(ExitCode::SUCCESS);
    }
    for key in patch.keys() {
        app.output.success(&format!("Set {key}"));
    }
    app.output.field("release", &change.release_id);
    if let Some(reason) = &change.cleanup.deferred {
        app.output.warn(&format!("Old formations kept: {reason}"));
    } else if !change.cleanup.is_clean() {
        app.output
            .warn("Some superseded formations could not be removed (see logs)");
    }
    Ok(ExitCode::SUCCESS)
}
