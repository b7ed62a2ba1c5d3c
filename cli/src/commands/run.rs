//! `flynn run` — run a one-off command against the current release.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::output::json;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// App id
    pub app_id: String,
    /// Command line to run; split on whitespace
    #[arg(required = true, last = true, value_name = "CMD")]
    pub command: Vec<String>,
}

/// Run the run command. Blocks until the job exits or the poll bound is hit.
///
/// # Errors
///
/// Returns an error if the job cannot be submitted, exits non-zero (the
/// error carries its log), or does not finish in time.
pub async fn run(app: &AppContext, args: RunArgs) -> Result<ExitCode> {
    let command = args.command.join(" ");
    let client = app.client()?;
    let success = client
        .run_command(&args.app_id, &command, &app.reporter())
        .await?;

    if app.is_json() {
        json::print(&success)?;
    } else {
        app.output.field("polls", &success.polls.to_string());
    }
    Ok(ExitCode::SUCCESS)
}
