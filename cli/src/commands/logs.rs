//! `flynn logs` — print or follow an app's log.

use std::io::Write as _;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::output::json;

/// Arguments for the logs command.
#[derive(Args)]
pub struct LogsArgs {
    /// App id
    pub app_id: String,

    /// Stream logs in real time
    #[arg(short, long)]
    pub follow: bool,
}

/// Run the logs command.
///
/// # Errors
///
/// Returns an error if the log cannot be fetched or stdout is closed.
pub async fn run(app: &AppContext, args: LogsArgs) -> Result<ExitCode> {
    let client = app.client()?;

    if args.follow {
        let mut stdout = std::io::stdout();
        let mut sink = |chunk: &[u8]| -> Result<()> {
            stdout.write_all(chunk).context("cannot write to stdout")?;
            stdout.flush().context("cannot write to stdout")
        };
        client.follow_logs(&args.app_id, &mut sink).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let log = client.get_logs(&args.app_id).await?;
    if app.is_json() {
        json::print(&serde_json::json!({ "app_id": args.app_id, "log": log }))?;
    } else {
        print!("{log}");
    }
    Ok(ExitCode::SUCCESS)
}
