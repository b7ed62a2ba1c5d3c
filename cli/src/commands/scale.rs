//! `flynn scale` — set process counts on the current formation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::application::services::formation::ScaleOutcome;
use crate::domain::process::{ProcessType, parse_scale_arg};
use crate::output::{json, progress};

/// Arguments for the scale command.
#[derive(Args)]
pub struct ScaleArgs {
    /// App id
    pub app_id: String,
    /// Process counts of the form TYPE=COUNT (web, worker, clock)
    #[arg(required = true, value_name = "TYPE=COUNT")]
    pub counts: Vec<String>,
}

#[derive(Serialize)]
struct ScaleResult {
    process: ProcessType,
    count: u32,
    outcome: ScaleOutcome,
}

/// Run the scale command.
///
/// Every argument is parsed before the first request.
///
/// # Errors
///
/// Returns an error if an argument is malformed or a scale call fails.
pub async fn run(app: &AppContext, args: ScaleArgs) -> Result<ExitCode> {
    let plan = args
        .counts
        .iter()
        .map(String::as_str)
        .map(parse_scale_arg)
        .collect::<Result<Vec<_>>>()?;

    let client = app.client()?;
    let mut results = Vec::with_capacity(plan.len());
    for (process, count) in plan {
        let pb = app
            .output
            .show_progress()
            .then(|| progress::spinner(&format!("Scaling {process} to {count}...")));
        let outcome = match client
            .scale_process(&args.app_id, process.as_str(), count)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(pb) = &pb {
                    pb.finish_and_clear();
                }
                return Err(e);
            }
        };
        let msg = match outcome {
            ScaleOutcome::Scaled => format!("{process} scaled to {count}"),
            ScaleOutcome::Unchanged => format!("{process} unchanged (absent or already {count})"),
        };
        match &pb {
            Some(pb) => progress::finish_ok(pb, &msg),
            None => app.output.success(&msg),
        }
        results.push(ScaleResult {
            process,
            count,
            outcome,
        });
    }

    if app.is_json() {
        json::print(&results)?;
    }
    Ok(ExitCode::SUCCESS)
}
