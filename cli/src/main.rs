//! Flynn CLI - command-line client for a Flynn cluster

use std::process::ExitCode;

use clap::Parser;
use flynn_cli::cli::Cli;
use flynn_cli::domain::error::{ClientError, ConfigError};
use flynn_cli::output::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let as_json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report(&e, as_json);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &anyhow::Error, as_json: bool) {
    if as_json {
        let code = error_code(e);
        if let Ok(out) = json::format_error(&format!("{e:#}"), code) {
            println!("{out}");
            return;
        }
    }
    eprintln!("Error: {e:#}");
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(client) = e.downcast_ref::<ClientError>() {
        client.code()
    } else if e.downcast_ref::<ConfigError>().is_some() {
        "CONFIG"
    } else {
        "ERROR"
    }
}
