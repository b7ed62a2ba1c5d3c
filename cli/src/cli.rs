//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::domain::config::ClientSettings;

/// Command-line client for a Flynn cluster
#[derive(Parser)]
#[command(
    name = "flynn",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (the `NO_COLOR` env var is also honoured)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Cluster connection; each value overrides the settings file.
#[derive(Args)]
pub struct ConnectionArgs {
    /// Cluster domain (controller.<host>, router.<host>)
    #[arg(long, global = true, env = "FLYNN_HOST")]
    pub host: Option<String>,

    /// Admin username
    #[arg(long, global = true, env = "FLYNN_USERNAME")]
    pub username: Option<String>,

    /// Admin password
    #[arg(long, global = true, env = "FLYNN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl From<ConnectionArgs> for ClientSettings {
    fn from(args: ConnectionArgs) -> Self {
        ClientSettings {
            host: args.host,
            username: args.username,
            password: args.password,
            ..ClientSettings::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage apps
    #[command(subcommand)]
    Apps(commands::apps::AppsCommand),

    /// Show or set app environment
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Scale process types
    Scale(commands::scale::ScaleArgs),

    /// Run a one-off command
    Run(commands::run::RunArgs),

    /// Show app logs
    Logs(commands::logs::LogsArgs),

    /// Manage TLS domains
    #[command(subcommand)]
    Domains(commands::domains::DomainsCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            connection,
            command,
        } = self;

        if matches!(command, Command::Version) {
            commands::version::run(json)?;
            return Ok(ExitCode::SUCCESS);
        }

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
            connection: connection.into(),
        });

        match command {
            Command::Apps(cmd) => commands::apps::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd).await,
            Command::Scale(args) => commands::scale::run(&app, args).await,
            Command::Run(args) => commands::run::run(&app, args).await,
            Command::Logs(args) => commands::logs::run(&app, args).await,
            Command::Domains(cmd) => commands::domains::run(&app, cmd).await,
            Command::Version => Ok(ExitCode::SUCCESS),
        }
    }
}
