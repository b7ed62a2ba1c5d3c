//! `flynn domains` — TLS-terminated domains on the router.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::domain::route::TlsBinding;
use crate::output::json;

/// Certificate and key files for a domain.
#[derive(Args)]
pub struct TlsArgs {
    /// PEM certificate chain
    #[arg(long, value_name = "FILE")]
    pub cert: PathBuf,
    /// PEM private key
    #[arg(long, value_name = "FILE")]
    pub key: PathBuf,
    /// Pin clients to one backend
    #[arg(long)]
    pub sticky: bool,
}

/// Domains subcommands.
#[derive(Subcommand)]
pub enum DomainsCommand {
    /// List routes
    List,
    /// Route a domain to an app's web processes
    Add {
        /// App name
        app_name: String,
        domain: String,
        #[command(flatten)]
        tls: TlsArgs,
    },
    /// Move a route to a new domain and replace its certificate
    Update {
        /// App name
        app_name: String,
        old_domain: String,
        new_domain: String,
        #[command(flatten)]
        tls: TlsArgs,
    },
    /// Remove a domain
    Remove {
        /// App name
        app_name: String,
        domain: String,
    },
}

/// Run the domains command.
///
/// # Errors
///
/// Returns an error if a certificate or key file cannot be read, or the
/// router operation fails.
pub async fn run(app: &AppContext, cmd: DomainsCommand) -> Result<ExitCode> {
    match cmd {
        DomainsCommand::List => list(app).await,
        DomainsCommand::Add {
            app_name,
            domain,
            tls,
        } => {
            let (cert, key) = read_tls(&tls)?;
            let binding = TlsBinding {
                certificate: &cert,
                private_key: &key,
                sticky: tls.sticky,
            };
            app.client()?
                .ssl_domain_create(&app_name, &domain, &binding)
                .await?;
            done(app, "added", &domain)
        }
        DomainsCommand::Update {
            app_name,
            old_domain,
            new_domain,
            tls,
        } => {
            let (cert, key) = read_tls(&tls)?;
            let binding = TlsBinding {
                certificate: &cert,
                private_key: &key,
                sticky: tls.sticky,
            };
            app.client()?
                .ssl_domain_update(&app_name, &old_domain, &new_domain, &binding)
                .await?;
            done(app, "updated", &new_domain)
        }
        DomainsCommand::Remove { app_name, domain } => {
            app.client()?.domain_remove(&app_name, &domain).await?;
            done(app, "removed", &domain)
        }
    }
}

async fn list(app: &AppContext) -> Result<ExitCode> {
    let mut routes = app.client()?.list_routes().await?;
    for route in &mut routes {
        route.tls_key = None;
    }
    if app.is_json() {
        json::print(&routes)?;
        return Ok(ExitCode::SUCCESS);
    }
    let rows: Vec<_> = routes
        .iter()
        .map(|route| {
            let tls = if route.tls_cert.is_some() { " (tls)" } else { "" };
            (route.domain.clone(), format!("{}{tls}", route.service))
        })
        .collect();
    app.output.listing("Routes", &rows, "No routes");
    Ok(ExitCode::SUCCESS)
}

fn done(app: &AppContext, action: &str, domain: &str) -> Result<ExitCode> {
    if app.is_json() {
        json::print(&serde_json::json!({ "domain": domain, "action": action }))?;
    } else {
        app.output.success(&format!("Domain {domain} {action}"));
    }
    Ok(ExitCode::SUCCESS)
}

fn read_tls(tls: &TlsArgs) -> Result<(String, String)> {
    Ok((read_pem(&tls.cert)?, read_pem(&tls.key)?))
}

fn read_pem(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
