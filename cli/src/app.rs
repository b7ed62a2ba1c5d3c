//! Application context — unified state passed to every command handler.
//!
//! `AppContext` owns output settings and the connection overrides taken from
//! flags; it builds a `FlynnClient` on demand so that commands which never
//! talk to the cluster (`version`) need no configuration.

use anyhow::Result;

use crate::application::FlynnClient;
use crate::application::ports::SettingsStore;
use crate::domain::config::{ClientConfig, ClientSettings};
use crate::infra::config::YamlSettingsStore;
use crate::infra::transport::HttpTransport;
use crate::output::{NullReporter, OutputContext, Reporter, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `FLYNN_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    pub output: OutputFlags,
    pub behaviour: BehaviourFlags,
    /// Connection settings from flags and env; these win over the file.
    pub connection: ClientSettings,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context. Quiet whenever JSON mode is on so stdout
    /// carries only the JSON document.
    pub output: OutputContext,
    pub mode: OutputMode,
    pub settings_store: YamlSettingsStore,
    connection: ClientSettings,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("FLYNN_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            settings_store: YamlSettingsStore,
            connection: flags.connection,
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Progress reporter for the current output mode.
    #[must_use]
    pub fn reporter(&self) -> Reporter<'_> {
        match self.mode {
            OutputMode::Human => Reporter::Terminal(TerminalReporter::new(&self.output)),
            OutputMode::Json => Reporter::Null(NullReporter),
        }
    }

    /// Settings file merged with flag/env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or parsed.
    pub fn settings(&self) -> Result<ClientSettings> {
        let stored = self.settings_store.load()?;
        Ok(stored.overlay(self.connection.clone()))
    }

    /// Build a client against the configured cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded, a required connection
    /// value is missing, or the HTTP client cannot be built.
    pub fn client(&self) -> Result<FlynnClient<HttpTransport>> {
        let config = ClientConfig::from_settings(&self.settings()?, false)?;
        let transport = HttpTransport::new(&config)?;
        Ok(FlynnClient::new(config, transport))
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `FLYNN_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
