//! Terminal output for `flynn`: status lines, aligned listings, progress.
//!
//! Everything here writes to stdout except [`OutputContext::error`]. JSON mode
//! builds its context with `quiet` set, so only `json::print` reaches stdout.

pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::{NullReporter, Reporter, TerminalReporter};
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context from CLI flags; `NO_COLOR` in the environment
    /// (any value) also disables colors.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var_os("NO_COLOR").is_none();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Spinners only make sense on an interactive, non-quiet terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Printed to stderr, even when quiet.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// One labelled value, e.g. the id of a created app.
    pub fn field(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", format!("{label}:").style(self.styles.dim));
        }
    }

    /// A titled two-column listing (apps, env vars, routes) with the left
    /// column padded to its widest entry. Prints `empty` instead when there
    /// are no rows.
    pub fn listing(&self, title: &str, rows: &[(String, String)], empty: &str) {
        if self.quiet {
            return;
        }
        if rows.is_empty() {
            self.info(empty);
            return;
        }
        println!(
            "  {} {}",
            title.style(self.styles.header),
            format!("({})", rows.len()).style(self.styles.dim)
        );
        for line in listing_lines(rows) {
            println!("  {line}");
        }
    }
}

/// Rows of a listing with the left column padded; no styling.
#[must_use]
pub fn listing_lines(rows: &[(String, String)]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(left, right)| format!("{left:<width$}  {right}").trim_end().to_string())
        .collect()
}
