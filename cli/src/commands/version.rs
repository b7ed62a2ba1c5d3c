//! Version command

use crate::output::json;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(as_json: bool) -> anyhow::Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if as_json {
        json::print(&serde_json::json!({ "version": version }))?;
    } else {
        println!("flynn {version}");
    }
    Ok(())
}
