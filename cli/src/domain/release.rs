//! Release derivation for configuration changes.
//!
//! Pure functions only, no I/O, no async.

use std::collections::BTreeMap;

use anyhow::Result;
use flynn_api_types::Release;

/// Build the release that replaces `current` once `patch` is applied.
///
/// The result carries no id: it is a new resource. Patch keys overwrite
/// existing keys; keys absent from the patch are kept. Every other field of
/// the current release is carried over unchanged.
#[must_use]
pub fn next_release(current: Option<Release>, patch: &BTreeMap<String, String>) -> Release {
    let mut release = current.unwrap_or_default();
    release.id = None;
    release
        .env
        .extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
    release
}

/// Parse a `KEY=VALUE` assignment. The value may itself contain `=`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_env_assignment(arg: &str) -> Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE, got '{arg}'"))?;
    anyhow::ensure!(!key.is_empty(), "empty key in '{arg}'");
    Ok((key.to_string(), value.to_string()))
}
