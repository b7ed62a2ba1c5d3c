//! Formation planning: scale decisions, restart sequences, and cleanup
//! selection.
//!
//! Pure functions only, no I/O, no async.

use std::collections::BTreeMap;

use anyhow::Result;
use flynn_api_types::Formation;

use crate::domain::process::ProcessType;

/// One step of a restart sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleStep {
    pub process: ProcessType,
    pub count: u32,
}

/// Return the formation to write back, or `None` when the scale is a no-op.
///
/// A process type that the formation does not run is left alone, as is one
/// already at `count`.
#[must_use]
pub fn plan_scale(formation: &Formation, process: ProcessType, count: u32) -> Option<Formation> {
    match formation.processes.get(process.as_str()) {
        Some(&current) if current != count => {
            let mut next = formation.clone();
            next.processes.insert(process.as_str().to_string(), count);
            Some(next)
        }
        _ => None,
    }
}

/// Expand a process map into the restart sequence: each type is scaled to
/// zero and straight back before the next type is touched.
///
/// # Errors
///
/// Returns an error if the map contains a type that cannot be scaled; no
/// step is planned in that case.
pub fn restart_plan(processes: &BTreeMap<String, u32>) -> Result<Vec<ScaleStep>> {
    let mut steps = Vec::with_capacity(processes.len() * 2);
    for (name, &count) in processes {
        let process: ProcessType = name.parse()?;
        steps.push(ScaleStep { process, count: 0 });
        steps.push(ScaleStep { process, count });
    }
    Ok(steps)
}

/// Release ids of formations that may be deleted now that `keep_release_id`
/// is current.
///
/// `None` when older formations exist but none is bound to
/// `keep_release_id`: deleting them would leave the app with no formation.
#[must_use]
pub fn superseded<'a>(formations: &'a [Formation], keep_release_id: &str) -> Option<Vec<&'a str>> {
    let old: Vec<&str> = formations
        .iter()
        .map(|f| f.release_id.as_str())
        .filter(|id| *id != keep_release_id)
        .collect();
    let kept = formations.iter().any(|f| f.release_id == keep_release_id);
    (kept || old.is_empty()).then_some(old)
}
