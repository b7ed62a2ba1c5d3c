//! Process types that may be scaled.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::ClientError;

/// A scalable process type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessType {
    Web,
    Worker,
    Clock,
}

impl ProcessType {
    pub const ALL: [ProcessType; 3] = [Self::Web, Self::Worker, Self::Clock];

    /// Key used in a formation's process map.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Worker => "worker",
            Self::Clock => "clock",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Self::Web),
            "worker" => Ok(Self::Worker),
            "clock" => Ok(Self::Clock),
            other => Err(ClientError::UnknownProcessType(other.to_string())),
        }
    }
}

/// Parse a `TYPE=COUNT` scale argument.
///
/// # Errors
///
/// Returns an error if the separator is missing, the type is not scalable,
/// or the count is not a non-negative integer.
pub fn parse_scale_arg(arg: &str) -> anyhow::Result<(ProcessType, u32)> {
    let (kind, count) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected TYPE=COUNT, got '{arg}'"))?;
    let kind: ProcessType = kind.trim().parse()?;
    let count: u32 = count
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid count '{count}' for {kind}"))?;
    Ok((kind, count))
}
