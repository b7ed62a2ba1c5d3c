//! Infrastructure implementation of the `SettingsStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::SettingsStore;
use crate::domain::config::ClientSettings;

/// Production implementation of `SettingsStore` that reads a YAML file on disk.
pub struct YamlSettingsStore;

impl SettingsStore for YamlSettingsStore {
    fn load(&self) -> Result<ClientSettings> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(ClientSettings::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("FLYNN_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".flynn").join("config.yaml"))
    }
}
