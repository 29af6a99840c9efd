//! Persisted settings in `<base>/confgit.json`

use serde::{Deserialize, Serialize};

use confgit_fs::{BaseLayout, ConfigStore};

use crate::Result;

/// Base-level settings shared by every repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name to elect when a fresh default repository must be created.
    /// Falls back to the hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_repository: Option<String>,
}

impl Settings {
    /// Load the settings file, creating it as an empty object if absent.
    pub fn load(layout: &BaseLayout) -> Result<Self> {
        Ok(ConfigStore::new().load_or_init(&layout.config_file())?)
    }
}
