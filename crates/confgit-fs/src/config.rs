//! Settings file loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, Result, io};

/// JSON configuration store.
///
/// Files are pretty-printed with a trailing newline and replaced atomically.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a JSON file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a file atomically.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let mut content =
            serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if !content.ends_with('\n') {
            content.push('\n');
        }
        io::write_atomic(path, content.as_bytes())
    }

    /// Load `path`, writing `T::default()` there first if it does not exist.
    ///
    /// An existing file is never rewritten, so keys this version does not
    /// know about survive.
    pub fn load_or_init<T>(&self, path: &Path) -> Result<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        if path.exists() {
            return self.load(path);
        }

        let value = T::default();
        self.save(path, &value)?;
        tracing::debug!(path = %path.display(), "Created default configuration");
        Ok(value)
    }
}
