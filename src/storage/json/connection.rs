use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// JsonConnection manages the data directory and raw key-value access.
///
/// Every logical key (`gap_settings:<child_id>`, `care_log:all`, …) maps to
/// one JSON file under the base directory. Values are opaque strings at this
/// layer; repositories own serialization.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the platform data directory
    /// (e.g. `~/.local/share/Aurora Baby` on Linux).
    pub fn new_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine platform data directory"))?;
        let base = data_dir.join("Aurora Baby");
        info!("Using default data directory: {}", base.display());
        Self::new(base)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }

    /// Map a logical key to its backing file. Characters that are not safe in
    /// file names (the `:` separators in particular) become underscores.
    fn path_for_key(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_directory.join(format!("{}.json", file_name))
    }

    /// Read the raw value stored under a key. Absence is a valid state.
    pub fn read_key(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        debug!("Read key '{}' from {:?}", key, path);
        Ok(Some(contents))
    }

    /// Write a raw value under a key, atomically (temp file, then rename).
    pub fn write_key(&self, key: &str, contents: &str) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
            info!("Created base data directory: {:?}", self.base_directory);
        }

        let path = self.path_for_key(key);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote key '{}' to {:?}", key, path);
        Ok(())
    }

    /// Remove the value stored under a key.
    /// Returns true if a record existed and was removed.
    pub fn remove_key(&self, key: &str) -> Result<bool> {
        let path = self.path_for_key(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        debug!("Removed key '{}' at {:?}", key, path);
        Ok(true)
    }

    /// Read the raw values of every key starting with the given prefix.
    /// Used for discovery of per-child records.
    pub fn read_keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        if !self.base_directory.exists() {
            return Ok(Vec::new());
        }

        // Prefixes go through the same sanitization as full keys
        let sanitized: String = prefix
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let mut values = Vec::new();
        for entry in fs::read_dir(&self.base_directory)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            if stem.starts_with(&sanitized) {
                values.push(fs::read_to_string(&path)?);
            }
        }
        Ok(values)
    }

    /// Clean up the data directory (useful for tests)
    #[cfg(test)]
    pub fn cleanup(&self) -> Result<()> {
        if self.base_directory.exists() {
            fs::remove_dir_all(&self.base_directory)?;
        }
        Ok(())
    }
}
