//! # JSON Gap-Settings Repository
//!
//! Stores one override record per child under `gap_settings:<child_id>`.
//! Absence of the key is a valid, meaningful state: it tells the resolver to
//! derive age-appropriate defaults instead.

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::gap_settings::GapSettings;
use crate::storage::traits::GapSettingsStorage;

/// JSON-backed gap-settings repository
#[derive(Clone)]
pub struct GapSettingsRepository {
    connection: Arc<JsonConnection>,
}

impl GapSettingsRepository {
    /// Create a new gap-settings repository
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn key_for(child_id: &str) -> String {
        format!("gap_settings:{}", child_id)
    }
}

impl GapSettingsStorage for GapSettingsRepository {
    fn store_gap_settings(&self, child_id: &str, settings: &GapSettings) -> Result<()> {
        let contents = serde_json::to_string_pretty(settings)?;
        self.connection.write_key(&Self::key_for(child_id), &contents)?;
        info!("Stored gap settings override for child: {}", child_id);
        Ok(())
    }

    fn get_gap_settings(&self, child_id: &str) -> Result<Option<GapSettings>> {
        match self.connection.read_key(&Self::key_for(child_id))? {
            Some(raw) => {
                let settings = serde_json::from_str(&raw).with_context(|| {
                    format!("Malformed gap settings record for child: {}", child_id)
                })?;
                Ok(Some(settings))
            }
            None => Ok(None),
        }
    }

    fn delete_gap_settings(&self, child_id: &str) -> Result<bool> {
        let removed = self.connection.remove_key(&Self::key_for(child_id))?;
        if removed {
            info!("Deleted gap settings override for child: {}", child_id);
        } else {
            warn!("No gap settings override to delete for child: {}", child_id);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (GapSettingsRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo = GapSettingsRepository::new(Arc::new(connection));
        (repo, temp_dir)
    }

    #[test]
    fn test_get_missing_settings_is_none() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.get_gap_settings("child::1").unwrap().is_none());
    }

    #[test]
    fn test_store_and_get_settings() {
        let (repo, _temp_dir) = setup_test_repo();
        let settings = GapSettings {
            feeding_gap_minutes: 150,
            diaper_gap_hours: 4,
            sleep_gap_hours: 6,
        };

        repo.store_gap_settings("child::1", &settings).unwrap();

        let retrieved = repo.get_gap_settings("child::1").unwrap();
        assert_eq!(retrieved, Some(settings));
    }

    #[test]
    fn test_settings_are_scoped_per_child() {
        let (repo, _temp_dir) = setup_test_repo();
        let settings = GapSettings::fallback();

        repo.store_gap_settings("child::1", &settings).unwrap();

        assert!(repo.get_gap_settings("child::2").unwrap().is_none());
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.connection
            .write_key("gap_settings:child::1", "{\"feeding_gap_minutes\": \"soon\"}")
            .unwrap();

        assert!(repo.get_gap_settings("child::1").is_err());
    }

    #[test]
    fn test_delete_settings() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_gap_settings("child::1", &GapSettings::fallback()).unwrap();

        assert!(repo.delete_gap_settings("child::1").unwrap());
        assert!(repo.get_gap_settings("child::1").unwrap().is_none());
        assert!(!repo.delete_gap_settings("child::1").unwrap());
    }
}
