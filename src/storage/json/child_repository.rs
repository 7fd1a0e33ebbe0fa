//! # JSON Child Profile Repository
//!
//! Stores one profile per child under `child_profile:<child_id>`, plus the
//! `active_child` pointer key holding the currently selected child's ID.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::child::ChildProfile;
use crate::storage::traits::ChildProfileStorage;

const ACTIVE_CHILD_KEY: &str = "active_child";

/// JSON-backed child profile repository
#[derive(Clone)]
pub struct ChildProfileRepository {
    connection: Arc<JsonConnection>,
}

impl ChildProfileRepository {
    /// Create a new child profile repository
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn key_for(child_id: &str) -> String {
        format!("child_profile:{}", child_id)
    }

    /// Discover all stored profiles. Records that fail to parse are skipped
    /// with a warning rather than poisoning the whole listing.
    fn discover_children(&self) -> Result<Vec<ChildProfile>> {
        let raw_values = self.connection.read_keys_with_prefix("child_profile:")?;

        let mut children = Vec::new();
        for raw in raw_values {
            match serde_json::from_str::<ChildProfile>(&raw) {
                Ok(child) => {
                    debug!("Discovered child profile: {}", child.id);
                    children.push(child);
                }
                Err(e) => {
                    warn!("Skipping unparseable child profile record: {}", e);
                }
            }
        }

        // Sort children by name for consistent ordering
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    fn save_child(&self, child: &ChildProfile) -> Result<()> {
        let contents = serde_json::to_string_pretty(child)?;
        self.connection.write_key(&Self::key_for(&child.id), &contents)?;
        info!("Saved child profile: {} ({})", child.name, child.id);
        Ok(())
    }
}

impl ChildProfileStorage for ChildProfileRepository {
    fn store_child(&self, child: &ChildProfile) -> Result<()> {
        self.save_child(child)
    }

    fn get_child(&self, child_id: &str) -> Result<Option<ChildProfile>> {
        match self.connection.read_key(&Self::key_for(child_id))? {
            Some(raw) => {
                let child = serde_json::from_str(&raw)
                    .with_context(|| format!("Malformed child profile record: {}", child_id))?;
                Ok(Some(child))
            }
            None => Ok(None),
        }
    }

    fn list_children(&self) -> Result<Vec<ChildProfile>> {
        self.discover_children()
    }

    fn update_child(&self, child: &ChildProfile) -> Result<()> {
        if self.connection.read_key(&Self::key_for(&child.id))?.is_none() {
            warn!("Attempted to update a non-existent child: {}", child.id);
            return Err(anyhow::anyhow!("Child not found for update: {}", child.id));
        }
        self.save_child(child)
    }

    fn delete_child(&self, child_id: &str) -> Result<bool> {
        let removed = self.connection.remove_key(&Self::key_for(child_id))?;
        if removed {
            info!("Deleted child profile: {}", child_id);
        } else {
            warn!("Attempted to delete a non-existent child: {}", child_id);
        }
        Ok(removed)
    }

    fn get_active_child(&self) -> Result<Option<String>> {
        match self.connection.read_key(ACTIVE_CHILD_KEY)? {
            Some(raw) => {
                let child_id: String = serde_json::from_str(&raw)
                    .context("Malformed active child record")?;
                Ok(Some(child_id))
            }
            None => Ok(None),
        }
    }

    fn set_active_child(&self, child_id: &str) -> Result<()> {
        let contents = serde_json::to_string(child_id)?;
        self.connection.write_key(ACTIVE_CHILD_KEY, &contents)?;
        info!("Set active child to: {}", child_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup_test_repo() -> (ChildProfileRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo = ChildProfileRepository::new(Arc::new(connection));
        (repo, temp_dir)
    }

    fn make_child(id: &str, name: &str) -> ChildProfile {
        let now = chrono::Utc::now();
        ChildProfile {
            id: id.to_string(),
            name: name.to_string(),
            birthdate: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_store_and_get_child() {
        let (repo, _temp_dir) = setup_test_repo();
        let child = make_child("child::123", "Test Child");

        repo.store_child(&child).expect("Failed to store child");

        let retrieved = repo.get_child("child::123").expect("Failed to get child");
        assert_eq!(retrieved, Some(child));
    }

    #[test]
    fn test_get_nonexistent_child() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.get_child("child::999").unwrap().is_none());
    }

    #[test]
    fn test_list_children_sorted_by_name() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_child(&make_child("child::2", "Bella")).unwrap();
        repo.store_child(&make_child("child::1", "Aino")).unwrap();

        let children = repo.list_children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Aino");
        assert_eq!(children[1].name, "Bella");
    }

    #[test]
    fn test_list_skips_unparseable_records() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_child(&make_child("child::1", "Aino")).unwrap();
        repo.connection
            .write_key("child_profile:child::2", "{not json")
            .unwrap();

        let children = repo.list_children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Aino");
    }

    #[test]
    fn test_update_nonexistent_child_fails() {
        let (repo, _temp_dir) = setup_test_repo();
        let child = make_child("child::1", "Aino");
        assert!(repo.update_child(&child).is_err());
    }

    #[test]
    fn test_delete_child() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_child(&make_child("child::1", "Aino")).unwrap();

        assert!(repo.delete_child("child::1").unwrap());
        assert!(repo.get_child("child::1").unwrap().is_none());
        assert!(!repo.delete_child("child::1").unwrap());
    }

    #[test]
    fn test_active_child_management() {
        let (repo, _temp_dir) = setup_test_repo();

        assert!(repo.get_active_child().unwrap().is_none());

        repo.store_child(&make_child("child::456", "Active Child")).unwrap();
        repo.set_active_child("child::456").unwrap();

        assert_eq!(repo.get_active_child().unwrap(), Some("child::456".to_string()));
    }
}
