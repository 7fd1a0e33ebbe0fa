use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::child::{
    CreateChildCommand, CreateChildResult, DeleteChildCommand, DeleteChildResult, GetActiveChildResult,
    GetChildCommand, GetChildResult, ListChildrenResult, SetActiveChildCommand, SetActiveChildResult,
    UpdateChildCommand, UpdateChildResult,
};
use crate::domain::models::child::{ActiveChild, ChildProfile};
use crate::storage::json::{ChildProfileRepository, JsonConnection};
use crate::storage::traits::ChildProfileStorage;

/// Service for managing child profiles
#[derive(Clone)]
pub struct ChildService {
    child_repository: ChildProfileRepository,
}

impl ChildService {
    /// Create a new ChildService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let child_repository = ChildProfileRepository::new(connection);
        Self { child_repository }
    }

    /// Create a new child profile
    pub fn create_child(&self, command: CreateChildCommand) -> Result<CreateChildResult> {
        info!("Creating child: name={}, birthdate={}", command.name, command.birthdate);

        self.validate_create_command(&command)?;

        let now = Utc::now();
        let birthdate = NaiveDate::parse_from_str(&command.birthdate, "%Y-%m-%d")
            .context("Invalid birthdate format in create_child command")?;

        let child = ChildProfile {
            id: ChildProfile::generate_id(now.timestamp_millis() as u64),
            name: command.name.trim().to_string(),
            birthdate,
            created_at: now,
            updated_at: now,
        };

        self.child_repository.store_child(&child)?;

        info!("Created child: {} with ID: {}", child.name, child.id);

        Ok(CreateChildResult { child })
    }

    /// Get a child profile by ID
    pub fn get_child(&self, command: GetChildCommand) -> Result<GetChildResult> {
        debug!("Getting child: {}", command.child_id);

        let child = self.child_repository.get_child(&command.child_id)?;

        if child.is_none() {
            warn!("Child not found: {}", command.child_id);
        }

        Ok(GetChildResult { child })
    }

    /// List all children
    pub fn list_children(&self) -> Result<ListChildrenResult> {
        let children = self.child_repository.list_children()?;
        debug!("Found {} children", children.len());
        Ok(ListChildrenResult { children })
    }

    /// Update an existing child profile
    pub fn update_child(&self, command: UpdateChildCommand) -> Result<UpdateChildResult> {
        info!("Updating child: {}", command.child_id);

        let mut child = self
            .child_repository
            .get_child(&command.child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        self.validate_update_command(&command)?;

        if let Some(name) = command.name {
            child.name = name.trim().to_string();
        }
        if let Some(birthdate_str) = command.birthdate {
            child.birthdate = NaiveDate::parse_from_str(&birthdate_str, "%Y-%m-%d")
                .context("Invalid birthdate format in update_child command")?;
        }

        child.updated_at = Utc::now();

        self.child_repository.update_child(&child)?;

        info!("Updated child: {} with ID: {}", child.name, child.id);

        Ok(UpdateChildResult { child })
    }

    /// Delete a child profile
    pub fn delete_child(&self, command: DeleteChildCommand) -> Result<DeleteChildResult> {
        info!("Deleting child: {}", command.child_id);

        let child = self
            .child_repository
            .get_child(&command.child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        self.child_repository.delete_child(&command.child_id)?;

        info!("Deleted child: {} with ID: {}", child.name, child.id);

        Ok(DeleteChildResult {
            success_message: format!("Child '{}' deleted successfully", child.name),
        })
    }

    /// Get the currently active child
    pub fn get_active_child(&self) -> Result<GetActiveChildResult> {
        debug!("Getting active child");

        let active_child_id = self.child_repository.get_active_child()?;

        let active_child_model = if let Some(child_id) = active_child_id {
            match self.child_repository.get_child(&child_id)? {
                Some(child) => Some(child),
                None => {
                    warn!("Active child ID exists but child not found: {}", child_id);
                    None
                }
            }
        } else {
            None
        };

        Ok(GetActiveChildResult {
            active_child: ActiveChild {
                child: active_child_model,
            },
        })
    }

    /// Set the active child
    pub fn set_active_child(&self, command: SetActiveChildCommand) -> Result<SetActiveChildResult> {
        info!("Setting active child: {}", command.child_id);

        let child = self
            .child_repository
            .get_child(&command.child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", command.child_id))?;

        self.child_repository.set_active_child(&command.child_id)?;

        info!("Successfully set active child: {} ({})", child.name, child.id);

        Ok(SetActiveChildResult { child })
    }

    /// Validate create child command
    fn validate_create_command(&self, command: &CreateChildCommand) -> Result<()> {
        if command.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Child name cannot be empty"));
        }

        if command.name.len() > 100 {
            return Err(anyhow::anyhow!("Child name cannot exceed 100 characters"));
        }

        self.validate_birthdate(&command.birthdate)?;

        Ok(())
    }

    /// Validate update child command
    fn validate_update_command(&self, command: &UpdateChildCommand) -> Result<()> {
        if let Some(ref name) = command.name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Child name cannot be empty"));
            }

            if name.len() > 100 {
                return Err(anyhow::anyhow!("Child name cannot exceed 100 characters"));
            }
        }

        if let Some(ref birthdate) = command.birthdate {
            self.validate_birthdate(birthdate)?;
        }

        Ok(())
    }

    /// Validate birthdate format (ISO 8601: YYYY-MM-DD)
    fn validate_birthdate(&self, birthdate: &str) -> Result<()> {
        let date_parts: Vec<&str> = birthdate.split('-').collect();
        if date_parts.len() != 3 {
            return Err(anyhow::anyhow!("Invalid birthdate format. Use YYYY-MM-DD."));
        }

        let year: u32 = date_parts[0]
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid year in birthdate"))?;
        let month: u32 = date_parts[1]
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid month in birthdate"))?;
        let day: u32 = date_parts[2]
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid day in birthdate"))?;

        if year < 1900 || year > 2100 {
            return Err(anyhow::anyhow!("Year must be between 1900 and 2100"));
        }
        if !(1..=12).contains(&month) {
            return Err(anyhow::anyhow!("Month must be between 1 and 12"));
        }
        if !(1..=31).contains(&day) {
            return Err(anyhow::anyhow!("Day must be between 1 and 31"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> ChildService {
        let temp_dir = tempdir().unwrap();
        let conn = JsonConnection::new(temp_dir.path().to_path_buf()).unwrap();
        ChildService::new(Arc::new(conn))
    }

    #[test]
    fn test_create_child_trims_name() {
        let service = setup_test();
        let command = CreateChildCommand {
            name: "  Aurora ".to_string(),
            birthdate: "2025-03-15".to_string(),
        };

        let result = service.create_child(command).unwrap();
        assert_eq!(result.child.name, "Aurora");
        assert_eq!(result.child.birthdate.to_string(), "2025-03-15");
    }

    #[test]
    fn test_create_child_validation() {
        let service = setup_test();

        let cmd_empty_name = CreateChildCommand {
            name: " ".to_string(),
            birthdate: "2025-01-01".to_string(),
        };
        assert!(service.create_child(cmd_empty_name).is_err());

        let cmd_long_name = CreateChildCommand {
            name: "a".repeat(101),
            birthdate: "2025-01-01".to_string(),
        };
        assert!(service.create_child(cmd_long_name).is_err());

        let cmd_bad_date = CreateChildCommand {
            name: "Bad Date".to_string(),
            birthdate: "2025/01/01".to_string(),
        };
        assert!(service.create_child(cmd_bad_date).is_err());
    }

    #[test]
    fn test_get_and_list_children() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Aurora".to_string(),
                birthdate: "2025-03-15".to_string(),
            })
            .unwrap();

        let retrieved = service
            .get_child(GetChildCommand {
                child_id: created.child.id.clone(),
            })
            .unwrap();
        assert_eq!(retrieved.child.unwrap().name, "Aurora");

        let listed = service.list_children().unwrap();
        assert_eq!(listed.children.len(), 1);
    }

    #[test]
    fn test_get_nonexistent_child() {
        let service = setup_test();
        let result = service
            .get_child(GetChildCommand {
                child_id: "non-existent-id".to_string(),
            })
            .unwrap();
        assert!(result.child.is_none());
    }

    #[test]
    fn test_update_child() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Original".to_string(),
                birthdate: "2025-01-01".to_string(),
            })
            .unwrap();

        let updated = service
            .update_child(UpdateChildCommand {
                child_id: created.child.id.clone(),
                name: Some("  Renamed  ".to_string()),
                birthdate: Some("2025-02-02".to_string()),
            })
            .unwrap();

        assert_eq!(updated.child.name, "Renamed");
        assert_eq!(updated.child.birthdate.to_string(), "2025-02-02");
        assert!(updated.child.updated_at > created.child.created_at);
    }

    #[test]
    fn test_update_nonexistent_child() {
        let service = setup_test();
        let result = service.update_child(UpdateChildCommand {
            child_id: "non-existent-id".to_string(),
            name: Some("New Name".to_string()),
            birthdate: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_child() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "To Be Deleted".to_string(),
                birthdate: "2025-01-01".to_string(),
            })
            .unwrap();

        service
            .delete_child(DeleteChildCommand {
                child_id: created.child.id.clone(),
            })
            .unwrap();

        let retrieved = service
            .get_child(GetChildCommand {
                child_id: created.child.id,
            })
            .unwrap();
        assert!(retrieved.child.is_none());
    }

    #[test]
    fn test_set_and_get_active_child() {
        let service = setup_test();

        let response = service.get_active_child().unwrap();
        assert!(response.active_child.child.is_none());

        let created = service
            .create_child(CreateChildCommand {
                name: "Aurora".to_string(),
                birthdate: "2025-03-15".to_string(),
            })
            .unwrap();

        service
            .set_active_child(SetActiveChildCommand {
                child_id: created.child.id.clone(),
            })
            .unwrap();

        let response = service.get_active_child().unwrap();
        assert_eq!(response.active_child.child.unwrap().id, created.child.id);
    }

    #[test]
    fn test_active_child_after_deletion() {
        let service = setup_test();
        let created = service
            .create_child(CreateChildCommand {
                name: "Aurora".to_string(),
                birthdate: "2025-03-15".to_string(),
            })
            .unwrap();
        service
            .set_active_child(SetActiveChildCommand {
                child_id: created.child.id.clone(),
            })
            .unwrap();

        service
            .delete_child(DeleteChildCommand {
                child_id: created.child.id,
            })
            .unwrap();

        let response = service.get_active_child().unwrap();
        assert!(response.active_child.child.is_none());
    }

    #[test]
    fn test_validate_birthdate() {
        let service = setup_test();

        service.validate_birthdate("2025-01-15").unwrap();

        service.validate_birthdate("not-a-date").unwrap_err();
        service.validate_birthdate("2025/01/15").unwrap_err();
        service.validate_birthdate("2025-13-01").unwrap_err();
        service.validate_birthdate("2025-01-32").unwrap_err();
        service.validate_birthdate("1800-01-01").unwrap_err();
        service.validate_birthdate("2200-01-01").unwrap_err();
    }
}
