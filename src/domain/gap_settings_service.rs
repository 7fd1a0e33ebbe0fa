//! Gap-settings resolution and lifecycle.
//!
//! The resolver applies a three-tier fallback: stored per-child override,
//! then age-derived defaults from the child's birth date, then hardcoded
//! defaults. No failure escapes it; each failure mode degrades to the next
//! tier. Its only side effect is deleting an override record that turned
//! out to be malformed.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::gap_settings::{UpdateGapSettingsCommand, UpdateGapSettingsResult};
use crate::domain::models::gap_settings::GapSettings;
use crate::storage::json::{ChildProfileRepository, GapSettingsRepository, JsonConnection};
use crate::storage::traits::{ChildProfileStorage, GapSettingsStorage};

/// Service for resolving and managing per-child gap settings
#[derive(Clone)]
pub struct GapSettingsService {
    gap_settings_repository: GapSettingsRepository,
    child_repository: ChildProfileRepository,
}

impl GapSettingsService {
    /// Create a new GapSettingsService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let gap_settings_repository = GapSettingsRepository::new(connection.clone());
        let child_repository = ChildProfileRepository::new(connection);
        Self {
            gap_settings_repository,
            child_repository,
        }
    }

    /// Resolve concrete gap settings for a child.
    ///
    /// Tier 1: a stored, well-formed override is returned verbatim.
    /// Tier 2: a malformed or invalid override is deleted and ignored.
    /// Tier 3: age-derived defaults from the child's birth date.
    /// Tier 4: hardcoded defaults when no profile exists either.
    ///
    /// Always returns Ok; collaborator failures degrade to the next tier.
    pub fn resolve_gap_settings(&self, child_id: &str) -> Result<GapSettings> {
        match self.gap_settings_repository.get_gap_settings(child_id) {
            Ok(Some(settings)) if settings.is_valid() => {
                debug!("Resolved gap settings for {} from stored override", child_id);
                return Ok(settings);
            }
            Ok(Some(_)) => {
                warn!(
                    "Stored gap settings for {} have non-positive gaps, discarding override",
                    child_id
                );
                if let Err(e) = self.gap_settings_repository.delete_gap_settings(child_id) {
                    warn!("Failed to remove invalid gap settings for {}: {}", child_id, e);
                }
            }
            Ok(None) => {
                debug!("No gap settings override stored for {}", child_id);
            }
            Err(e) => {
                warn!(
                    "Could not read gap settings for {}, discarding record: {}",
                    child_id, e
                );
                if let Err(e) = self.gap_settings_repository.delete_gap_settings(child_id) {
                    warn!("Failed to remove malformed gap settings for {}: {}", child_id, e);
                }
            }
        }

        match self.child_repository.get_child(child_id) {
            Ok(Some(child)) => {
                let age_months = child.age_in_months(Utc::now().date_naive());
                debug!(
                    "Resolved gap settings for {} from age-derived defaults ({} months)",
                    child_id, age_months
                );
                Ok(GapSettings::age_defaults(age_months))
            }
            Ok(None) => {
                debug!("No profile found for {}, using hardcoded defaults", child_id);
                Ok(GapSettings::fallback())
            }
            Err(e) => {
                warn!(
                    "Could not read profile for {}, using hardcoded defaults: {}",
                    child_id, e
                );
                Ok(GapSettings::fallback())
            }
        }
    }

    /// Save a per-child override
    pub fn update_gap_settings(
        &self,
        command: UpdateGapSettingsCommand,
    ) -> Result<UpdateGapSettingsResult> {
        info!("Updating gap settings: {:?}", command);

        let settings = GapSettings {
            feeding_gap_minutes: command.feeding_gap_minutes,
            diaper_gap_hours: command.diaper_gap_hours,
            sleep_gap_hours: command.sleep_gap_hours,
        };

        if !settings.is_valid() {
            return Err(anyhow::anyhow!("All gap values must be greater than zero"));
        }

        if self.child_repository.get_child(&command.child_id)?.is_none() {
            return Err(anyhow::anyhow!("Child not found: {}", command.child_id));
        }

        self.gap_settings_repository
            .store_gap_settings(&command.child_id, &settings)?;

        info!(
            "Updated gap settings for child {}: feeding {}min, diaper {}h, sleep {}h",
            command.child_id,
            settings.feeding_gap_minutes,
            settings.diaper_gap_hours,
            settings.sleep_gap_hours
        );

        Ok(UpdateGapSettingsResult {
            gap_settings: settings,
            success_message: "Gap settings updated successfully".to_string(),
        })
    }

    /// Remove a per-child override, reverting future resolves to derived
    /// defaults. Returns true if an override existed.
    pub fn reset_gap_settings(&self, child_id: &str) -> Result<bool> {
        info!("Resetting gap settings for child: {}", child_id);

        let deleted = self.gap_settings_repository.delete_gap_settings(child_id)?;

        if deleted {
            info!("Reset gap settings for child: {}", child_id);
        } else {
            warn!("No gap settings override to reset for child: {}", child_id);
        }

        Ok(deleted)
    }
}
