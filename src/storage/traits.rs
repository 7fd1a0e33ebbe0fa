//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::models::care_event::CareEvent;
use crate::domain::models::child::ChildProfile;
use crate::domain::models::gap_settings::GapSettings;

/// Trait defining the interface for child profile storage operations
pub trait ChildProfileStorage: Send + Sync {
    /// Store a new child profile
    fn store_child(&self, child: &ChildProfile) -> Result<()>;

    /// Retrieve a specific child by ID
    fn get_child(&self, child_id: &str) -> Result<Option<ChildProfile>>;

    /// List all children ordered by name
    fn list_children(&self) -> Result<Vec<ChildProfile>>;

    /// Update an existing child profile
    fn update_child(&self, child: &ChildProfile) -> Result<()>;

    /// Delete a child profile by ID
    /// Returns true if the profile was found and deleted
    fn delete_child(&self, child_id: &str) -> Result<bool>;

    /// Get the currently active child ID
    fn get_active_child(&self) -> Result<Option<String>>;

    /// Set the currently active child
    fn set_active_child(&self, child_id: &str) -> Result<()>;
}

/// Trait defining the interface for care-event storage operations
///
/// Covers both the observed-events collection and the separate collection of
/// persisted forecast events. The two never mix: forecast writes cannot touch
/// observed history.
pub trait CareEventStorage: Send + Sync {
    /// Append a new event to the observed-events collection
    fn store_event(&self, event: &CareEvent) -> Result<()>;

    /// Retrieve a specific observed event by ID
    fn get_event(&self, event_id: &str) -> Result<Option<CareEvent>>;

    /// List all observed events for a child in chronological order
    fn list_events(&self, child_id: &str) -> Result<Vec<CareEvent>>;

    /// List observed events for a child with timestamps in `[start, end]`,
    /// in chronological order
    fn list_events_range(
        &self,
        child_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CareEvent>>;

    /// Delete a single observed event
    /// Returns true if the event was found and deleted
    fn delete_event(&self, event_id: &str) -> Result<bool>;

    /// Replace the child's entries in the forecast collection with the given
    /// events; other children's forecasts are untouched
    fn replace_future_events(&self, child_id: &str, events: &[CareEvent]) -> Result<()>;

    /// List persisted forecast events for a child in chronological order
    fn list_future_events(&self, child_id: &str) -> Result<Vec<CareEvent>>;

    /// Remove all forecast events for a child
    /// Returns the number of events removed
    fn clear_future_events(&self, child_id: &str) -> Result<u32>;
}

/// Trait defining the interface for gap-settings storage operations
pub trait GapSettingsStorage: Send + Sync {
    /// Store the override record for a child
    fn store_gap_settings(&self, child_id: &str, settings: &GapSettings) -> Result<()>;

    /// Retrieve the override record for a child.
    /// Absence is a valid state and returns Ok(None); a record that exists
    /// but cannot be parsed is an error the caller decides how to handle.
    fn get_gap_settings(&self, child_id: &str) -> Result<Option<GapSettings>>;

    /// Delete the override record for a child
    /// Returns true if a record existed and was removed
    fn delete_gap_settings(&self, child_id: &str) -> Result<bool>;
}
