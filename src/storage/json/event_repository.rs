//! # JSON Care-Event Repository
//!
//! Stores two collections of events, each a single JSON array:
//!
//! - `care_log:all`: observed events for every child
//! - `care_log:future`: persisted forecast events
//!
//! Individual array entries that no longer match the event schema are
//! skipped with a warning on read; they are dropped for good on the next
//! write of the collection.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::care_event::CareEvent;
use crate::storage::traits::CareEventStorage;

const ALL_EVENTS_KEY: &str = "care_log:all";
const FUTURE_EVENTS_KEY: &str = "care_log:future";

/// JSON-backed care-event repository
#[derive(Clone)]
pub struct CareEventRepository {
    connection: Arc<JsonConnection>,
}

impl CareEventRepository {
    /// Create a new care-event repository
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// Read a whole collection. A missing key is an empty collection.
    fn read_collection(&self, key: &str) -> Result<Vec<CareEvent>> {
        let raw = match self.connection.read_key(key)? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let values: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed event collection: {}", key))?;

        let mut events = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::from_value::<CareEvent>(value) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Skipping unparseable event in '{}': {}", key, e),
            }
        }
        debug!("Read {} events from '{}'", events.len(), key);
        Ok(events)
    }

    fn write_collection(&self, key: &str, events: &[CareEvent]) -> Result<()> {
        let contents = serde_json::to_string_pretty(events)?;
        self.connection.write_key(key, &contents)?;
        debug!("Wrote {} events to '{}'", events.len(), key);
        Ok(())
    }

    fn filter_child_chronological(events: Vec<CareEvent>, child_id: &str) -> Vec<CareEvent> {
        let mut filtered: Vec<CareEvent> = events
            .into_iter()
            .filter(|e| e.child_id == child_id)
            .collect();
        filtered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        filtered
    }
}

impl CareEventStorage for CareEventRepository {
    fn store_event(&self, event: &CareEvent) -> Result<()> {
        let mut events = self.read_collection(ALL_EVENTS_KEY)?;
        events.push(event.clone());
        self.write_collection(ALL_EVENTS_KEY, &events)
    }

    fn get_event(&self, event_id: &str) -> Result<Option<CareEvent>> {
        let events = self.read_collection(ALL_EVENTS_KEY)?;
        Ok(events.into_iter().find(|e| e.id == event_id))
    }

    fn list_events(&self, child_id: &str) -> Result<Vec<CareEvent>> {
        let events = self.read_collection(ALL_EVENTS_KEY)?;
        Ok(Self::filter_child_chronological(events, child_id))
    }

    fn list_events_range(
        &self,
        child_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CareEvent>> {
        let events = self.list_events(child_id)?;
        Ok(events
            .into_iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect())
    }

    fn delete_event(&self, event_id: &str) -> Result<bool> {
        let mut events = self.read_collection(ALL_EVENTS_KEY)?;
        let before = events.len();
        events.retain(|e| e.id != event_id);

        if events.len() == before {
            warn!("Attempted to delete a non-existent event: {}", event_id);
            return Ok(false);
        }

        self.write_collection(ALL_EVENTS_KEY, &events)?;
        Ok(true)
    }

    fn replace_future_events(&self, child_id: &str, new_events: &[CareEvent]) -> Result<()> {
        let mut events = self.read_collection(FUTURE_EVENTS_KEY)?;
        events.retain(|e| e.child_id != child_id);
        events.extend_from_slice(new_events);
        self.write_collection(FUTURE_EVENTS_KEY, &events)
    }

    fn list_future_events(&self, child_id: &str) -> Result<Vec<CareEvent>> {
        let events = self.read_collection(FUTURE_EVENTS_KEY)?;
        Ok(Self::filter_child_chronological(events, child_id))
    }

    fn clear_future_events(&self, child_id: &str) -> Result<u32> {
        let mut events = self.read_collection(FUTURE_EVENTS_KEY)?;
        let before = events.len();
        events.retain(|e| e.child_id != child_id);
        let removed = (before - events.len()) as u32;

        if removed > 0 {
            self.write_collection(FUTURE_EVENTS_KEY, &events)?;
        }
        Ok(removed)
    }
}
