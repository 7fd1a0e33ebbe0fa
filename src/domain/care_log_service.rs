//! Care-log service: observed-event CRUD plus the explicit persistence step
//! for generated forecasts.

use anyhow::Result;
use chrono::{Duration, Utc};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::care_log::{
    CareEventListQuery, CareEventListResult, LogCareEventCommand, LogCareEventResult,
    SaveForecastCommand, SaveForecastResult,
};
use crate::domain::models::care_event::{
    CareEvent, CareEventValidationError, CarePayload, EVENT_SCHEMA_VERSION,
};
use crate::storage::json::{CareEventRepository, ChildProfileRepository, JsonConnection};
use crate::storage::traits::{CareEventStorage, ChildProfileStorage};

const MAX_NOTES_LEN: usize = 512;

/// Service for recording and querying care events
#[derive(Clone)]
pub struct CareLogService {
    event_repository: CareEventRepository,
    child_repository: ChildProfileRepository,
}

impl CareLogService {
    /// Create a new CareLogService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let event_repository = CareEventRepository::new(connection.clone());
        let child_repository = ChildProfileRepository::new(connection);
        Self {
            event_repository,
            child_repository,
        }
    }

    /// Record a new observed event
    pub fn log_event(&self, command: LogCareEventCommand) -> Result<LogCareEventResult> {
        if command.child_id.trim().is_empty() {
            return Err(CareEventValidationError::EmptyChildId.into());
        }
        validate_payload(&command.payload)?;

        if self.child_repository.get_child(&command.child_id)?.is_none() {
            return Err(anyhow::anyhow!("Child not found: {}", command.child_id));
        }

        let now = Utc::now();
        let timestamp = command.timestamp.unwrap_or(now);
        let category = command.payload.category();

        let event = CareEvent {
            id: CareEvent::generate_id(category, now.timestamp_millis() as u64),
            child_id: command.child_id,
            timestamp,
            version: EVENT_SCHEMA_VERSION,
            payload: command.payload,
        };

        self.event_repository.store_event(&event)?;

        info!(
            "Logged {} event {} for child {}",
            category.as_str(),
            event.id,
            event.child_id
        );

        Ok(LogCareEventResult { event })
    }

    /// Retrieve a single observed event by ID
    pub fn get_event(&self, event_id: &str) -> Result<Option<CareEvent>> {
        self.event_repository.get_event(event_id)
    }

    /// List a child's observed events in chronological order, optionally
    /// bounded by an inclusive time range
    pub fn list_events(
        &self,
        child_id: &str,
        query: CareEventListQuery,
    ) -> Result<CareEventListResult> {
        let events = match (query.start, query.end) {
            (None, None) => self.event_repository.list_events(child_id)?,
            (start, end) => {
                let start = start.unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
                let end = end.unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);
                self.event_repository.list_events_range(child_id, start, end)?
            }
        };

        debug!("Listed {} events for child {}", events.len(), child_id);
        Ok(CareEventListResult { events })
    }

    /// Observed events within the trailing lookback window, the slice the
    /// forecast engine is normally fed
    pub fn recent_events(&self, child_id: &str, lookback_hours: i64) -> Result<Vec<CareEvent>> {
        let now = Utc::now();
        self.event_repository
            .list_events_range(child_id, now - Duration::hours(lookback_hours), now)
    }

    /// Delete a single observed event
    pub fn delete_event(&self, event_id: &str) -> Result<bool> {
        let deleted = self.event_repository.delete_event(event_id)?;
        if deleted {
            info!("Deleted event: {}", event_id);
        }
        Ok(deleted)
    }

    /// Persist a generated forecast, replacing the child's previous one.
    /// This is the explicit step forecast generation itself never performs.
    pub fn save_forecast(&self, command: SaveForecastCommand) -> Result<SaveForecastResult> {
        if let Some(stray) = command
            .events
            .iter()
            .find(|e| e.child_id != command.child_id)
        {
            return Err(anyhow::anyhow!(
                "Forecast event {} belongs to child {}, not {}",
                stray.id,
                stray.child_id,
                command.child_id
            ));
        }

        self.event_repository
            .replace_future_events(&command.child_id, &command.events)?;

        let saved_count = command.events.len();
        info!(
            "Saved {} forecast events for child {}",
            saved_count, command.child_id
        );

        Ok(SaveForecastResult {
            saved_count,
            success_message: format!("Saved {} forecast events", saved_count),
        })
    }

    /// List the child's persisted forecast events in chronological order
    pub fn list_forecast(&self, child_id: &str) -> Result<Vec<CareEvent>> {
        self.event_repository.list_future_events(child_id)
    }

    /// Drop the child's persisted forecast. Returns the number removed.
    pub fn clear_forecast(&self, child_id: &str) -> Result<u32> {
        let removed = self.event_repository.clear_future_events(child_id)?;
        info!("Cleared {} forecast events for child {}", removed, child_id);
        Ok(removed)
    }
}

/// Payload-specific validation for observed events
fn validate_payload(payload: &CarePayload) -> Result<(), CareEventValidationError> {
    match payload {
        CarePayload::Sleep {
            start,
            end,
            duration_minutes,
        } => {
            if let Some(end) = end {
                if end < start {
                    return Err(CareEventValidationError::SleepEndBeforeStart);
                }
            }
            if let Some(duration) = duration_minutes {
                if *duration < 0 {
                    return Err(CareEventValidationError::NegativeSleepDuration);
                }
            }
        }
        CarePayload::Feeding {
            quantity_ml, notes, ..
        } => {
            if let Some(quantity) = quantity_ml {
                if *quantity <= 0.0 {
                    return Err(CareEventValidationError::NonPositiveQuantity);
                }
            }
            validate_notes(notes)?;
        }
        CarePayload::Diaper { notes, .. } => validate_notes(notes)?,
        CarePayload::Mood { notes, .. } => validate_notes(notes)?,
        CarePayload::Health { notes, .. } => validate_notes(notes)?,
        CarePayload::Note { text } => {
            if text.trim().is_empty() {
                return Err(CareEventValidationError::EmptyNote);
            }
            if text.len() > MAX_NOTES_LEN {
                return Err(CareEventValidationError::NotesTooLong);
            }
        }
    }
    Ok(())
}

fn validate_notes(notes: &Option<String>) -> Result<(), CareEventValidationError> {
    if let Some(notes) = notes {
        if notes.len() > MAX_NOTES_LEN {
            return Err(CareEventValidationError::NotesTooLong);
        }
    }
    Ok(())
}
