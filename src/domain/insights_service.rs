//! Daily aggregation of care events for insight views.
//!
//! Buckets a child's observed events by UTC calendar day and produces one
//! summary per day across the requested range. Days without events still get
//! a zeroed summary so chart consumers see a dense series.

use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::commands::insights::{DailySummariesCommand, DailySummariesResult, DailySummary};
use crate::domain::models::care_event::{CareEvent, CarePayload};
use crate::storage::json::{CareEventRepository, JsonConnection};
use crate::storage::traits::CareEventStorage;

/// Service computing per-day aggregates over a child's care log
#[derive(Clone)]
pub struct InsightsService {
    event_repository: CareEventRepository,
}

impl InsightsService {
    /// Create a new InsightsService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let event_repository = CareEventRepository::new(connection);
        Self { event_repository }
    }

    /// One summary per day over the inclusive date range, in date order
    pub fn daily_summaries(&self, command: DailySummariesCommand) -> Result<DailySummariesResult> {
        if command.start_date > command.end_date {
            return Err(anyhow::anyhow!(
                "Start date {} is after end date {}",
                command.start_date,
                command.end_date
            ));
        }

        // Fetch through the start of the day after the range; anything that
        // buckets to a day past end_date is dropped below
        let range_start = Utc.from_utc_datetime(&command.start_date.and_hms_opt(0, 0, 0).unwrap());
        let day_after_end = command
            .end_date
            .succ_opt()
            .unwrap_or(command.end_date);
        let range_end = Utc.from_utc_datetime(&day_after_end.and_hms_opt(0, 0, 0).unwrap());

        let events =
            self.event_repository
                .list_events_range(&command.child_id, range_start, range_end)?;
        debug!(
            "Summarizing {} events for child {} between {} and {}",
            events.len(),
            command.child_id,
            command.start_date,
            command.end_date
        );

        // Group events by their UTC calendar day
        let mut events_by_day: HashMap<NaiveDate, Vec<&CareEvent>> = HashMap::new();
        for event in &events {
            events_by_day
                .entry(event.timestamp.date_naive())
                .or_default()
                .push(event);
        }

        let mut summaries = Vec::new();
        let mut day = command.start_date;
        while day <= command.end_date {
            let day_events = events_by_day.remove(&day).unwrap_or_default();
            summaries.push(summarize_day(day, &day_events));

            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(DailySummariesResult { summaries })
    }
}

fn summarize_day(date: NaiveDate, events: &[&CareEvent]) -> DailySummary {
    let mut summary = DailySummary {
        date,
        sleep_sessions: 0,
        sleep_minutes: 0,
        feedings: 0,
        diaper_changes: 0,
        moods: 0,
        health_events: 0,
        notes: 0,
    };

    for event in events {
        match &event.payload {
            CarePayload::Sleep {
                start,
                end,
                duration_minutes,
            } => {
                summary.sleep_sessions += 1;
                // Prefer the explicit duration; fall back to the span when
                // both endpoints were recorded
                summary.sleep_minutes += match (duration_minutes, end) {
                    (Some(minutes), _) => *minutes,
                    (None, Some(end)) => (*end - *start).num_minutes(),
                    (None, None) => 0,
                };
            }
            CarePayload::Feeding { .. } => summary.feedings += 1,
            CarePayload::Diaper { .. } => summary.diaper_changes += 1,
            CarePayload::Mood { .. } => summary.moods += 1,
            CarePayload::Health { .. } => summary.health_events += 1,
            CarePayload::Note { .. } => summary.notes += 1,
        }
    }

    summary
}
