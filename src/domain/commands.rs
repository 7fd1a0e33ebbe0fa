//! Domain-level command and query types
//!
//! These structs are used by services inside the domain layer. An embedding
//! application maps its own request types onto these before calling a
//! service.

pub mod child {
    use crate::domain::models::child::{ActiveChild, ChildProfile};

    /// Input for creating a new child profile.
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        /// ISO 8601 date, `YYYY-MM-DD`
        pub birthdate: String,
    }

    /// Input for updating a child profile.
    #[derive(Debug, Clone)]
    pub struct UpdateChildCommand {
        pub child_id: String,
        pub name: Option<String>,
        pub birthdate: Option<String>,
    }

    /// Input for fetching a single child profile.
    #[derive(Debug, Clone)]
    pub struct GetChildCommand {
        pub child_id: String,
    }

    /// Input for deleting a child profile.
    #[derive(Debug, Clone)]
    pub struct DeleteChildCommand {
        pub child_id: String,
    }

    /// Input for selecting the active child.
    #[derive(Debug, Clone)]
    pub struct SetActiveChildCommand {
        pub child_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct CreateChildResult {
        pub child: ChildProfile,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateChildResult {
        pub child: ChildProfile,
    }

    #[derive(Debug, Clone)]
    pub struct GetChildResult {
        pub child: Option<ChildProfile>,
    }

    #[derive(Debug, Clone)]
    pub struct ListChildrenResult {
        pub children: Vec<ChildProfile>,
    }

    #[derive(Debug, Clone)]
    pub struct GetActiveChildResult {
        pub active_child: ActiveChild,
    }

    #[derive(Debug, Clone)]
    pub struct SetActiveChildResult {
        pub child: ChildProfile,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteChildResult {
        pub success_message: String,
    }
}

pub mod care_log {
    use crate::domain::models::care_event::{CareEvent, CarePayload};
    use chrono::{DateTime, Utc};

    /// Input for logging a new observed event.
    #[derive(Debug, Clone)]
    pub struct LogCareEventCommand {
        pub child_id: String,
        /// Occurrence time; defaults to now when absent
        pub timestamp: Option<DateTime<Utc>>,
        pub payload: CarePayload,
    }

    /// Query parameters for listing observed events.
    #[derive(Debug, Clone, Default)]
    pub struct CareEventListQuery {
        pub start: Option<DateTime<Utc>>,
        pub end: Option<DateTime<Utc>>,
    }

    /// Input for persisting a generated forecast.
    #[derive(Debug, Clone)]
    pub struct SaveForecastCommand {
        pub child_id: String,
        pub events: Vec<CareEvent>,
    }

    #[derive(Debug, Clone)]
    pub struct LogCareEventResult {
        pub event: CareEvent,
    }

    #[derive(Debug, Clone)]
    pub struct CareEventListResult {
        pub events: Vec<CareEvent>,
    }

    #[derive(Debug, Clone)]
    pub struct SaveForecastResult {
        pub saved_count: usize,
        pub success_message: String,
    }
}

pub mod gap_settings {
    use crate::domain::models::gap_settings::GapSettings;

    /// Input for saving a per-child override.
    #[derive(Debug, Clone)]
    pub struct UpdateGapSettingsCommand {
        pub child_id: String,
        pub feeding_gap_minutes: i64,
        pub diaper_gap_hours: i64,
        pub sleep_gap_hours: i64,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateGapSettingsResult {
        pub gap_settings: GapSettings,
        pub success_message: String,
    }
}

pub mod forecast {
    use crate::domain::models::care_event::CareEvent;

    /// Input for generating a forecast.
    #[derive(Debug, Clone)]
    pub struct GenerateForecastCommand {
        pub child_id: String,
        /// Observed history the engine projects forward from; the caller
        /// decides how far back this reaches
        pub recent_events: Vec<CareEvent>,
        pub hours_ahead: i64,
    }

    #[derive(Debug, Clone)]
    pub struct GenerateForecastResult {
        /// Feeding batch first, then diaper batch; unsorted across the two
        pub events: Vec<CareEvent>,
    }
}

pub mod insights {
    use chrono::NaiveDate;

    /// Input for computing daily summaries over an inclusive date range.
    #[derive(Debug, Clone)]
    pub struct DailySummariesCommand {
        pub child_id: String,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    /// Aggregates of one child's events on one calendar day (UTC).
    #[derive(Debug, Clone, PartialEq)]
    pub struct DailySummary {
        pub date: NaiveDate,
        pub sleep_sessions: u32,
        pub sleep_minutes: i64,
        pub feedings: u32,
        pub diaper_changes: u32,
        pub moods: u32,
        pub health_events: u32,
        pub notes: u32,
    }

    #[derive(Debug, Clone)]
    pub struct DailySummariesResult {
        /// One entry per day in the range, in date order; days without
        /// events carry zeroed summaries
        pub summaries: Vec<DailySummary>,
    }
}
