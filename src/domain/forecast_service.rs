//! Care-event forecasting.
//!
//! Projects forward from the last observed feeding and diaper events,
//! emitting synthetic events at the child's resolved gap interval until the
//! horizon is reached. Generation never persists anything; writing the
//! result into the forecast collection is a separate, caller-initiated step
//! on [`CareLogService`](crate::domain::care_log_service::CareLogService).

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::commands::forecast::{GenerateForecastCommand, GenerateForecastResult};
use crate::domain::gap_settings_service::GapSettingsService;
use crate::domain::models::care_event::{
    CareCategory, CareEvent, CarePayload, DiaperStatus, FeedingMethod, EVENT_SCHEMA_VERSION,
};
use crate::domain::models::gap_settings::GapSettings;
use crate::storage::json::JsonConnection;

/// The span a single forecast invocation covers. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ForecastWindow {
    /// Window covering `[start, start + hours_ahead]`
    pub fn starting_at(start: DateTime<Utc>, hours_ahead: i64) -> Self {
        Self {
            start,
            end: start + Duration::hours(hours_ahead),
        }
    }
}

/// Service for generating feeding and diaper forecasts
#[derive(Clone)]
pub struct ForecastService {
    gap_settings_service: GapSettingsService,
}

impl ForecastService {
    /// Create a new ForecastService
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        let gap_settings_service = GapSettingsService::new(connection);
        Self {
            gap_settings_service,
        }
    }

    /// Generate synthetic feeding and diaper events over the horizon.
    ///
    /// A non-positive horizon yields an empty result rather than an error,
    /// and gap resolution always succeeds, so this only fails on genuinely
    /// unexpected conditions.
    pub fn generate_forecast(
        &self,
        command: GenerateForecastCommand,
    ) -> Result<GenerateForecastResult> {
        info!(
            "🔮 Generating care forecast for child {} over the next {}h",
            command.child_id, command.hours_ahead
        );

        if command.hours_ahead <= 0 {
            debug!("Non-positive forecast horizon, returning no events");
            return Ok(GenerateForecastResult { events: Vec::new() });
        }

        let settings = self
            .gap_settings_service
            .resolve_gap_settings(&command.child_id)?;

        let window = ForecastWindow::starting_at(Utc::now(), command.hours_ahead);
        let events = forecast_within(
            &command.recent_events,
            &settings,
            &window,
            &command.child_id,
        );

        info!(
            "🔮 Generated {} forecast events for child {}",
            events.len(),
            command.child_id
        );

        Ok(GenerateForecastResult { events })
    }
}

/// Core projection over an explicit window. Pure: no clock reads, no I/O.
///
/// Returns the feeding batch followed by the diaper batch; the two are not
/// interleaved chronologically, so callers wanting a merged timeline sort by
/// timestamp themselves.
pub fn forecast_within(
    recent_events: &[CareEvent],
    settings: &GapSettings,
    window: &ForecastWindow,
    child_id: &str,
) -> Vec<CareEvent> {
    let mut events = Vec::new();

    let last_feeding = latest_of_category(recent_events, CareCategory::Feeding)
        .unwrap_or(window.start);
    emit_series(
        &mut events,
        child_id,
        CareCategory::Feeding,
        last_feeding,
        Duration::minutes(settings.feeding_gap_minutes),
        window.end,
    );

    let last_diaper = latest_of_category(recent_events, CareCategory::Diaper)
        .unwrap_or(window.start);
    emit_series(
        &mut events,
        child_id,
        CareCategory::Diaper,
        last_diaper,
        Duration::hours(settings.diaper_gap_hours),
        window.end,
    );

    events
}

/// Most recent timestamp among events of one category.
/// Duplicate timestamps are harmless: only the maximum matters.
fn latest_of_category(events: &[CareEvent], category: CareCategory) -> Option<DateTime<Utc>> {
    events
        .iter()
        .filter(|e| e.category() == category)
        .map(|e| e.timestamp)
        .max()
}

/// Emit one synthetic event per gap interval, starting one interval after
/// `last` and stopping once the candidate passes `window_end` (inclusive).
fn emit_series(
    events: &mut Vec<CareEvent>,
    child_id: &str,
    category: CareCategory,
    last: DateTime<Utc>,
    gap: Duration,
    window_end: DateTime<Utc>,
) {
    let mut candidate = last + gap;
    while candidate <= window_end {
        events.push(CareEvent {
            id: CareEvent::generate_forecast_id(category, child_id, candidate.timestamp_millis()),
            child_id: child_id.to_string(),
            timestamp: candidate,
            version: EVENT_SCHEMA_VERSION,
            payload: synthetic_payload(category),
        });
        candidate += gap;
    }
}

/// Fixed payloads for synthetic events. Bottle and wet are design choices,
/// not inferred from history.
fn synthetic_payload(category: CareCategory) -> CarePayload {
    match category {
        CareCategory::Feeding => CarePayload::Feeding {
            method: FeedingMethod::Bottle,
            quantity_ml: None,
            notes: None,
        },
        CareCategory::Diaper => CarePayload::Diaper {
            status: DiaperStatus::Wet,
            notes: None,
        },
        // Only feeding and diaper events are forecast
        _ => unreachable!("forecasting is limited to feeding and diaper events"),
    }
}
