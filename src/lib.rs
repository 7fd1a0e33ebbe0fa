//! # Aurora Baby Care-Data Backend
//!
//! Storage and domain logic for logging infant-care events and forecasting
//! upcoming feedings and diaper changes. The backend:
//!
//! - Uses synchronous operations against a JSON key-value data directory
//! - Provides direct access to domain services for an embedding UI
//! - Exposes no network, CLI, or rendering surface
//!
//! Logging uses the `log` facade; the embedding application installs
//! whatever logger it prefers.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

// Re-export commonly used types
pub use storage::json::JsonConnection;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub child_service: domain::child_service::ChildService,
    pub care_log_service: domain::care_log_service::CareLogService,
    pub gap_settings_service: domain::gap_settings_service::GapSettingsService,
    pub forecast_service: domain::forecast_service::ForecastService,
    pub insights_service: domain::insights_service::InsightsService,
}

impl Backend {
    /// Create a backend over the platform's default data directory
    pub fn new() -> Result<Self> {
        let connection = Arc::new(JsonConnection::new_default()?);
        Ok(Self::with_connection(connection))
    }

    /// Create a backend over an explicit data directory
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_dir)?);
        Ok(Self::with_connection(connection))
    }

    fn with_connection(connection: Arc<JsonConnection>) -> Self {
        let child_service = domain::child_service::ChildService::new(connection.clone());
        let care_log_service = domain::care_log_service::CareLogService::new(connection.clone());
        let gap_settings_service =
            domain::gap_settings_service::GapSettingsService::new(connection.clone());
        let forecast_service = domain::forecast_service::ForecastService::new(connection.clone());
        let insights_service = domain::insights_service::InsightsService::new(connection);

        Backend {
            child_service,
            care_log_service,
            gap_settings_service,
            forecast_service,
            insights_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::care_log::SaveForecastCommand;
    use crate::domain::commands::child::CreateChildCommand;
    use crate::domain::commands::forecast::GenerateForecastCommand;
    use tempfile::tempdir;

    /// End-to-end pass over the main flow: create a child, log history,
    /// generate a forecast, and persist it explicitly.
    #[test]
    fn test_forecast_flow_through_backend() {
        let temp_dir = tempdir().unwrap();
        let backend = Backend::with_data_dir(temp_dir.path()).unwrap();

        let child = backend
            .child_service
            .create_child(CreateChildCommand {
                name: "Aurora".to_string(),
                birthdate: "2026-05-15".to_string(),
            })
            .unwrap()
            .child;

        let recent = backend.care_log_service.recent_events(&child.id, 48).unwrap();
        let forecast = backend
            .forecast_service
            .generate_forecast(GenerateForecastCommand {
                child_id: child.id.clone(),
                recent_events: recent,
                hours_ahead: 24,
            })
            .unwrap();
        assert!(!forecast.events.is_empty());

        // Nothing is persisted until the caller says so
        assert!(backend.care_log_service.list_forecast(&child.id).unwrap().is_empty());

        backend
            .care_log_service
            .save_forecast(SaveForecastCommand {
                child_id: child.id.clone(),
                events: forecast.events.clone(),
            })
            .unwrap();

        let persisted = backend.care_log_service.list_forecast(&child.id).unwrap();
        assert_eq!(persisted.len(), forecast.events.len());
    }
}
