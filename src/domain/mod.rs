//! # Domain Module
//!
//! Contains all business logic for the Aurora Baby care-data backend.
//!
//! This module encapsulates the core rules, entities, and services that
//! define how care events are modeled, recorded, and forecast. It operates
//! independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **child_service**: Child profile CRUD and active-child selection
//! - **care_log_service**: Observed-event CRUD and forecast persistence
//! - **gap_settings_service**: Per-child gap resolution with tiered fallback
//! - **forecast_service**: Synthetic feeding/diaper event generation
//! - **insights_service**: Daily aggregation of the care log
//!
//! ## Core Concepts
//!
//! - **CareEvent**: One observed or forecast occurrence, tagged by category
//! - **GapSettings**: Minimum spacing between events of a category
//! - **ForecastWindow**: The `[now, now + horizon]` span a forecast covers
//!
//! ## Design Principles
//!
//! - **Storage Agnostic**: Services depend on repository traits, not files
//! - **Degrade, Don't Fail**: Gap resolution always produces usable settings
//! - **Explicit Persistence**: Forecast generation never writes on its own

pub mod care_log_service;
pub mod child_service;
pub mod commands;
pub mod forecast_service;
pub mod gap_settings_service;
pub mod insights_service;
pub mod models;

pub use care_log_service::*;
pub use child_service::*;
pub use commands::*;
pub use forecast_service::*;
pub use gap_settings_service::*;
pub use insights_service::*;
