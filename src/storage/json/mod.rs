//! # JSON Storage Module
//!
//! File-based key-value storage for the care-data backend. Every logical key
//! maps to one JSON file under the data directory, written atomically.
//!
//! ## Key Layout
//!
//! ```text
//! data/
//! ├── care_log_all.json              ← care_log:all (observed events)
//! ├── care_log_future.json           ← care_log:future (persisted forecasts)
//! ├── active_child.json              ← active_child
//! ├── child_profile_child__123.json  ← child_profile:child::123
//! └── gap_settings_child__123.json   ← gap_settings:child::123
//! ```
//!
//! Event collections are JSON arrays of `CareEvent`; profile and settings
//! keys each hold a single JSON object.

pub mod connection;
pub mod child_repository;
pub mod event_repository;
pub mod gap_settings_repository;

pub use connection::JsonConnection;
pub use child_repository::ChildProfileRepository;
pub use event_repository::CareEventRepository;
pub use gap_settings_repository::GapSettingsRepository;
