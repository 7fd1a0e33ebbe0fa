//! Storage layer: abstraction traits and the JSON key-value implementation.

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{CareEventStorage, ChildProfileStorage, GapSettingsStorage};
