//! Domain model for a care event.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Schema revision written into every newly created event.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

/// Category discriminant of a care event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareCategory {
    Sleep,
    Feeding,
    Diaper,
    Mood,
    Health,
    Note,
}

impl CareCategory {
    /// Stable string form used in event IDs and storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            CareCategory::Sleep => "sleep",
            CareCategory::Feeding => "feeding",
            CareCategory::Diaper => "diaper",
            CareCategory::Mood => "mood",
            CareCategory::Health => "health",
            CareCategory::Note => "note",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingMethod {
    Bottle,
    Breast,
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaperStatus {
    Wet,
    Dirty,
    Mixed,
    Dry,
}

/// Category-specific event payload. The serde tag ties each payload shape to
/// its category, so a payload stored under the wrong category fails to parse
/// instead of round-tripping silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "payload", rename_all = "snake_case")]
pub enum CarePayload {
    Sleep {
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        duration_minutes: Option<i64>,
    },
    Feeding {
        method: FeedingMethod,
        quantity_ml: Option<f64>,
        notes: Option<String>,
    },
    Diaper {
        status: DiaperStatus,
        notes: Option<String>,
    },
    Mood {
        mood: String,
        notes: Option<String>,
    },
    Health {
        symptom: String,
        temperature_c: Option<f64>,
        notes: Option<String>,
    },
    Note {
        text: String,
    },
}

impl CarePayload {
    pub fn category(&self) -> CareCategory {
        match self {
            CarePayload::Sleep { .. } => CareCategory::Sleep,
            CarePayload::Feeding { .. } => CareCategory::Feeding,
            CarePayload::Diaper { .. } => CareCategory::Diaper,
            CarePayload::Mood { .. } => CareCategory::Mood,
            CarePayload::Health { .. } => CareCategory::Health,
            CarePayload::Note { .. } => CareCategory::Note,
        }
    }
}

/// One observed or forecast care occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareEvent {
    pub id: String,
    pub child_id: String,
    pub timestamp: DateTime<Utc>,
    pub version: u32,
    #[serde(flatten)]
    pub payload: CarePayload,
}

impl CareEvent {
    /// Generate a unique event ID based on category and creation timestamp.
    /// Format: care::<category>::<timestamp_ms>-<random_suffix>
    /// Example: care::feeding::1625846400123-af3c
    pub fn generate_id(category: CareCategory, timestamp_ms: u64) -> String {
        let random_suffix = Self::generate_random_suffix(4);
        format!("care::{}::{}-{}", category.as_str(), timestamp_ms, random_suffix)
    }

    /// ID for a synthetic forecast event. Deterministic per child, category
    /// and slot so re-generated forecasts replace rather than accumulate.
    /// Format: forecast::<category>::<child_id>::<slot_timestamp_ms>
    pub fn generate_forecast_id(
        category: CareCategory,
        child_id: &str,
        slot_timestamp_ms: i64,
    ) -> String {
        format!("forecast::{}::{}::{}", category.as_str(), child_id, slot_timestamp_ms)
    }

    pub fn category(&self) -> CareCategory {
        self.payload.category()
    }

    /// Generate a random hex suffix for event IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CareEventValidationError {
    #[error("Child id cannot be empty")]
    EmptyChildId,
    #[error("Quantity must be positive when present")]
    NonPositiveQuantity,
    #[error("Notes cannot exceed 512 characters")]
    NotesTooLong,
    #[error("Sleep end cannot be before sleep start")]
    SleepEndBeforeStart,
    #[error("Sleep duration cannot be negative")]
    NegativeSleepDuration,
    #[error("Note text cannot be empty")]
    EmptyNote,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feeding_event() -> CareEvent {
        CareEvent {
            id: "care::feeding::1625846400123-af3c".to_string(),
            child_id: "child::1".to_string(),
            timestamp: "2021-07-09T16:00:00Z".parse().unwrap(),
            version: EVENT_SCHEMA_VERSION,
            payload: CarePayload::Feeding {
                method: FeedingMethod::Bottle,
                quantity_ml: Some(120.0),
                notes: None,
            },
        }
    }

    #[test]
    fn test_generate_id_format() {
        let id = CareEvent::generate_id(CareCategory::Diaper, 1234567890);
        assert!(id.starts_with("care::diaper::1234567890-"));
    }

    #[test]
    fn test_generate_forecast_id_is_deterministic() {
        let a = CareEvent::generate_forecast_id(CareCategory::Feeding, "child::1", 1625846400123);
        let b = CareEvent::generate_forecast_id(CareCategory::Feeding, "child::1", 1625846400123);
        assert_eq!(a, b);
        assert_eq!(a, "forecast::feeding::child::1::1625846400123");
    }

    #[test]
    fn test_category_is_derived_from_payload() {
        let event = feeding_event();
        assert_eq!(event.category(), CareCategory::Feeding);
    }

    #[test]
    fn test_serialized_form_carries_category_tag() {
        let event = feeding_event();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["category"], "feeding");
        assert_eq!(json["payload"]["method"], "bottle");
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn test_payload_shape_is_locked_to_category() {
        // A diaper payload under the feeding tag must not parse
        let json = r#"{
            "id": "care::feeding::1-0000",
            "child_id": "child::1",
            "timestamp": "2021-07-09T16:00:00Z",
            "version": 1,
            "category": "feeding",
            "payload": { "status": "wet", "notes": null }
        }"#;
        assert!(serde_json::from_str::<CareEvent>(json).is_err());
    }

    #[test]
    fn test_round_trip_each_category() {
        let payloads = vec![
            CarePayload::Sleep {
                start: "2021-07-09T12:00:00Z".parse().unwrap(),
                end: Some("2021-07-09T13:30:00Z".parse().unwrap()),
                duration_minutes: Some(90),
            },
            CarePayload::Feeding {
                method: FeedingMethod::Breast,
                quantity_ml: None,
                notes: Some("fussy".to_string()),
            },
            CarePayload::Diaper {
                status: DiaperStatus::Mixed,
                notes: None,
            },
            CarePayload::Mood {
                mood: "happy".to_string(),
                notes: None,
            },
            CarePayload::Health {
                symptom: "fever".to_string(),
                temperature_c: Some(38.2),
                notes: None,
            },
            CarePayload::Note {
                text: "first smile".to_string(),
            },
        ];

        for payload in payloads {
            let category = payload.category();
            let event = CareEvent {
                id: CareEvent::generate_id(category, 1),
                child_id: "child::1".to_string(),
                timestamp: Utc::now(),
                version: EVENT_SCHEMA_VERSION,
                payload,
            };
            let json = serde_json::to_string(&event).unwrap();
            let parsed: CareEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, event);
            assert_eq!(parsed.category(), category);
        }
    }
}
