//! Domain model for a child profile.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Domain model representing a child in the system.
/// This model contains the core business information for a child,
/// including the birth date the gap-settings resolver derives defaults from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildProfile {
    pub id: String,
    pub name: String,
    pub birthdate: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChildProfile {
    /// Generate a unique ID for a child profile.
    /// Format: child::<timestamp_ms>-<random_suffix>
    pub fn generate_id(timestamp_millis: u64) -> String {
        let random_suffix = Self::generate_random_suffix(4);
        format!("child::{}-{}", timestamp_millis, random_suffix)
    }

    /// Generate a random hex suffix for profile IDs.
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

    /// Age in whole months on the given date, at month granularity.
    /// Day-of-month is ignored on both sides.
    pub fn age_in_months(&self, on: NaiveDate) -> i32 {
        (on.year() - self.birthdate.year()) * 12
            + (on.month() as i32 - self.birthdate.month() as i32)
    }
}

/// Represents the active child, which could be None if no child is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveChild {
    pub child: Option<ChildProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = ChildProfile::generate_id(1234567890);
        assert!(id.starts_with("child::1234567890-"));
    }

    #[test]
    fn test_age_in_months_ignores_day_of_month() {
        let child = ChildProfile {
            id: "child::1".to_string(),
            name: "Test".to_string(),
            birthdate: NaiveDate::from_ymd_opt(2025, 3, 28).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        // Same month, earlier day: still 0 months
        assert_eq!(child.age_in_months(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()), 0);
        // Next month, first day: already 1 month despite only 4 elapsed days
        assert_eq!(child.age_in_months(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()), 1);
        // Across a year boundary
        assert_eq!(child.age_in_months(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()), 11);
        assert_eq!(child.age_in_months(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), 12);
    }
}
