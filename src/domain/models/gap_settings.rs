//! Domain model for per-child gap settings.
use serde::{Deserialize, Serialize};

/// Minimum spacing between care events of a category. Stored verbatim as the
/// per-child override record; also produced transiently by the resolver when
/// no override exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSettings {
    pub feeding_gap_minutes: i64,
    pub diaper_gap_hours: i64,
    /// Carried through the record lifecycle; the forecast engine does not
    /// consume it yet.
    pub sleep_gap_hours: i64,
}

impl GapSettings {
    /// Hardcoded last-resort defaults when neither an override nor a child
    /// profile is available.
    pub fn fallback() -> Self {
        Self {
            feeding_gap_minutes: 180,
            diaper_gap_hours: 6,
            sleep_gap_hours: 6,
        }
    }

    /// Age-appropriate defaults derived from the child's age in months.
    pub fn age_defaults(age_months: i32) -> Self {
        let feeding_gap_minutes = match age_months {
            m if m < 1 => 120,
            m if m < 3 => 150,
            m if m < 6 => 180,
            m if m < 12 => 210,
            _ => 240,
        };
        let diaper_gap_hours = match age_months {
            m if m < 3 => 4,
            m if m < 12 => 5,
            _ => 6,
        };
        Self {
            feeding_gap_minutes,
            diaper_gap_hours,
            sleep_gap_hours: 6,
        }
    }

    /// A stored record is only usable when every gap is positive.
    pub fn is_valid(&self) -> bool {
        self.feeding_gap_minutes > 0 && self.diaper_gap_hours > 0 && self.sleep_gap_hours > 0
    }
}
