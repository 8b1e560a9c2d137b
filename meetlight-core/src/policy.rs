//! Office-hours window.

use std::ops::Range;

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::error::{CoreError, CoreResult};

/// Weekdays and hours during which calendar status is evaluated.
///
/// Weekdays are 0-indexed from Monday. Hours are a half-open range,
/// so the default `9..20` covers 09:00 through 19:59.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyWindow {
    weekdays: Vec<u32>,
    hours: Range<u32>,
}

impl Default for PolicyWindow {
    fn default() -> Self {
        PolicyWindow {
            weekdays: (0..5).collect(),
            hours: 9..20,
        }
    }
}

impl PolicyWindow {
    pub fn new(weekdays: Vec<u32>, hours: Range<u32>) -> CoreResult<Self> {
        if let Some(day) = weekdays.iter().find(|d| **d > 6) {
            return Err(CoreError::Config(format!(
                "Invalid office day {} (expected 0 = Monday .. 6 = Sunday)",
                day
            )));
        }

        if hours.is_empty() || hours.end > 24 {
            return Err(CoreError::Config(format!(
                "Invalid office hours {}..{} (expected start < end <= 24)",
                hours.start, hours.end
            )));
        }

        Ok(PolicyWindow { weekdays, hours })
    }

    pub fn weekdays(&self) -> &[u32] {
        &self.weekdays
    }

    pub fn hours(&self) -> &Range<u32> {
        &self.hours
    }

    /// Whether `now` falls inside office hours.
    pub fn contains<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        let weekday = now.weekday().num_days_from_monday();
        self.weekdays.contains(&weekday) && self.hours.contains(&now.hour())
    }
}
