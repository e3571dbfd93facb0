use chrono::{Datelike, NaiveDateTime};
use tracing::debug;

use crate::models::DayCategory;
use crate::services::hours::OperatingHoursIndex;

/// Decides whether a doctor is seeing patients at a given wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvailabilityChecker;

impl AvailabilityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Open means inside that weekday's window and outside the lunch window.
    /// Both windows include their end points.
    pub fn is_open(&self, index: &OperatingHoursIndex, at: NaiveDateTime) -> bool {
        let day = DayCategory::from_weekday(at.weekday());
        let time = at.time();

        let within_hours = index
            .window(day)
            .map(|window| window.contains(time))
            .unwrap_or(false);

        if !within_hours {
            debug!("Doctor {} closed on {} at {}", index.doctor_id(), day, time);
            return false;
        }

        let within_lunch = index
            .lunch()
            .map(|lunch| lunch.contains(time))
            .unwrap_or(false);

        if within_lunch {
            debug!("Doctor {} at lunch at {}", index.doctor_id(), time);
            return false;
        }

        true
    }
}
