use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// DAY CATEGORIES
// ==============================================================================

/// Key of an operating-hours row. The seven weekdays are numbered like
/// `Weekday::num_days_from_monday`; the last two are overlay periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayCategory {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
    LunchTime = 7,
    /// Reserved. No availability rule reads it yet.
    Holiday = 8,
}

impl DayCategory {
    pub const WEEKDAYS: [DayCategory; 7] = [
        DayCategory::Monday,
        DayCategory::Tuesday,
        DayCategory::Wednesday,
        DayCategory::Thursday,
        DayCategory::Friday,
        DayCategory::Saturday,
        DayCategory::Sunday,
    ];

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::WEEKDAYS[weekday.num_days_from_monday() as usize]
    }

    pub fn is_weekday(self) -> bool {
        (self as u8) < 7
    }
}

impl TryFrom<u8> for DayCategory {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=6 => Ok(Self::WEEKDAYS[value as usize]),
            7 => Ok(DayCategory::LunchTime),
            8 => Ok(DayCategory::Holiday),
            other => Err(format!("unknown day category {}", other)),
        }
    }
}

impl From<DayCategory> for u8 {
    fn from(value: DayCategory) -> Self {
        value as u8
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCategory::Monday => "monday",
            DayCategory::Tuesday => "tuesday",
            DayCategory::Wednesday => "wednesday",
            DayCategory::Thursday => "thursday",
            DayCategory::Friday => "friday",
            DayCategory::Saturday => "saturday",
            DayCategory::Sunday => "sunday",
            DayCategory::LunchTime => "lunch_time",
            DayCategory::Holiday => "holiday",
        };
        f.write_str(name)
    }
}

// ==============================================================================
// OPERATING HOURS
// ==============================================================================

/// Opening and closing time for one category. Either side may be missing,
/// in which case the category counts as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub opened: Option<NaiveTime>,
    pub closed: Option<NaiveTime>,
}

impl TimeWindow {
    pub fn new(opened: NaiveTime, closed: NaiveTime) -> Self {
        Self {
            opened: Some(opened),
            closed: Some(closed),
        }
    }

    pub fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        match (self.opened, self.closed) {
            (Some(opened), Some(closed)) => Some((opened, closed)),
            _ => None,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.bounds()
            .map(|(opened, closed)| opened <= time && time <= closed)
            .unwrap_or(false)
    }
}

/// One stored row of a doctor's hours, as persisted in `open_hours`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenHours {
    pub doctor_id: Uuid,
    pub day_type: DayCategory,
    pub opened_time: Option<NaiveTime>,
    pub closed_time: Option<NaiveTime>,
}

impl OpenHours {
    pub fn new(doctor_id: Uuid, day_type: DayCategory, opened: NaiveTime, closed: NaiveTime) -> Self {
        Self {
            doctor_id,
            day_type,
            opened_time: Some(opened),
            closed_time: Some(closed),
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            opened: self.opened_time,
            closed: self.closed_time,
        }
    }
}

// ==============================================================================
// DOCTORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub hospital_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorListQuery {
    /// Only doctors open at this instant are listed when present.
    pub request_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_category_round_trips_through_integer() {
        for value in 0u8..=8 {
            let category = DayCategory::try_from(value).unwrap();
            assert_eq!(u8::from(category), value);
        }
        assert!(DayCategory::try_from(9).is_err());
    }

    #[test]
    fn weekday_mapping_starts_on_monday() {
        assert_eq!(DayCategory::from_weekday(Weekday::Mon), DayCategory::Monday);
        assert_eq!(DayCategory::from_weekday(Weekday::Sun), DayCategory::Sunday);
        assert!(!DayCategory::LunchTime.is_weekday());
        assert!(!DayCategory::Holiday.is_weekday());
    }

    #[test]
    fn open_hours_row_deserializes_from_postgrest() {
        let row: OpenHours = serde_json::from_value(serde_json::json!({
            "doctor_id": "8d3c8a5e-4b8e-4c47-9d61-0f7d1c0e2f11",
            "day_type": 7,
            "opened_time": "12:00:00",
            "closed_time": null
        }))
        .unwrap();
        assert_eq!(row.day_type, DayCategory::LunchTime);
        assert!(row.window().bounds().is_none());
    }

    #[test]
    fn incomplete_window_contains_nothing() {
        let window = TimeWindow {
            opened: NaiveTime::from_hms_opt(9, 0, 0),
            closed: None,
        };
        assert!(!window.contains(NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
    }
}
