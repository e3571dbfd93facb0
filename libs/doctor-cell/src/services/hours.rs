use std::collections::BTreeMap;

use chrono::NaiveTime;
use tracing::debug;
use uuid::Uuid;

use crate::error::DoctorError;
use crate::models::{DayCategory, OpenHours, TimeWindow};

/// A doctor's hours keyed by category, built fresh from the stored rows on
/// every request. Holds at most one window per category.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingHoursIndex {
    doctor_id: Uuid,
    windows: BTreeMap<DayCategory, TimeWindow>,
}

impl OperatingHoursIndex {
    pub fn empty(doctor_id: Uuid) -> Self {
        Self {
            doctor_id,
            windows: BTreeMap::new(),
        }
    }

    /// Group a doctor's rows by category. A second row for a category is
    /// rejected rather than silently overwriting the first.
    pub fn build<I>(doctor_id: Uuid, rows: I) -> Result<Self, DoctorError>
    where
        I: IntoIterator<Item = OpenHours>,
    {
        let mut index = Self::empty(doctor_id);

        for row in rows {
            if index.windows.insert(row.day_type, row.window()).is_some() {
                return Err(DoctorError::DuplicateHours {
                    doctor_id,
                    day: row.day_type,
                });
            }
        }

        debug!("Built hours index for doctor {} with {} categories", doctor_id, index.windows.len());
        Ok(index)
    }

    /// Builder-style insert, replacing any existing window for `day`.
    pub fn with_window(mut self, day: DayCategory, opened: NaiveTime, closed: NaiveTime) -> Self {
        self.windows.insert(day, TimeWindow::new(opened, closed));
        self
    }

    pub fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }

    pub fn window(&self, day: DayCategory) -> Option<&TimeWindow> {
        self.windows.get(&day)
    }

    /// Opening and closing time for `day`, if a complete window is recorded.
    pub fn bounds(&self, day: DayCategory) -> Option<(NaiveTime, NaiveTime)> {
        self.window(day).and_then(TimeWindow::bounds)
    }

    pub fn lunch(&self) -> Option<&TimeWindow> {
        self.window(DayCategory::LunchTime)
    }

    pub fn has_weekday_hours(&self) -> bool {
        DayCategory::WEEKDAYS.iter().any(|day| self.bounds(*day).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }
}
