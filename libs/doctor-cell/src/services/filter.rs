use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::models::Doctor;
use crate::services::availability::AvailabilityChecker;
use crate::services::hours::OperatingHoursIndex;

/// Narrows a roster down to the doctors open at one instant.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoctorAvailabilityFilter {
    checker: AvailabilityChecker,
}

impl DoctorAvailabilityFilter {
    pub fn new(checker: AvailabilityChecker) -> Self {
        Self { checker }
    }

    /// Each doctor appears at most once in the result, in roster order.
    pub fn open_at<I>(&self, roster: I, at: NaiveDateTime) -> Vec<Doctor>
    where
        I: IntoIterator<Item = (Doctor, OperatingHoursIndex)>,
    {
        let mut seen = HashSet::new();

        roster
            .into_iter()
            .filter(|(_, index)| self.checker.is_open(index, at))
            .filter(|(doctor, _)| seen.insert(doctor.id))
            .map(|(doctor, _)| doctor)
            .collect()
    }
}
