#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use doctor_cell::*;
use shared_utils::test_utils::{hm, test_offset};

/// Monday 09:00-18:00 with a 12:00-13:00 lunch break.
pub fn monday_clinic(doctor_id: Uuid) -> OperatingHoursIndex {
    OperatingHoursIndex::empty(doctor_id)
        .with_window(DayCategory::Monday, hm("09:00"), hm("18:00"))
        .with_window(DayCategory::LunchTime, hm("12:00"), hm("13:00"))
}

pub fn monday_rows(doctor_id: Uuid) -> Vec<OpenHours> {
    vec![
        OpenHours::new(doctor_id, DayCategory::Monday, hm("09:00"), hm("18:00")),
        OpenHours::new(doctor_id, DayCategory::LunchTime, hm("12:00"), hm("13:00")),
    ]
}

pub fn doctor(name: &str) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        name: name.to_string(),
        hospital_name: format!("{} Clinic", name),
    }
}

pub fn service_over(repository: Arc<InMemoryDoctorRepository>) -> DoctorService {
    DoctorService::with_policy(repository, test_offset(), ExpiryPolicy::default())
}
