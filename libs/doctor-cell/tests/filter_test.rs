mod common;

use uuid::Uuid;

use doctor_cell::*;
use shared_utils::test_utils::{hm, local};

use common::{doctor, monday_clinic};

#[test]
fn test_keeps_only_doctors_open_at_the_instant() {
    let morning = doctor("Morning");
    let evening = doctor("Evening");
    let closed = doctor("Closed");

    let roster = vec![
        (morning.clone(), monday_clinic(morning.id)),
        (
            evening.clone(),
            OperatingHoursIndex::empty(evening.id)
                .with_window(DayCategory::Monday, hm("17:00"), hm("22:00")),
        ),
        (closed.clone(), OperatingHoursIndex::empty(closed.id)),
    ];

    let filter = DoctorAvailabilityFilter::default();

    let at_ten = filter.open_at(roster.clone(), local("2024-01-01 10:00").naive_local());
    assert_eq!(at_ten, vec![morning.clone()]);

    let at_half_five = filter.open_at(roster.clone(), local("2024-01-01 17:30").naive_local());
    assert_eq!(at_half_five, vec![morning, evening]);

    let at_lunch = filter.open_at(roster, local("2024-01-01 12:30").naive_local());
    assert!(at_lunch.is_empty());
}

#[test]
fn test_doctor_listed_twice_appears_once() {
    let repeated = doctor("Repeated");
    let roster = vec![
        (repeated.clone(), monday_clinic(repeated.id)),
        (repeated.clone(), monday_clinic(repeated.id)),
    ];

    let result = DoctorAvailabilityFilter::default()
        .open_at(roster, local("2024-01-01 10:00").naive_local());
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, repeated.id);
}

#[test]
fn test_lunch_row_overlapping_weekday_hours_does_not_duplicate() {
    let doctor_id = Uuid::new_v4();
    let overlapping = Doctor {
        id: doctor_id,
        name: "Overlap".to_string(),
        hospital_name: "General".to_string(),
    };
    let index = OperatingHoursIndex::empty(doctor_id)
        .with_window(DayCategory::Monday, hm("09:00"), hm("18:00"))
        .with_window(DayCategory::LunchTime, hm("20:00"), hm("21:00"))
        .with_window(DayCategory::Holiday, hm("09:00"), hm("18:00"));

    let result = DoctorAvailabilityFilter::default()
        .open_at(vec![(overlapping, index)], local("2024-01-01 10:00").naive_local());
    assert_eq!(result.len(), 1);
}

#[test]
fn test_empty_roster() {
    let result = DoctorAvailabilityFilter::default()
        .open_at(Vec::new(), local("2024-01-01 10:00").naive_local());
    assert!(result.is_empty());
}
