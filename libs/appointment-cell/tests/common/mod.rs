#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use appointment_cell::*;
use doctor_cell::{
    DayCategory, Doctor, DoctorService, ExpiryPolicy, InMemoryDoctorRepository, OpenHours,
};
use shared_utils::clock::FixedClock;
use shared_utils::test_utils::{hm, local_utc, test_offset};

/// A clinic with one doctor (Monday 09:00-18:00, lunch 12:00-13:00) and one patient.
pub struct Clinic {
    pub doctor: Doctor,
    pub patient: Patient,
    pub doctors: Arc<InMemoryDoctorRepository>,
    pub requests: Arc<InMemoryAppointmentRequestRepository>,
    pub clock: Arc<FixedClock>,
    pub service: Arc<AppointmentRequestService>,
}

impl Clinic {
    pub async fn open_at(now: &str) -> Self {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            name: "Dr. Kim".to_string(),
            hospital_name: "Seoul General".to_string(),
        };
        let patient = Patient {
            id: Uuid::new_v4(),
            name: "Lee".to_string(),
        };

        let doctors = Arc::new(InMemoryDoctorRepository::new());
        doctors.add_doctor(doctor.clone()).await;
        doctors
            .add_hours(vec![
                OpenHours::new(doctor.id, DayCategory::Monday, hm("09:00"), hm("18:00")),
                OpenHours::new(doctor.id, DayCategory::LunchTime, hm("12:00"), hm("13:00")),
            ])
            .await;

        let requests = Arc::new(InMemoryAppointmentRequestRepository::new());
        requests.add_patient(patient.clone()).await;

        let clock = Arc::new(FixedClock::new(local_utc(now)));
        let doctor_service = Arc::new(DoctorService::with_policy(
            doctors.clone(),
            test_offset(),
            ExpiryPolicy::default(),
        ));
        let service = Arc::new(AppointmentRequestService::new(
            doctor_service,
            requests.clone(),
            clock.clone(),
        ));

        Self {
            doctor,
            patient,
            doctors,
            requests,
            clock,
            service,
        }
    }

    pub fn request_for(&self, requested_at: &str) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            doctor_id: self.doctor.id,
            patient_id: self.patient.id,
            requested_at: local_utc(requested_at),
        }
    }

    pub fn now_is(&self, now: &str) {
        self.clock.set(local_utc(now));
    }

    pub fn now(&self) -> DateTime<Utc> {
        shared_utils::clock::Clock::now(self.clock.as_ref())
    }
}
