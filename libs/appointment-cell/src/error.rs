use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use doctor_cell::DoctorError;
use shared_models::error::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppointmentError {
    #[error("Appointment request not found: {0}")]
    NotFound(Uuid),

    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(Uuid),

    #[error("Requested time {requested_at} is outside the doctor's operating hours")]
    InvalidSlot { requested_at: DateTime<Utc> },

    #[error("Appointment request {request_id} expired at {expired_at}")]
    Expired { request_id: Uuid, expired_at: DateTime<Utc> },

    #[error("Appointment request {0} has already been accepted")]
    AlreadyAccepted(Uuid),

    #[error("Doctor {0} has no operating hours to accept requests in")]
    NoAvailability(Uuid),

    #[error("Invalid operating hours: {0}")]
    InvalidHours(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DoctorError> for AppointmentError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(id) => AppointmentError::DoctorNotFound(id),
            DoctorError::NoAvailability(id) => AppointmentError::NoAvailability(id),
            DoctorError::DuplicateHours { .. } => AppointmentError::InvalidHours(err.to_string()),
            DoctorError::Database(msg) => AppointmentError::Database(msg),
        }
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        let message = err.to_string();
        match err {
            AppointmentError::NotFound(_)
            | AppointmentError::PatientNotFound(_)
            | AppointmentError::DoctorNotFound(_) => AppError::NotFound(message),
            AppointmentError::InvalidSlot { .. } => AppError::invalid_field("requested_at", message),
            AppointmentError::Expired { .. } => AppError::invalid_field("id", message),
            AppointmentError::AlreadyAccepted(_) => AppError::Conflict(message),
            AppointmentError::NoAvailability(_) => AppError::Unprocessable(message),
            AppointmentError::InvalidHours(_) => AppError::Internal(message),
            AppointmentError::Database(_) => AppError::Database(message),
        }
    }
}
