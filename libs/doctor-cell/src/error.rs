use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::DayCategory;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(Uuid),

    #[error("Doctor {doctor_id} has more than one {day} row in open hours")]
    DuplicateHours { doctor_id: Uuid, day: DayCategory },

    #[error("Doctor {0} has no operating hours on any weekday")]
    NoAvailability(Uuid),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::DuplicateHours { .. } => AppError::Internal(err.to_string()),
            DoctorError::NoAvailability(_) => AppError::Unprocessable(err.to_string()),
            DoctorError::Database(msg) => AppError::Database(msg),
        }
    }
}
