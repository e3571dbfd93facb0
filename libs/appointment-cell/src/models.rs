// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// APPOINTMENT REQUESTS
// ==============================================================================

/// A patient's request to be seen at `requested_at`. The doctor has until
/// `expires_at` to accept it; that deadline is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub requested_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl AppointmentRequest {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Expiry is never stored; it is read off the clock every time.
    pub fn status_at(&self, now: DateTime<Utc>) -> AppointmentRequestStatus {
        if self.accepted {
            AppointmentRequestStatus::Accepted
        } else if self.is_expired_at(now) {
            AppointmentRequestStatus::Expired
        } else {
            AppointmentRequestStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentRequestStatus {
    Pending,
    Accepted,
    Expired,
}

impl fmt::Display for AppointmentRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentRequestStatus::Pending => write!(f, "pending"),
            AppointmentRequestStatus::Accepted => write!(f, "accepted"),
            AppointmentRequestStatus::Expired => write!(f, "expired"),
        }
    }
}

/// A request together with its status at the time it was read, plus the
/// patient's name for the doctor's pending list.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentRequestView {
    #[serde(flatten)]
    pub request: AppointmentRequest,
    pub patient_name: Option<String>,
    pub status: AppointmentRequestStatus,
}

impl AppointmentRequestView {
    pub fn at(request: AppointmentRequest, patient_name: Option<String>, now: DateTime<Utc>) -> Self {
        let status = request.status_at(now);
        Self {
            request,
            patient_name,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
}

// ==============================================================================
// REQUEST DTOs
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingRequestQuery {
    pub doctor: Option<Uuid>,
}
