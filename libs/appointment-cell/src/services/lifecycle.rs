// libs/appointment-cell/src/services/lifecycle.rs
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::DoctorService;
use shared_utils::clock::Clock;

use crate::error::AppointmentError;
use crate::models::{AppointmentRequest, AppointmentRequestView, CreateAppointmentRequest};
use crate::repository::AppointmentRequestRepository;

/// Pending -> Accepted, with Expired derived from the clock rather than stored.
pub struct AppointmentRequestService {
    doctors: Arc<DoctorService>,
    repository: Arc<dyn AppointmentRequestRepository>,
    clock: Arc<dyn Clock>,
}

impl AppointmentRequestService {
    pub fn new(
        doctors: Arc<DoctorService>,
        repository: Arc<dyn AppointmentRequestRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            doctors,
            repository,
            clock,
        }
    }

    /// Validate the requested slot against the doctor's hours, then store a
    /// pending request whose deadline depends on where *now* falls.
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<AppointmentRequest, AppointmentError> {
        debug!(
            "Creating appointment request for doctor {} at {}",
            request.doctor_id, request.requested_at
        );

        let index = self.doctors.load_hours_index(request.doctor_id).await?;

        self.repository
            .get_patient(request.patient_id)
            .await?
            .ok_or(AppointmentError::PatientNotFound(request.patient_id))?;

        if !self.doctors.is_open(&index, request.requested_at) {
            warn!(
                "Rejected request for doctor {}: {} is outside operating hours",
                request.doctor_id, request.requested_at
            );
            return Err(AppointmentError::InvalidSlot {
                requested_at: request.requested_at,
            });
        }

        let now = self.clock.now();
        let expires_at = self.doctors.deadline(&index, now)?;

        let created = self
            .repository
            .insert(AppointmentRequest {
                id: Uuid::new_v4(),
                patient_id: request.patient_id,
                doctor_id: request.doctor_id,
                requested_at: request.requested_at,
                expires_at,
                accepted: false,
                created_at: now,
            })
            .await?;

        info!("Appointment request {} pending until {}", created.id, created.expires_at);
        Ok(created)
    }

    /// Accept a pending request. Expired requests are left untouched, and a
    /// request can only be accepted once.
    pub async fn accept(&self, request_id: Uuid) -> Result<AppointmentRequest, AppointmentError> {
        debug!("Accepting appointment request {}", request_id);

        let request = self
            .repository
            .get(request_id)
            .await?
            .ok_or(AppointmentError::NotFound(request_id))?;

        if request.accepted {
            warn!("Appointment request {} already accepted", request_id);
            return Err(AppointmentError::AlreadyAccepted(request_id));
        }

        if request.is_expired_at(self.clock.now()) {
            warn!("Appointment request {} expired at {}", request_id, request.expires_at);
            return Err(AppointmentError::Expired {
                request_id,
                expired_at: request.expires_at,
            });
        }

        // Losing the compare-and-set means someone else accepted it meanwhile.
        let accepted = self
            .repository
            .mark_accepted(request_id)
            .await?
            .ok_or(AppointmentError::AlreadyAccepted(request_id))?;

        info!("Appointment request {} accepted", request_id);
        Ok(accepted)
    }

    pub async fn get(&self, request_id: Uuid) -> Result<AppointmentRequestView, AppointmentError> {
        let request = self
            .repository
            .get(request_id)
            .await?
            .ok_or(AppointmentError::NotFound(request_id))?;

        self.view(request).await
    }

    /// Unaccepted requests, whether or not their deadline has passed.
    pub async fn list_pending(
        &self,
        doctor_id: Option<Uuid>,
    ) -> Result<Vec<AppointmentRequestView>, AppointmentError> {
        let now = self.clock.now();
        let pending = self.repository.list_pending(doctor_id).await?;

        let mut patient_ids: Vec<Uuid> = pending.iter().map(|request| request.patient_id).collect();
        patient_ids.sort();
        patient_ids.dedup();

        let names: HashMap<Uuid, String> = self
            .repository
            .list_patients(&patient_ids)
            .await?
            .into_iter()
            .map(|patient| (patient.id, patient.name))
            .collect();

        Ok(pending
            .into_iter()
            .map(|request| {
                let patient_name = names.get(&request.patient_id).cloned();
                AppointmentRequestView::at(request, patient_name, now)
            })
            .collect())
    }

    pub async fn view(
        &self,
        request: AppointmentRequest,
    ) -> Result<AppointmentRequestView, AppointmentError> {
        let patient_name = self
            .repository
            .get_patient(request.patient_id)
            .await?
            .map(|patient| patient.name);

        Ok(AppointmentRequestView::at(request, patient_name, self.clock.now()))
    }
}
