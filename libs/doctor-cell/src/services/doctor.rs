use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::DoctorError;
use crate::models::{Doctor, OpenHours};
use crate::repository::DoctorRepository;
use crate::services::availability::AvailabilityChecker;
use crate::services::expiry::{ExpiryCalculator, ExpiryPolicy};
use crate::services::filter::DoctorAvailabilityFilter;
use crate::services::hours::OperatingHoursIndex;

/// Entry point for everything that needs a doctor's hours. Converts UTC
/// instants onto the clinic's wall clock before asking the engine.
pub struct DoctorService {
    repository: Arc<dyn DoctorRepository>,
    clinic_offset: FixedOffset,
    checker: AvailabilityChecker,
    filter: DoctorAvailabilityFilter,
    expiry: ExpiryCalculator,
}

impl DoctorService {
    pub fn new(repository: Arc<dyn DoctorRepository>, config: &AppConfig) -> Self {
        Self::with_policy(repository, config.clinic_offset(), ExpiryPolicy::from_config(config))
    }

    pub fn with_policy(
        repository: Arc<dyn DoctorRepository>,
        clinic_offset: FixedOffset,
        policy: ExpiryPolicy,
    ) -> Self {
        let checker = AvailabilityChecker::new();
        Self {
            repository,
            clinic_offset,
            checker,
            filter: DoctorAvailabilityFilter::new(checker),
            expiry: ExpiryCalculator::new(policy),
        }
    }

    pub fn to_local(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.clinic_offset)
    }

    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, DoctorError> {
        self.repository
            .get_doctor(doctor_id)
            .await?
            .ok_or(DoctorError::NotFound(doctor_id))
    }

    /// Fails only when the doctor is missing; no rows yields an empty index.
    pub async fn load_hours_index(&self, doctor_id: Uuid) -> Result<OperatingHoursIndex, DoctorError> {
        debug!("Loading hours index for doctor {}", doctor_id);

        self.get_doctor(doctor_id).await?;
        let rows = self.repository.list_open_hours(doctor_id).await?;

        OperatingHoursIndex::build(doctor_id, rows)
    }

    pub fn is_open(&self, index: &OperatingHoursIndex, at: DateTime<Utc>) -> bool {
        self.checker.is_open(index, self.to_local(at).naive_local())
    }

    pub fn deadline(
        &self,
        index: &OperatingHoursIndex,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, DoctorError> {
        self.expiry
            .compute_deadline(index, self.to_local(now))
            .map(|deadline| deadline.with_timezone(&Utc))
    }

    /// All doctors, or only those open at `at` when given.
    pub async fn list_available_doctors(
        &self,
        at: Option<DateTime<Utc>>,
    ) -> Result<Vec<Doctor>, DoctorError> {
        let doctors = self.repository.list_doctors().await?;

        let at = match at {
            Some(at) => at,
            None => return Ok(doctors),
        };

        debug!("Filtering {} doctors open at {}", doctors.len(), at);

        let ids: Vec<Uuid> = doctors.iter().map(|doctor| doctor.id).collect();
        let mut rows_by_doctor: HashMap<Uuid, Vec<OpenHours>> = HashMap::new();
        for row in self.repository.list_open_hours_for(&ids).await? {
            rows_by_doctor.entry(row.doctor_id).or_default().push(row);
        }

        let roster = doctors.into_iter().filter_map(|doctor| {
            let rows = rows_by_doctor.get(&doctor.id).cloned().unwrap_or_default();
            match OperatingHoursIndex::build(doctor.id, rows) {
                Ok(index) => Some((doctor, index)),
                Err(e) => {
                    warn!("Skipping doctor {} in availability listing: {}", doctor.id, e);
                    None
                }
            }
        });

        Ok(self.filter.open_at(roster, self.to_local(at).naive_local()))
    }
}
