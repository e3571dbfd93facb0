use async_trait::async_trait;
use reqwest::Method;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::DoctorError;
use crate::models::{Doctor, OpenHours};

const DOCTOR_COLUMNS: &str = "id,name,hospital_name";
const HOURS_COLUMNS: &str = "doctor_id,day_type,opened_time,closed_time";
/// Ids per `doctor_id=in.(..)` request, keeping the query string bounded.
pub const HOURS_ID_CHUNK: usize = 50;

/// Read access to doctors and their stored hour rows.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>, DoctorError>;

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError>;

    async fn list_open_hours(&self, doctor_id: Uuid) -> Result<Vec<OpenHours>, DoctorError>;

    /// Rows for several doctors at once, in no particular order.
    async fn list_open_hours_for(&self, doctor_ids: &[Uuid]) -> Result<Vec<OpenHours>, DoctorError>;
}

// ==============================================================================
// SUPABASE
// ==============================================================================

pub struct SupabaseDoctorRepository {
    supabase: SupabaseClient,
}

impl SupabaseDoctorRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn fetch<T>(&self, path: &str) -> Result<Vec<T>, DoctorError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.supabase
            .request::<Vec<T>>(Method::GET, path, None)
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))
    }
}

#[async_trait]
impl DoctorRepository for SupabaseDoctorRepository {
    async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>, DoctorError> {
        debug!("Fetching doctor {}", doctor_id);
        let path = format!("/rest/v1/doctors?id=eq.{}&select={}", doctor_id, DOCTOR_COLUMNS);
        Ok(self.fetch::<Doctor>(&path).await?.into_iter().next())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        let path = format!("/rest/v1/doctors?select={}&order=name.asc", DOCTOR_COLUMNS);
        self.fetch(&path).await
    }

    async fn list_open_hours(&self, doctor_id: Uuid) -> Result<Vec<OpenHours>, DoctorError> {
        debug!("Fetching open hours for doctor {}", doctor_id);
        let path = format!(
            "/rest/v1/open_hours?doctor_id=eq.{}&select={}&order=day_type.asc",
            doctor_id, HOURS_COLUMNS
        );
        self.fetch(&path).await
    }

    async fn list_open_hours_for(&self, doctor_ids: &[Uuid]) -> Result<Vec<OpenHours>, DoctorError> {
        let mut rows = Vec::new();

        for chunk in doctor_ids.chunks(HOURS_ID_CHUNK) {
            let ids = chunk
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let path = format!(
                "/rest/v1/open_hours?doctor_id=in.({})&select={}&order=day_type.asc",
                ids, HOURS_COLUMNS
            );
            rows.extend(self.fetch::<OpenHours>(&path).await?);
        }

        debug!("Fetched {} open hour rows for {} doctors", rows.len(), doctor_ids.len());
        Ok(rows)
    }
}

// ==============================================================================
// IN-MEMORY
// ==============================================================================

/// Process-local store used by tests and when Supabase is not configured.
#[derive(Default)]
pub struct InMemoryDoctorRepository {
    doctors: RwLock<Vec<Doctor>>,
    hours: RwLock<Vec<OpenHours>>,
}

impl InMemoryDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_doctor(&self, doctor: Doctor) {
        self.doctors.write().await.push(doctor);
    }

    pub async fn add_hours(&self, rows: impl IntoIterator<Item = OpenHours>) {
        self.hours.write().await.extend(rows);
    }
}

#[async_trait]
impl DoctorRepository for InMemoryDoctorRepository {
    async fn get_doctor(&self, doctor_id: Uuid) -> Result<Option<Doctor>, DoctorError> {
        Ok(self
            .doctors
            .read()
            .await
            .iter()
            .find(|doctor| doctor.id == doctor_id)
            .cloned())
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        Ok(self.doctors.read().await.clone())
    }

    async fn list_open_hours(&self, doctor_id: Uuid) -> Result<Vec<OpenHours>, DoctorError> {
        self.list_open_hours_for(&[doctor_id]).await
    }

    async fn list_open_hours_for(&self, doctor_ids: &[Uuid]) -> Result<Vec<OpenHours>, DoctorError> {
        Ok(self
            .hours
            .read()
            .await
            .iter()
            .filter(|row| doctor_ids.contains(&row.doctor_id))
            .cloned()
            .collect())
    }
}
