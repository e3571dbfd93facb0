use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::error::AppointmentError;
use crate::models::{AppointmentRequest, Patient};

const TABLE: &str = "/rest/v1/appointment_requests";
/// Ids per `id=in.(..)` request when resolving patient names.
pub const PATIENT_ID_CHUNK: usize = 50;

#[async_trait]
pub trait AppointmentRequestRepository: Send + Sync {
    async fn get_patient(&self, patient_id: Uuid) -> Result<Option<Patient>, AppointmentError>;

    /// Patients among `patient_ids` that exist, in no particular order.
    async fn list_patients(&self, patient_ids: &[Uuid]) -> Result<Vec<Patient>, AppointmentError>;

    async fn insert(&self, request: AppointmentRequest) -> Result<AppointmentRequest, AppointmentError>;

    async fn get(&self, request_id: Uuid) -> Result<Option<AppointmentRequest>, AppointmentError>;

    /// Requests not yet accepted, oldest first, including ones past their deadline.
    async fn list_pending(&self, doctor_id: Option<Uuid>) -> Result<Vec<AppointmentRequest>, AppointmentError>;

    /// Flip `accepted` from false to true in one step. `None` when the row
    /// is missing or was already accepted.
    async fn mark_accepted(&self, request_id: Uuid) -> Result<Option<AppointmentRequest>, AppointmentError>;
}

// ==============================================================================
// SUPABASE
// ==============================================================================

pub struct SupabaseAppointmentRequestRepository {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentRequestRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Vec<Value>, AppointmentError> {
        let headers = if method == Method::GET {
            None
        } else {
            Some(SupabaseClient::return_representation())
        };

        self.supabase
            .request_with_headers::<Vec<Value>>(method, path, body, headers)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }

    fn decode<T>(rows: Vec<Value>) -> Result<Vec<T>, AppointmentError>
    where
        T: serde::de::DeserializeOwned,
    {
        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| AppointmentError::Database(e.to_string()))
    }
}

#[async_trait]
impl AppointmentRequestRepository for SupabaseAppointmentRequestRepository {
    async fn get_patient(&self, patient_id: Uuid) -> Result<Option<Patient>, AppointmentError> {
        let path = format!("/rest/v1/patients?id=eq.{}&select=id,name", patient_id);
        let rows = self.send(Method::GET, &path, None).await?;
        Ok(Self::decode::<Patient>(rows)?.into_iter().next())
    }

    async fn list_patients(&self, patient_ids: &[Uuid]) -> Result<Vec<Patient>, AppointmentError> {
        let mut patients = Vec::new();

        for chunk in patient_ids.chunks(PATIENT_ID_CHUNK) {
            let ids = chunk
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let path = format!("/rest/v1/patients?id=in.({})&select=id,name", ids);
            let rows = self.send(Method::GET, &path, None).await?;
            patients.extend(Self::decode::<Patient>(rows)?);
        }

        Ok(patients)
    }

    async fn insert(&self, request: AppointmentRequest) -> Result<AppointmentRequest, AppointmentError> {
        debug!("Inserting appointment request {}", request.id);
        let rows = self.send(Method::POST, TABLE, Some(json!(request))).await?;

        Self::decode::<AppointmentRequest>(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::Database("Failed to create appointment request".to_string()))
    }

    async fn get(&self, request_id: Uuid) -> Result<Option<AppointmentRequest>, AppointmentError> {
        let path = format!("{}?id=eq.{}", TABLE, request_id);
        let rows = self.send(Method::GET, &path, None).await?;
        Ok(Self::decode::<AppointmentRequest>(rows)?.into_iter().next())
    }

    async fn list_pending(&self, doctor_id: Option<Uuid>) -> Result<Vec<AppointmentRequest>, AppointmentError> {
        let mut path = format!("{}?accepted=eq.false&order=created_at.asc", TABLE);
        if let Some(doctor_id) = doctor_id {
            path.push_str(&format!("&doctor_id=eq.{}", doctor_id));
        }

        let rows = self.send(Method::GET, &path, None).await?;
        Self::decode(rows)
    }

    async fn mark_accepted(&self, request_id: Uuid) -> Result<Option<AppointmentRequest>, AppointmentError> {
        // The accepted=eq.false guard makes PostgREST update zero rows if
        // another caller got there first.
        let path = format!("{}?id=eq.{}&accepted=eq.false", TABLE, request_id);
        let rows = self
            .send(Method::PATCH, &path, Some(json!({ "accepted": true })))
            .await?;

        Ok(Self::decode::<AppointmentRequest>(rows)?.into_iter().next())
    }
}

// ==============================================================================
// IN-MEMORY
// ==============================================================================

#[derive(Default)]
pub struct InMemoryAppointmentRequestRepository {
    patients: RwLock<Vec<Patient>>,
    requests: RwLock<HashMap<Uuid, AppointmentRequest>>,
}

impl InMemoryAppointmentRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_patient(&self, patient: Patient) {
        self.patients.write().await.push(patient);
    }
}

#[async_trait]
impl AppointmentRequestRepository for InMemoryAppointmentRequestRepository {
    async fn get_patient(&self, patient_id: Uuid) -> Result<Option<Patient>, AppointmentError> {
        Ok(self
            .patients
            .read()
            .await
            .iter()
            .find(|patient| patient.id == patient_id)
            .cloned())
    }

    async fn list_patients(&self, patient_ids: &[Uuid]) -> Result<Vec<Patient>, AppointmentError> {
        Ok(self
            .patients
            .read()
            .await
            .iter()
            .filter(|patient| patient_ids.contains(&patient.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, request: AppointmentRequest) -> Result<AppointmentRequest, AppointmentError> {
        self.requests.write().await.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get(&self, request_id: Uuid) -> Result<Option<AppointmentRequest>, AppointmentError> {
        Ok(self.requests.read().await.get(&request_id).cloned())
    }

    async fn list_pending(&self, doctor_id: Option<Uuid>) -> Result<Vec<AppointmentRequest>, AppointmentError> {
        let mut pending: Vec<AppointmentRequest> = self
            .requests
            .read()
            .await
            .values()
            .filter(|request| !request.accepted)
            .filter(|request| doctor_id.map_or(true, |id| request.doctor_id == id))
            .cloned()
            .collect();

        pending.sort_by_key(|request| (request.created_at, request.id));
        Ok(pending)
    }

    async fn mark_accepted(&self, request_id: Uuid) -> Result<Option<AppointmentRequest>, AppointmentError> {
        let mut requests = self.requests.write().await;

        match requests.get_mut(&request_id) {
            Some(request) if !request.accepted => {
                request.accepted = true;
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }
}
