use std::fmt;
use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::warn;

use appointment_cell::{
    router::appointment_request_routes, AppointmentRequestRepository, AppointmentRequestService,
    InMemoryAppointmentRequestRepository, SupabaseAppointmentRequestRepository,
};
use doctor_cell::{
    router::doctor_routes, DoctorRepository, DoctorService, InMemoryDoctorRepository,
    SupabaseDoctorRepository,
};
use shared_config::AppConfig;
use shared_utils::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Supabase,
    /// Empty process-local stores with no way to seed them over HTTP.
    InMemory,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Supabase => write!(f, "Supabase"),
            StorageMode::InMemory => write!(f, "in-memory"),
        }
    }
}

pub struct AppServices {
    pub doctors: Arc<DoctorService>,
    pub appointment_requests: Arc<AppointmentRequestService>,
    pub storage: StorageMode,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        if config.is_configured() {
            let mut services = Self::assemble(
                config,
                Arc::new(SupabaseDoctorRepository::new(config)),
                Arc::new(SupabaseAppointmentRequestRepository::new(config)),
                Arc::new(SystemClock),
            );
            services.storage = StorageMode::Supabase;
            return services;
        }

        warn!(
            "Running on empty in-memory storage: no doctors or patients exist, \
             so /doctors lists nobody and every create is rejected. Set SUPABASE_URL \
             and SUPABASE_ANON_PUBLIC_KEY to serve real data"
        );
        Self::assemble(
            config,
            Arc::new(InMemoryDoctorRepository::new()),
            Arc::new(InMemoryAppointmentRequestRepository::new()),
            Arc::new(SystemClock),
        )
    }

    pub fn assemble(
        config: &AppConfig,
        doctor_repository: Arc<dyn DoctorRepository>,
        request_repository: Arc<dyn AppointmentRequestRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let doctors = Arc::new(DoctorService::new(doctor_repository, config));
        let appointment_requests = Arc::new(AppointmentRequestService::new(
            doctors.clone(),
            request_repository,
            clock,
        ));

        Self {
            doctors,
            appointment_requests,
            storage: StorageMode::InMemory,
        }
    }
}

pub fn create_router(services: &AppServices) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic API is running!" }))
        .nest("/doctors", doctor_routes(services.doctors.clone()))
        .nest(
            "/appointment-requests",
            appointment_request_routes(services.appointment_requests.clone()),
        )
}
