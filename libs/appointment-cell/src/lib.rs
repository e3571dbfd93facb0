pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use error::AppointmentError;
pub use models::*;
pub use repository::{
    AppointmentRequestRepository, InMemoryAppointmentRequestRepository,
    SupabaseAppointmentRequestRepository, PATIENT_ID_CHUNK,
};
pub use services::*;
