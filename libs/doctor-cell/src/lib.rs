pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use error::DoctorError;
pub use models::*;
pub use repository::{
    DoctorRepository, InMemoryDoctorRepository, SupabaseDoctorRepository, HOURS_ID_CHUNK,
};
pub use services::*;
