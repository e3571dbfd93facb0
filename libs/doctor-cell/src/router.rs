use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::doctor::DoctorService;

pub fn doctor_routes(service: Arc<DoctorService>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors))
        .with_state(service)
}
