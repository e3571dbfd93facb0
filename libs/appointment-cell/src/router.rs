use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::lifecycle::AppointmentRequestService;

pub fn appointment_request_routes(service: Arc<AppointmentRequestService>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_pending_requests).post(handlers::create_request),
        )
        .route(
            "/{request_id}",
            get(handlers::get_request)
                .put(handlers::accept_request)
                .patch(handlers::accept_request),
        )
        .with_state(service)
}
