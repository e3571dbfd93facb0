use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{AppointmentRequestView, CreateAppointmentRequest, PendingRequestQuery};
use crate::services::lifecycle::AppointmentRequestService;

#[axum::debug_handler]
pub async fn list_pending_requests(
    State(service): State<Arc<AppointmentRequestService>>,
    Query(query): Query<PendingRequestQuery>,
) -> Result<Json<Value>, AppError> {
    let requests = service.list_pending(query.doctor).await?;

    Ok(Json(json!({
        "appointment_requests": requests,
        "total": requests.len()
    })))
}

#[axum::debug_handler]
pub async fn create_request(
    State(service): State<Arc<AppointmentRequestService>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentRequestView>), AppError> {
    let created = service.create(request).await?;

    Ok((StatusCode::CREATED, Json(service.view(created).await?)))
}

#[axum::debug_handler]
pub async fn get_request(
    State(service): State<Arc<AppointmentRequestService>>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<AppointmentRequestView>, AppError> {
    Ok(Json(service.get(request_id).await?))
}

#[axum::debug_handler]
pub async fn accept_request(
    State(service): State<Arc<AppointmentRequestService>>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<AppointmentRequestView>, AppError> {
    let accepted = service.accept(request_id).await?;

    Ok(Json(service.view(accepted).await?))
}
