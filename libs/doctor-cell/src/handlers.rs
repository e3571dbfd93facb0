use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::DoctorListQuery;
use crate::services::doctor::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(service): State<Arc<DoctorService>>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<Value>, AppError> {
    let doctors = service.list_available_doctors(query.request_date).await?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}
