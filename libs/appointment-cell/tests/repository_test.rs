use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::*;
use shared_utils::test_utils::TestConfig;

fn repository_for(server: &MockServer) -> SupabaseAppointmentRequestRepository {
    SupabaseAppointmentRequestRepository::new(&TestConfig::with_supabase_url(server.uri()).to_app_config())
}

fn sample(accepted: bool) -> AppointmentRequest {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
    AppointmentRequest {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        doctor_id: Uuid::new_v4(),
        requested_at: created_at + Duration::hours(1),
        expires_at: created_at + Duration::minutes(20),
        accepted,
        created_at,
    }
}

#[tokio::test]
async fn test_insert_asks_for_representation() {
    let server = MockServer::start().await;
    let request = sample(false);

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointment_requests"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([request])))
        .expect(1)
        .mount(&server)
        .await;

    let stored = repository_for(&server).insert(request.clone()).await.unwrap();
    assert_eq!(stored, request);
}

#[tokio::test]
async fn test_insert_with_empty_response_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = repository_for(&server).insert(sample(false)).await;
    assert_matches!(result, Err(AppointmentError::Database(_)));
}

#[tokio::test]
async fn test_mark_accepted_is_guarded_by_accepted_flag() {
    let server = MockServer::start().await;
    let request = sample(false);
    let mut accepted = request.clone();
    accepted.accepted = true;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointment_requests"))
        .and(query_param("id", format!("eq.{}", request.id)))
        .and(query_param("accepted", "eq.false"))
        .and(body_json(json!({ "accepted": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([accepted])))
        .expect(1)
        .mount(&server)
        .await;

    let result = repository_for(&server).mark_accepted(request.id).await.unwrap();
    assert_eq!(result.map(|r| r.accepted), Some(true));
}

#[tokio::test]
async fn test_mark_accepted_losing_the_race_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = repository_for(&server).mark_accepted(Uuid::new_v4()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_pending_filters_unaccepted_by_doctor() {
    let server = MockServer::start().await;
    let request = sample(false);

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointment_requests"))
        .and(query_param("accepted", "eq.false"))
        .and(query_param("doctor_id", format!("eq.{}", request.doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([request])))
        .expect(1)
        .mount(&server)
        .await;

    let pending = repository_for(&server)
        .list_pending(Some(request.doctor_id))
        .await
        .unwrap();
    assert_eq!(pending, vec![request]);
}

#[tokio::test]
async fn test_get_patient() {
    let server = MockServer::start().await;
    let patient_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", format!("eq.{}", patient_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": patient_id, "name": "Lee" }
        ])))
        .mount(&server)
        .await;

    let patient = repository_for(&server).get_patient(patient_id).await.unwrap();
    assert_eq!(patient.map(|p| p.name), Some("Lee".to_string()));
}

#[tokio::test]
async fn test_list_patients_batches_ids_into_in_filters() {
    let server = MockServer::start().await;
    let patient_ids: Vec<Uuid> = (0..PATIENT_ID_CHUNK + 1).map(|_| Uuid::new_v4()).collect();
    let last = *patient_ids.last().unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", format!("in.({})", last)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": last, "name": "Park" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let patients = repository_for(&server).list_patients(&patient_ids).await.unwrap();
    assert_eq!(patients, vec![Patient { id: last, name: "Park".to_string() }]);
}

#[tokio::test]
async fn test_list_patients_for_nobody_skips_the_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let patients = repository_for(&server).list_patients(&[]).await.unwrap();
    assert!(patients.is_empty());
}

#[tokio::test]
async fn test_storage_failure_maps_to_database_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let result = repository_for(&server).get(Uuid::new_v4()).await;
    assert_matches!(result, Err(AppointmentError::Database(msg)) if msg.contains("unavailable"));
}
