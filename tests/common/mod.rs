// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test harness: a mock Crescere backend served over real HTTP.
//!
//! The mock speaks the same contract as the production API (simplejwt-style
//! login/refresh, bearer-guarded resources) and records every request it
//! sees so tests can assert on headers, replays and refresh traffic.

// Each integration test binary compiles its own copy of this module and
// uses a different slice of it.
#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use crescere_client::storage::MemoryStorage;
use crescere_client::{Config, CrescereApi, SessionStore};
use serde_json::{json, Value};
use std::collections::{HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Fixed body served for report downloads.
pub const REPORT_BYTES: &[u8] = b"%PDF-1.4 fake report";

/// One request as observed by the mock backend.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub auth: Option<String>,
}

/// One multipart upload as observed by the mock backend.
#[derive(Debug, Clone)]
pub struct SeenUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub data: Option<Value>,
}

/// Mutable backend state shared with the tests.
#[derive(Default)]
pub struct MockState {
    /// Access tokens currently accepted by guarded routes.
    pub valid_access: Mutex<HashSet<String>>,
    /// Refresh tokens currently accepted by the refresh endpoint.
    pub valid_refresh: Mutex<HashSet<String>>,
    /// Access tokens to mint on refresh, in order. Falls back to "A2".
    pub mint_queue: Mutex<VecDeque<String>>,
    /// When set, refresh responses rotate to this refresh token.
    pub rotated_refresh: Mutex<Option<String>>,
    /// Artificial latency in the refresh handler, for contention tests.
    pub refresh_delay_ms: AtomicU64,
    /// When set, tokens minted by refresh are NOT marked valid, so the
    /// replayed request 401s again.
    pub reject_minted: AtomicBool,
    pub refresh_calls: AtomicUsize,
    pub requests: Mutex<Vec<SeenRequest>>,
    pub uploads: Mutex<Vec<SeenUpload>>,
}

impl MockState {
    /// Server-side token expiry: guarded routes start rejecting it.
    pub fn expire_access(&self, token: &str) {
        self.valid_access.lock().unwrap().remove(token);
    }

    /// Server-side refresh revocation: the refresh endpoint rejects it.
    pub fn revoke_refresh(&self, token: &str) {
        self.valid_refresh.lock().unwrap().remove(token);
    }

    /// Requests observed for an exact path (including the /api prefix).
    pub fn calls_to(&self, path: &str) -> Vec<SeenRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

/// Everything a test needs: the running mock, the assembled API surface
/// and direct access to the session storage.
pub struct TestContext {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    pub api: CrescereApi,
    pub storage: Arc<MemoryStorage>,
}

impl TestContext {
    /// Log in with the fixture credentials (token pair A1/R1).
    pub async fn login(&self) {
        self.api
            .auth
            .login("a@x.com", "secret123")
            .await
            .expect("fixture login should succeed");
    }
}

/// Opt-in client/backend logs while debugging a test run:
/// `RUST_LOG=crescere_client=debug cargo test`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Boot the mock backend on an ephemeral port and assemble a client
/// against it, with in-memory session storage.
pub async fn setup() -> TestContext {
    init_tracing();
    let state = Arc::new(MockState::default());
    let app = mock_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::with_api_url(format!("http://{}/api", addr));
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::new(storage.clone());
    session.initialize().await.expect("session init");
    let api = CrescereApi::new(&config, session);

    TestContext {
        addr,
        state,
        api,
        storage,
    }
}

/// Build the mock API router.
pub fn mock_router(state: Arc<MockState>) -> Router {
    let api = Router::new()
        // auth
        .route("/auth/login/", post(login))
        .route("/auth/token/refresh/", post(refresh))
        .route("/auth/register/patient/", post(register))
        .route("/auth/register/doctor/", post(register))
        .route("/auth/register/provider/", post(register))
        .route("/auth/profile/", get(profile).patch(patch_profile))
        .route("/auth/profile/change-password/", post(change_password))
        .route("/auth/doctors/", get(doctors))
        .route("/auth/organization/doctors/", get(org_doctors).post(org_add_doctor).delete(org_remove_doctor))
        .route("/auth/patients/me/qr-data/", get(qr_data))
        .route("/auth/patients/me/qr-code/", get(qr_image))
        .route("/auth/patients/qr-scan/", post(qr_scan))
        // wallet
        .route("/wallet/", get(wallet))
        .route("/wallet/topup/", post(wallet_topup))
        .route("/wallet/transactions/", get(wallet_transactions))
        .route("/wallet/appointments/{id}/pay/", post(wallet_pay))
        .route("/wallet/appointments/{id}/refund/", post(wallet_refund))
        // appointments
        .route("/appointments/", get(appointment_list).post(appointment_create))
        .route("/appointments/{id}/", get(appointment_detail))
        .route("/appointments/{id}/start/", post(appointment_start))
        .route("/appointments/{id}/complete/", post(appointment_complete))
        .route("/appointments/{id}/cancel/", post(appointment_cancel))
        .route("/appointments/queue/doctor/{id}/", get(doctor_queue))
        .route("/appointments/{id}/wait-time/", get(wait_time))
        // journeys
        .route("/journeys/", get(journey_list).post(journey_create))
        .route("/journeys/{id}/", get(journey_detail))
        .route("/journeys/steps/", post(journey_step_create))
        .route("/journeys/request-access/", post(request_access))
        .route("/journeys/my-consents/", get(my_consents))
        .route("/journeys/consent/{id}/respond/", post(consent_respond))
        .route("/journeys/by-abha/{abha_id}/", get(journeys_by_abha))
        .route("/journeys/steps/{id}/report/", post(upload_report))
        .route("/journeys/steps/{id}/report/download/", get(download_report))
        .with_state(state.clone());

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state, record_request))
}

/// Records path + Authorization header for every request.
async fn record_request(
    State(state): State<Arc<MockState>>,
    request: Request,
    next: Next,
) -> Response {
    state.requests.lock().unwrap().push(SeenRequest {
        path: request.uri().path().to_string(),
        auth: request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(String::from),
    });
    next.run(request).await
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(String::from)
}

/// simplejwt-style 401 body.
fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Given token not valid for any token type", "code": "token_not_valid"})),
    )
        .into_response()
}

/// Reject unless the request carries a currently-valid access token.
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<String, Response> {
    match bearer(headers) {
        Some(token) if state.valid_access.lock().unwrap().contains(&token) => Ok(token),
        _ => Err(unauthorized()),
    }
}

// ─── Auth handlers ───────────────────────────────────────────────────────

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if body["email"] == "a@x.com" && body["password"] == "secret123" {
        state.valid_access.lock().unwrap().insert("A1".to_string());
        state.valid_refresh.lock().unwrap().insert("R1".to_string());
        Json(json!({
            "access": "A1",
            "refresh": "R1",
            "user": {"is_patient": true}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response()
    }
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
    }

    let token = body["refresh"].as_str().unwrap_or_default();
    if !state.valid_refresh.lock().unwrap().contains(token) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Token is invalid or expired", "code": "token_not_valid"})),
        )
            .into_response();
    }

    let access = state
        .mint_queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| "A2".to_string());
    if !state.reject_minted.load(Ordering::SeqCst) {
        state.valid_access.lock().unwrap().insert(access.clone());
    }

    let mut response = json!({ "access": access });
    if let Some(rotated) = state.rotated_refresh.lock().unwrap().clone() {
        state.valid_refresh.lock().unwrap().insert(rotated.clone());
        response["refresh"] = json!(rotated);
    }
    Json(response).into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    Json(json!({
        "id": 2,
        "email": body["email"],
        "phone_number": body["phone_number"]
    }))
    .into_response()
}

async fn profile(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(profile_fixture(None)).into_response()
}

async fn patch_profile(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(profile_fixture(body["phone_number"].as_str())).into_response()
}

fn profile_fixture(phone_override: Option<&str>) -> Value {
    json!({
        "id": 1,
        "email": "a@x.com",
        "type": "PATIENT",
        "phone_number": phone_override.unwrap_or("9999999999"),
        "first_name": "Asha",
        "last_name": "Rao",
        "patient_profile": {
            "abha_id": "asha@abdm",
            "dob": "1990-01-15",
            "blood_group": "O+",
            "gender": "F"
        },
        "doctor_profile": null,
        "provider_profile": null
    })
}

async fn change_password(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"detail": "Password updated"})).into_response()
}

async fn doctors() -> Response {
    // Public directory, no auth required.
    Json(json!([{
        "id": 2,
        "email": "mehta@x.com",
        "first_name": "Ravi",
        "last_name": "Mehta",
        "specialization": "Cardiology",
        "consultation_fee": "300.00"
    }]))
    .into_response()
}

async fn org_doctors(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!([org_doctor_fixture()])).into_response()
}

async fn org_add_doctor(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(org_doctor_fixture()).into_response()
}

async fn org_remove_doctor(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    StatusCode::NO_CONTENT.into_response()
}

fn org_doctor_fixture() -> Value {
    json!({
        "id": 2,
        "email": "mehta@x.com",
        "first_name": "Ravi",
        "last_name": "Mehta",
        "specialization": "Cardiology"
    })
}

async fn qr_data(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({"qr_data": "CRESCERE:asha@abdm"})).into_response()
}

async fn qr_image(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    (
        [(header::CONTENT_TYPE, "image/png")],
        b"\x89PNG fake qr".to_vec(),
    )
        .into_response()
}

async fn qr_scan(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if body["qr_data"] == "CRESCERE:asha@abdm" {
        Json(json!({
            "abha_id": "asha@abdm",
            "name": "Asha Rao",
            "email": "a@x.com",
            "blood_group": "O+"
        }))
        .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Unknown QR payload"})),
        )
            .into_response()
    }
}

// ─── Wallet handlers ─────────────────────────────────────────────────────

fn transaction_fixture() -> Value {
    json!({
        "id": 10,
        "amount": "150.00",
        "type": "DEBIT",
        "reason": "CONSULTATION",
        "appointment": 7,
        "description": "Consultation fee",
        "created_at": "2026-08-01T10:05:00Z"
    })
}

async fn wallet(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({
        "id": 1,
        "balance": "500.00",
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-01T10:00:00Z",
        "recent_transactions": [transaction_fixture()]
    }))
    .into_response()
}

async fn wallet_topup(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let amount: f64 = body["amount"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0);
    Json(json!({
        "id": 1,
        "balance": format!("{:.2}", 500.0 + amount),
        "created_at": "2026-08-01T10:00:00Z",
        "updated_at": "2026-08-08T09:00:00Z",
        "recent_transactions": []
    }))
    .into_response()
}

async fn wallet_transactions(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!([transaction_fixture()])).into_response()
}

async fn wallet_pay(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut tx = transaction_fixture();
    tx["appointment"] = json!(id);
    Json(tx).into_response()
}

async fn wallet_refund(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut tx = transaction_fixture();
    tx["appointment"] = json!(id);
    tx["type"] = json!("CREDIT");
    tx["reason"] = json!("REFUND");
    Json(tx).into_response()
}

// ─── Appointment handlers ────────────────────────────────────────────────

fn appointment_fixture(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "patient": 3,
        "patient_name": "Asha Rao",
        "patient_abha": "asha@abdm",
        "doctor": 2,
        "doctor_name": "Dr. Ravi Mehta",
        "doctor_specialization": "Cardiology",
        "scheduled_time": "2026-08-09T09:30:00Z",
        "status": status,
        "estimated_duration": "00:15:00",
        "actual_start_time": null,
        "actual_end_time": null,
        "actual_duration_minutes": null,
        "journey_step": null,
        "created_at": "2026-08-08T08:00:00Z",
        "is_paid": false,
        "consultation_fee": "300.00"
    })
}

async fn appointment_list(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!([appointment_fixture(7, "SCHEDULED")])).into_response()
}

async fn appointment_create(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut appt = appointment_fixture(8, "SCHEDULED");
    appt["doctor"] = body["doctor"].clone();
    appt["scheduled_time"] = body["scheduled_time"].clone();
    Json(appt).into_response()
}

async fn appointment_detail(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(appointment_fixture(id, "SCHEDULED")).into_response()
}

async fn appointment_start(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut appt = appointment_fixture(id, "IN_PROGRESS");
    appt["actual_start_time"] = json!("2026-08-09T09:40:00Z");
    Json(appt).into_response()
}

async fn appointment_complete(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut appt = appointment_fixture(id, "COMPLETED");
    appt["actual_start_time"] = json!("2026-08-09T09:40:00Z");
    appt["actual_end_time"] = json!("2026-08-09T09:52:00Z");
    appt["actual_duration_minutes"] = json!(12);
    Json(appt).into_response()
}

async fn appointment_cancel(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(appointment_fixture(id, "CANCELLED")).into_response()
}

async fn doctor_queue(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_doctor_id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!([appointment_fixture(7, "SCHEDULED")])).into_response()
}

async fn wait_time(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!({
        "queue_position": 3,
        "people_ahead": 2,
        "avg_consultation_minutes": 12.5,
        "estimated_wait_minutes": 25.0,
        "predicted_start_time": "2026-08-09T09:55:00Z",
        "delay_minutes": 10.0,
        "current_status": "SCHEDULED"
    }))
    .into_response()
}

// ─── Journey handlers ────────────────────────────────────────────────────

fn step_fixture(id: i64) -> Value {
    json!({
        "id": id,
        "order": 1,
        "type": "CONSULTATION",
        "notes": "Initial consult",
        "created_at": "2026-08-01T09:30:00Z",
        "created_by_org": 5,
        "created_by_org_name": "City Hospital",
        "created_by_doctor": 2,
        "created_by_doctor_name": "Dr. Ravi Mehta",
        "prescription": null,
        "report": null
    })
}

fn journey_fixture(id: i64) -> Value {
    json!({
        "id": id,
        "title": "Diabetes management",
        "status": "ACTIVE",
        "created_at": "2026-08-01T09:00:00Z",
        "patient": 3,
        "patient_abha_id": "asha@abdm",
        "patient_name": "Asha Rao",
        "created_by_org": 5,
        "created_by_org_name": "City Hospital",
        "steps": [step_fixture(11)]
    })
}

fn consent_fixture(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "patient": 3,
        "patient_name": "Asha Rao",
        "requesting_org": 5,
        "requesting_org_name": "City Hospital",
        "requesting_doctor": 2,
        "requesting_doctor_name": "Dr. Ravi Mehta",
        "status": status,
        "purpose": "Follow-up",
        "requested_at": "2026-08-07T12:00:00Z",
        "responded_at": if status == "PENDING" { Value::Null } else { json!("2026-08-08T12:00:00Z") }
    })
}

async fn journey_list(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!([journey_fixture(4)])).into_response()
}

async fn journey_detail(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(journey_fixture(id)).into_response()
}

async fn journey_create(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut journey = journey_fixture(5);
    journey["title"] = body["title"].clone();
    journey["steps"] = json!([]);
    Json(journey).into_response()
}

async fn journey_step_create(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut step = step_fixture(12);
    step["type"] = body["type"].clone();
    step["order"] = body["order"].clone();
    Json(step).into_response()
}

async fn request_access(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(consent_fixture(9, "PENDING")).into_response()
}

async fn my_consents(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    Json(json!([consent_fixture(9, "PENDING")])).into_response()
}

async fn consent_respond(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let status = body["status"].as_str().unwrap_or("DENIED").to_string();
    Json(consent_fixture(id, &status)).into_response()
}

async fn journeys_by_abha(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(abha_id): Path<String>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if abha_id == "asha@abdm" {
        Json(json!([journey_fixture(4)])).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "No patient with that ABHA id"})),
        )
            .into_response()
    }
}

async fn upload_report(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_step_id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }

    let mut upload = SeenUpload {
        file_name: String::new(),
        content_type: String::new(),
        bytes: Vec::new(),
        data: None,
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload.file_name = field.file_name().unwrap_or_default().to_string();
                upload.content_type = field.content_type().unwrap_or_default().to_string();
                upload.bytes = field.bytes().await.unwrap_or_default().to_vec();
            }
            Some("data") => {
                let text = field.text().await.unwrap_or_default();
                upload.data = serde_json::from_str(&text).ok();
            }
            _ => {}
        }
    }

    let data = upload.data.clone();
    let file_name = upload.file_name.clone();
    state.uploads.lock().unwrap().push(upload);

    Json(json!({
        "id": 21,
        "file": format!("/media/reports/{}", file_name),
        "data": data
    }))
    .into_response()
}

async fn download_report(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(_step_id): Path<i64>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        REPORT_BYTES.to_vec(),
    )
        .into_response()
}
