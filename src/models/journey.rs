//! Health journey, step, prescription and consent models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A patient's health journey with its ordered steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journey {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub patient: i64,
    #[serde(default)]
    pub patient_abha_id: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub created_by_org: Option<i64>,
    #[serde(default)]
    pub created_by_org_name: Option<String>,
    #[serde(default)]
    pub steps: Vec<JourneyStep>,
}

/// One step within a journey (consultation, test, prescription, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyStep {
    pub id: i64,
    pub order: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by_org: Option<i64>,
    #[serde(default)]
    pub created_by_org_name: Option<String>,
    #[serde(default)]
    pub created_by_doctor: Option<i64>,
    #[serde(default)]
    pub created_by_doctor_name: Option<String>,
    #[serde(default)]
    pub prescription: Option<Prescription>,
    #[serde(default)]
    pub report: Option<MedicalReport>,
}

/// Prescription attached to a journey step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub doctor: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    /// List of medications with dosage, backend-defined shape.
    pub medications: Value,
    #[serde(default)]
    pub digital_signature: Option<String>,
}

/// Uploaded report attached to a journey step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalReport {
    pub id: i64,
    /// Server-side path/URL of the stored file.
    #[serde(default)]
    pub file: Option<String>,
    /// Structured results accompanying the file, if any.
    #[serde(default)]
    pub data: Option<Value>,
}

/// Payload for `POST /journeys/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewJourney {
    pub title: String,
    pub patient: i64,
}

/// Payload for `POST /journeys/steps/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewJourneyStep {
    pub journey: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_step: Option<i64>,
}

/// Patient's answer to a consent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentStatus {
    Pending,
    Granted,
    Denied,
}

/// Cross-organization data-access consent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consent {
    pub id: i64,
    pub patient: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    pub requesting_org: i64,
    #[serde(default)]
    pub requesting_org_name: Option<String>,
    #[serde(default)]
    pub requesting_doctor: Option<i64>,
    #[serde(default)]
    pub requesting_doctor_name: Option<String>,
    pub status: ConsentStatus,
    #[serde(default)]
    pub purpose: Option<String>,
    pub requested_at: DateTime<Utc>,
    #[serde(default)]
    pub responded_at: Option<DateTime<Utc>>,
}
