//! Appointment and queue models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Appointment as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_abha: Option<String>,
    pub doctor: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_specialization: Option<String>,
    pub scheduled_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    /// Duration string in Django's `HH:MM:SS` form.
    #[serde(default)]
    pub estimated_duration: Option<String>,
    #[serde(default)]
    pub actual_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_duration_minutes: Option<i64>,
    /// Journey step this consultation belongs to, if any.
    #[serde(default)]
    pub journey_step: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub consultation_fee: Option<String>,
}

/// Payload for booking an appointment. The patient is inferred server-side
/// from the authenticated session.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub doctor: i64,
    pub scheduled_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journey_step: Option<i64>,
}

/// Server-computed queue position and wait estimate.
///
/// The client fetches and displays this; all scheduling math is backend-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    pub queue_position: i64,
    pub people_ahead: i64,
    pub avg_consultation_minutes: f64,
    pub estimated_wait_minutes: f64,
    pub predicted_start_time: DateTime<Utc>,
    pub delay_minutes: f64,
    pub current_status: String,
}
