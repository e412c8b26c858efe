//! User, profile and auth payload models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Role flags for the logged-in account.
///
/// Derived from the cached user object at read time; never stored on their
/// own. The backend guarantees at most one flag is set in practice, but the
/// shape does not enforce it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleFlags {
    pub is_patient: bool,
    pub is_doctor: bool,
    pub is_provider: bool,
}

impl RoleFlags {
    /// Read the `is_*` flags out of a raw user object.
    pub fn from_user(user: &Value) -> Self {
        let flag = |key: &str| user.get(key).and_then(Value::as_bool).unwrap_or(false);
        Self {
            is_patient: flag("is_patient"),
            is_doctor: flag("is_doctor"),
            is_provider: flag("is_provider"),
        }
    }
}

/// Typed view of the user object carried in login responses and cached in
/// session storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    /// PATIENT, DOCTOR or PROVIDER
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_patient: bool,
    #[serde(default)]
    pub is_doctor: bool,
    #[serde(default)]
    pub is_provider: bool,
}

/// Credentials for `POST /auth/login/`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login body: token pair plus the optional user object.
///
/// The user object is kept raw; the session caches it verbatim so nothing
/// the server sent is lost across restarts.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<Value>,
}

/// Patient sign-up payload. ABHA enrollment happens server-side from the
/// aadhaar and phone number.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterPatientRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(equal = 12))]
    pub aadhaar: String,
}

/// Doctor sign-up payload.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterDoctorRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub specialization: String,
    #[validate(length(equal = 12))]
    pub aadhaar: String,
    /// HFR id of an existing provider organization to join, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_hfr_id: Option<String>,
}

/// Provider-organization sign-up payload.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterProviderRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    /// PHARMACY, LAB or HOSPITAL
    #[serde(rename = "type")]
    pub provider_type: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
}

/// Password change payload for `POST /auth/profile/change-password/`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Full profile as returned by `GET /auth/profile/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub patient_profile: Option<PatientProfile>,
    #[serde(default)]
    pub doctor_profile: Option<DoctorProfile>,
    #[serde(default)]
    pub provider_profile: Option<ProviderProfile>,
}

/// Patient-specific profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default)]
    pub abha_id: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Doctor-specific profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub specialization: String,
    #[serde(default)]
    pub hpr_id: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    /// Decimal fee serialized as a string by the backend.
    #[serde(default)]
    pub consultation_fee: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
}

/// Provider-specific profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// PHARMACY, LAB or HOSPITAL
    #[serde(rename = "type")]
    pub provider_type: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub hfr_id: Option<String>,
}

/// One entry of the doctor directory (`GET /auth/doctors/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorListing {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub specialization: String,
    #[serde(default)]
    pub consultation_fee: Option<String>,
}

/// Doctor belonging to a provider organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgDoctor {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub specialization: String,
}
