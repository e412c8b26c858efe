//! Typed endpoint groups over the authenticated client.

pub mod appointments;
pub mod auth;
pub mod journeys;
pub mod organization;
pub mod qr;
pub mod wallet;

pub use appointments::AppointmentService;
pub use auth::AuthService;
pub use journeys::JourneyService;
pub use organization::{AddOrgDoctorRequest, OrganizationService};
pub use qr::{PatientSummary, QrData, QrService};
pub use wallet::WalletService;
