//! API payload types, mirroring the backend serializers.

pub mod appointment;
pub mod journey;
pub mod user;
pub mod wallet;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment, QueueStatus};
pub use journey::{
    Consent, ConsentStatus, Journey, JourneyStep, MedicalReport, NewJourney, NewJourneyStep,
    Prescription,
};
pub use user::{
    ChangePasswordRequest, DoctorListing, DoctorProfile, LoginRequest, LoginResponse, OrgDoctor,
    PatientProfile, ProviderProfile, RegisterDoctorRequest, RegisterPatientRequest,
    RegisterProviderRequest, RoleFlags, UserInfo, UserProfile,
};
pub use wallet::{Transaction, Wallet};
