// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication and account endpoints.
//!
//! Login and registration are the only calls that go out without a bearer
//! token; login is also the one place a session gets established.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{
    ChangePasswordRequest, DoctorListing, LoginRequest, LoginResponse, RegisterDoctorRequest,
    RegisterPatientRequest, RegisterProviderRequest, UserInfo, UserProfile,
};
use serde_json::Value;
use validator::Validate;

/// Auth endpoint group.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token pair and establish the session.
    ///
    /// On success the access/refresh tokens and the user object (when the
    /// server sends one) are persisted together before this returns.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        validate(&request)?;

        let response: LoginResponse = self.client.post("/auth/login/", &request).await?;

        self.client
            .session()
            .establish(
                response.access.clone(),
                response.refresh.clone(),
                response.user.clone(),
            )
            .await?;

        Ok(response)
    }

    /// Drop the session and remove all persisted credentials.
    pub async fn logout(&self) -> Result<()> {
        self.client.session().clear().await
    }

    /// Register a patient account. ABHA enrollment happens server-side.
    pub async fn register_patient(&self, request: &RegisterPatientRequest) -> Result<UserInfo> {
        validate(request)?;
        self.client.post("/auth/register/patient/", request).await
    }

    /// Register a doctor account.
    pub async fn register_doctor(&self, request: &RegisterDoctorRequest) -> Result<UserInfo> {
        validate(request)?;
        self.client.post("/auth/register/doctor/", request).await
    }

    /// Register a provider organization (hospital, lab or pharmacy).
    pub async fn register_provider(&self, request: &RegisterProviderRequest) -> Result<UserInfo> {
        validate(request)?;
        self.client.post("/auth/register/provider/", request).await
    }

    /// Fetch the logged-in user's full profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.client.get("/auth/profile/").await
    }

    /// Partially update the profile; returns the updated profile.
    pub async fn update_profile(&self, changes: &Value) -> Result<UserProfile> {
        self.client.patch("/auth/profile/", changes).await
    }

    /// Change the account password.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()> {
        validate(request)?;
        let _: Value = self
            .client
            .post("/auth/profile/change-password/", request)
            .await?;
        Ok(())
    }

    /// Public doctor directory.
    pub async fn doctors(&self) -> Result<Vec<DoctorListing>> {
        self.client.get("/auth/doctors/").await
    }
}

fn validate<T: Validate>(request: &T) -> Result<()> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
