// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Provider-organization endpoints: managing the doctor roster.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::OrgDoctor;
use serde::Serialize;
use serde_json::json;

/// Payload for adding a doctor to the organization roster.
#[derive(Debug, Clone, Serialize)]
pub struct AddOrgDoctorRequest {
    /// Email of an already-registered doctor account.
    pub email: String,
}

/// Organization endpoint group (provider accounts only).
#[derive(Clone)]
pub struct OrganizationService {
    client: ApiClient,
}

impl OrganizationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Doctors currently attached to the organization.
    pub async fn doctors(&self) -> Result<Vec<OrgDoctor>> {
        self.client.get("/auth/organization/doctors/").await
    }

    /// Attach a doctor to the organization.
    pub async fn add_doctor(&self, request: &AddOrgDoctorRequest) -> Result<OrgDoctor> {
        self.client
            .post("/auth/organization/doctors/", request)
            .await
    }

    /// Detach a doctor. The id travels in the DELETE body, mirroring the
    /// backend's contract.
    pub async fn remove_doctor(&self, doctor_id: i64) -> Result<()> {
        self.client
            .delete_with_body("/auth/organization/doctors/", &json!({ "doctor_id": doctor_id }))
            .await
    }
}
