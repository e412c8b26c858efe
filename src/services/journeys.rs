// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health-journey endpoints: journeys, steps, consents and reports.

use crate::client::{ApiClient, FileUpload};
use crate::error::Result;
use crate::models::{
    Consent, ConsentStatus, Journey, JourneyStep, MedicalReport, NewJourney, NewJourneyStep,
};
use serde_json::json;
use tokio::io::AsyncWrite;

/// Journey endpoint group.
#[derive(Clone)]
pub struct JourneyService {
    client: ApiClient,
}

impl JourneyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Journeys visible to the logged-in role.
    pub async fn list(&self) -> Result<Vec<Journey>> {
        self.client.get("/journeys/").await
    }

    pub async fn get(&self, id: i64) -> Result<Journey> {
        self.client.get(&format!("/journeys/{}/", id)).await
    }

    /// Open a new journey for a patient (doctor/provider action).
    pub async fn create(&self, journey: &NewJourney) -> Result<Journey> {
        self.client.post("/journeys/", journey).await
    }

    /// Append a step to a journey.
    pub async fn create_step(&self, step: &NewJourneyStep) -> Result<JourneyStep> {
        self.client.post("/journeys/steps/", step).await
    }

    /// Request access to a patient's health data by ABHA id. Creates a
    /// pending consent the patient must respond to.
    pub async fn request_access(
        &self,
        patient_abha_id: &str,
        purpose: Option<&str>,
    ) -> Result<Consent> {
        let mut body = json!({ "patient_abha_id": patient_abha_id });
        if let Some(purpose) = purpose {
            body["purpose"] = json!(purpose);
        }
        self.client.post("/journeys/request-access/", &body).await
    }

    /// Consent requests addressed to the logged-in patient.
    pub async fn my_consents(&self) -> Result<Vec<Consent>> {
        self.client.get("/journeys/my-consents/").await
    }

    /// Grant or deny a consent request.
    pub async fn respond_consent(&self, consent_id: i64, status: ConsentStatus) -> Result<Consent> {
        self.client
            .post(
                &format!("/journeys/consent/{}/respond/", consent_id),
                &json!({ "status": status }),
            )
            .await
    }

    /// Journeys of the patient with the given ABHA id (requires granted
    /// consent). The id is caller-supplied, so it is percent-encoded.
    pub async fn by_abha(&self, abha_id: &str) -> Result<Vec<Journey>> {
        let safe_id = urlencoding::encode(abha_id);
        self.client
            .get(&format!("/journeys/by-abha/{}/", safe_id))
            .await
    }

    /// Attach a report file (plus optional structured results) to a step.
    pub async fn upload_report(&self, step_id: i64, upload: FileUpload) -> Result<MedicalReport> {
        self.client
            .post_multipart(&format!("/journeys/steps/{}/report/", step_id), upload)
            .await
    }

    /// Download a step's report into memory.
    pub async fn download_report(&self, step_id: i64) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("/journeys/steps/{}/report/download/", step_id))
            .await
    }

    /// Stream a step's report to a writer (large files).
    pub async fn download_report_to<W: AsyncWrite + Unpin>(
        &self,
        step_id: i64,
        writer: &mut W,
    ) -> Result<u64> {
        self.client
            .download_to(
                &format!("/journeys/steps/{}/report/download/", step_id),
                writer,
            )
            .await
    }
}
