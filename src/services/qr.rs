// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! QR endpoints for patient identification.
//!
//! QR image decoding is out of scope; the scanned payload arrives here as
//! an opaque string from whatever widget produced it.

use crate::client::ApiClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A patient's QR payload (`GET /auth/patients/me/qr-data/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrData {
    pub qr_data: String,
}

/// Patient summary returned by a QR scan. The backend decides the exact
/// shape; the common fields are typed and the rest is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSummary {
    #[serde(default)]
    pub abha_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// QR endpoint group.
#[derive(Clone)]
pub struct QrService {
    client: ApiClient,
}

impl QrService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The logged-in patient's QR payload.
    pub async fn my_qr_data(&self) -> Result<QrData> {
        self.client.get("/auth/patients/me/qr-data/").await
    }

    /// The logged-in patient's QR code as raw image bytes.
    pub async fn my_qr_image(&self) -> Result<Vec<u8>> {
        self.client.get_bytes("/auth/patients/me/qr-code/").await
    }

    /// Look up a patient from a scanned QR payload (doctor/provider action).
    pub async fn scan(&self, qr_data: &str) -> Result<PatientSummary> {
        self.client
            .post(
                "/auth/patients/qr-scan/",
                &serde_json::json!({ "qr_data": qr_data }),
            )
            .await
    }
}
