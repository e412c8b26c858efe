// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Crescere client SDK: typed access to the Crescere healthcare
//! coordination API with a managed authentication session.
//!
//! The crate wraps every backend call in one authenticated client that
//! attaches the bearer token, renews it on expiry and tears the session
//! down when renewal is no longer possible. Typed endpoint groups cover
//! auth, wallet, appointments, health journeys, QR lookup and provider
//! organizations.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use client::{ApiClient, ApiResponse, FileUpload, Method, Payload, RequestOptions};
pub use config::Config;
pub use error::{ApiError, Result};
pub use session::{Session, SessionStore};

use services::{
    AppointmentService, AuthService, JourneyService, OrganizationService, QrService, WalletService,
};
use std::sync::Arc;
use storage::FileStorage;

/// The assembled API surface: one shared client plus every endpoint group.
#[derive(Clone)]
pub struct CrescereApi {
    pub client: ApiClient,
    pub auth: AuthService,
    pub wallet: WalletService,
    pub appointments: AppointmentService,
    pub journeys: JourneyService,
    pub qr: QrService,
    pub organization: OrganizationService,
}

impl CrescereApi {
    /// Assemble the API surface over an existing session store.
    pub fn new(config: &Config, session: SessionStore) -> Self {
        let client = ApiClient::new(config, session);
        Self {
            auth: AuthService::new(client.clone()),
            wallet: WalletService::new(client.clone()),
            appointments: AppointmentService::new(client.clone()),
            journeys: JourneyService::new(client.clone()),
            qr: QrService::new(client.clone()),
            organization: OrganizationService::new(client.clone()),
            client,
        }
    }

    /// Build the default stack: file-backed session storage at the
    /// configured path, rehydrated before the first request goes out.
    pub async fn connect(config: &Config) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(config.session_file.clone()));
        let session = SessionStore::new(storage);
        session.initialize().await?;
        Ok(Self::new(config, session))
    }

    /// The session shared by every endpoint group.
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }
}
