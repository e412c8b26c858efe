// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wallet endpoints: balance, top-up, history, appointment payments.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Transaction, Wallet};
use serde_json::json;

/// Wallet endpoint group.
#[derive(Clone)]
pub struct WalletService {
    client: ApiClient,
}

impl WalletService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Current balance with the most recent transactions.
    pub async fn balance(&self) -> Result<Wallet> {
        self.client.get("/wallet/").await
    }

    /// Add funds. `amount` is a decimal string, matching the backend's
    /// serialization of money.
    pub async fn top_up(&self, amount: &str) -> Result<Wallet> {
        self.client
            .post("/wallet/topup/", &json!({ "amount": amount }))
            .await
    }

    /// Full transaction history, newest first.
    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.client.get("/wallet/transactions/").await
    }

    /// Pay the consultation fee for an appointment.
    pub async fn pay_for_appointment(&self, appointment_id: i64) -> Result<Transaction> {
        self.client
            .post_empty(&format!("/wallet/appointments/{}/pay/", appointment_id))
            .await
    }

    /// Refund a cancelled appointment's fee.
    pub async fn refund_appointment(&self, appointment_id: i64) -> Result<Transaction> {
        self.client
            .post_empty(&format!("/wallet/appointments/{}/refund/", appointment_id))
            .await
    }
}
