// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment endpoints: booking, lifecycle actions, queue and wait time.
//!
//! Queue position and wait estimates are computed server-side; this group
//! only fetches and returns them.

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{Appointment, NewAppointment, QueueStatus};

/// Appointment endpoint group.
#[derive(Clone)]
pub struct AppointmentService {
    client: ApiClient,
}

impl AppointmentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Appointments visible to the logged-in role (own bookings for a
    /// patient, own schedule for a doctor).
    pub async fn list(&self) -> Result<Vec<Appointment>> {
        self.client.get("/appointments/").await
    }

    /// Book an appointment.
    pub async fn create(&self, appointment: &NewAppointment) -> Result<Appointment> {
        self.client.post("/appointments/", appointment).await
    }

    pub async fn get(&self, id: i64) -> Result<Appointment> {
        self.client.get(&format!("/appointments/{}/", id)).await
    }

    /// Doctor starts the consultation.
    pub async fn start(&self, id: i64) -> Result<Appointment> {
        self.client
            .post_empty(&format!("/appointments/{}/start/", id))
            .await
    }

    /// Doctor completes the consultation.
    pub async fn complete(&self, id: i64) -> Result<Appointment> {
        self.client
            .post_empty(&format!("/appointments/{}/complete/", id))
            .await
    }

    pub async fn cancel(&self, id: i64) -> Result<Appointment> {
        self.client
            .post_empty(&format!("/appointments/{}/cancel/", id))
            .await
    }

    /// Today's queue for a doctor.
    pub async fn doctor_queue(&self, doctor_id: i64) -> Result<Vec<Appointment>> {
        self.client
            .get(&format!("/appointments/queue/doctor/{}/", doctor_id))
            .await
    }

    /// Server-predicted wait time for an appointment. Pages poll this.
    pub async fn wait_time(&self, id: i64) -> Result<QueueStatus> {
        self.client
            .get(&format!("/appointments/{}/wait-time/", id))
            .await
    }
}
