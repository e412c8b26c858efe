// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with the refresh protocol's failure taxonomy.

/// Error type returned by the API client and the typed endpoint groups.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (DNS, connect, TLS, mid-body drop).
    /// Never retried by this crate.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The session could not be re-established: a 401 survived the
    /// refresh-and-replay cycle, or the refresh call itself was rejected.
    /// The session has already been cleared when this is returned.
    #[error("authentication failed, login required")]
    AuthFailed,

    /// Any other non-2xx response, passed through with the server's detail.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided message (response body, possibly JSON `detail`)
        message: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Request payload rejected before dispatch (client-side validation).
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Durable session storage failed.
    #[error("session storage error: {0}")]
    Storage(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Map a transport error from reqwest into the taxonomy.
    ///
    /// Errors carrying a status are produced by the status-check path, not
    /// here, so anything reaching this function is a no-response failure.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }

    /// Status code of the server response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True if the caller must send the user back through login.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::AuthFailed)
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
