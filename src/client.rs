// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated API client for the Crescere backend.
//!
//! Handles:
//! - Bearer-token injection on every outbound call
//! - JSON and multipart request bodies
//! - Automatic access-token refresh on 401, with exactly one replay
//! - Session teardown when the refresh token itself is rejected
//!
//! The refresh protocol is single-flight: concurrent requests that all hit
//! a 401 share one refresh call instead of racing the token endpoint.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::SessionStore;
use futures_util::future::BoxFuture;
use futures_util::StreamExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use reqwest::Method;

/// Token refresh endpoint, always called unauthenticated.
const TOKEN_REFRESH_PATH: &str = "/auth/token/refresh/";

/// Request body variants accepted by [`ApiClient::request`].
#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    Json(Value),
    /// File upload; the transport sets the multipart content type.
    Multipart(FileUpload),
}

/// A file destined for a multipart upload, plus the optional structured
/// `data` field that rides along with it.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub contents: Vec<u8>,
    pub data: Option<Value>,
}

impl FileUpload {
    /// Build the multipart form. Forms are single-use in reqwest, so this
    /// runs once per attempt (the replay after a refresh rebuilds it).
    fn to_form(&self) -> Result<reqwest::multipart::Form> {
        let part = reqwest::multipart::Part::bytes(self.contents.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)
            .map_err(|e| {
                ApiError::BadRequest(format!("invalid content type {:?}: {}", self.content_type, e))
            })?;

        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(data) = &self.data {
            form = form.text("data", data.to_string());
        }
        Ok(form)
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers applied after the defaults, so they can override.
    pub headers: Vec<(String, String)>,
}

/// A completed successful response: status plus raw body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Body of a successful token refresh. The refresh token is only present
/// when the server rotates it.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

struct OutboundRequest {
    method: Method,
    url: String,
    payload: Payload,
    headers: Vec<(String, String)>,
}

/// Crescere API client.
///
/// Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client against the configured base URL, sharing the given
    /// session store.
    pub fn new(config: &Config, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
            session,
        }
    }

    /// The session this client reads from and maintains.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ─── Call surface ────────────────────────────────────────────────────

    /// Issue a request and buffer the response body.
    ///
    /// `path` is relative to the configured base URL and starts with `/`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let request = self.build_request(method, path, payload, options);
        let response = self.perform(&request, false).await?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(ApiError::from_transport)?
            .to_vec();
        Ok(ApiResponse { status, body })
    }

    /// GET returning decoded JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, Payload::Empty, RequestOptions::default())
            .await?
            .json()
    }

    /// GET returning the raw body (QR images, report files).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self
            .request(Method::GET, path, Payload::Empty, RequestOptions::default())
            .await?
            .body)
    }

    /// POST a JSON body, decoding the JSON response.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(
            Method::POST,
            path,
            Payload::Json(to_json(body)?),
            RequestOptions::default(),
        )
        .await?
        .json()
    }

    /// POST with no body (action endpoints), decoding the JSON response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, Payload::Empty, RequestOptions::default())
            .await?
            .json()
    }

    /// PATCH a JSON body, decoding the JSON response.
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(
            Method::PATCH,
            path,
            Payload::Json(to_json(body)?),
            RequestOptions::default(),
        )
        .await?
        .json()
    }

    /// DELETE carrying a JSON body, ignoring the response body.
    pub async fn delete_with_body<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.request(
            Method::DELETE,
            path,
            Payload::Json(to_json(body)?),
            RequestOptions::default(),
        )
        .await?;
        Ok(())
    }

    /// Upload a file as multipart form data, decoding the JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        upload: FileUpload,
    ) -> Result<T> {
        self.request(
            Method::POST,
            path,
            Payload::Multipart(upload),
            RequestOptions::default(),
        )
        .await?
        .json()
    }

    /// Stream a download into `writer`, returning the number of bytes
    /// written. Goes through the same auth/refresh pipeline as everything
    /// else; only the body transfer is streamed.
    pub async fn download_to<W: AsyncWrite + Unpin>(
        &self,
        path: &str,
        writer: &mut W,
    ) -> Result<u64> {
        let request = self.build_request(
            Method::GET,
            path,
            Payload::Empty,
            RequestOptions::default(),
        );
        let response = self.perform(&request, false).await?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(ApiError::from_transport)?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("write failed: {}", e)))?;
            written += chunk.len() as u64;
        }
        writer
            .flush()
            .await
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("flush failed: {}", e)))?;
        Ok(written)
    }

    // ─── Dispatch and refresh protocol ───────────────────────────────────

    fn build_request(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
        options: RequestOptions,
    ) -> OutboundRequest {
        OutboundRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            payload,
            headers: options.headers,
        }
    }

    /// Dispatch one logical request, honoring the refresh-and-replay-once
    /// protocol. `already_retried` is threaded explicitly: a replay can
    /// never trigger a second refresh cycle.
    fn perform<'a>(
        &'a self,
        request: &'a OutboundRequest,
        already_retried: bool,
    ) -> BoxFuture<'a, Result<reqwest::Response>> {
        Box::pin(async move {
            let token = self.session.access_token();
            let response = self.send_once(request, token.as_deref()).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && !already_retried {
                if let Some(stale) = token {
                    if self.session.refresh_token().is_some() {
                        self.refresh_access_token(&stale).await?;
                        return self.perform(request, true).await;
                    }
                }
                // No usable refresh token: the 401 itself is the answer.
            }

            Err(Self::error_from_response(response).await)
        })
    }

    /// One attempt on the wire. Attaches the bearer token iff one exists;
    /// unauthenticated calls (login, signup, refresh) go out bare.
    async fn send_once(
        &self,
        request: &OutboundRequest,
        token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let mut builder = self.http.request(request.method.clone(), &request.url);

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.payload {
            Payload::Empty => builder,
            Payload::Json(value) => builder.json(value),
            Payload::Multipart(upload) => builder.multipart(upload.to_form()?),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder.send().await.map_err(ApiError::from_transport)
    }

    /// Exchange the refresh token for a new access token (single-flight).
    ///
    /// `stale_access` is the token the 401 was observed with: after taking
    /// the lock, a differing current token means a concurrent request
    /// already won the refresh and we reuse its result.
    async fn refresh_access_token(&self, stale_access: &str) -> Result<()> {
        let _guard = self.session.refresh_lock().lock().await;

        match self.session.access_token() {
            Some(current) if current != stale_access => {
                tracing::debug!("Token already refreshed by a concurrent request");
                return Ok(());
            }
            // Session gone: a concurrent refresh failed and tore it down.
            None => return Err(ApiError::AuthFailed),
            _ => {}
        }

        let refresh_token = match self.session.refresh_token() {
            Some(t) => t,
            None => return Err(ApiError::AuthFailed),
        };

        tracing::info!("Access token rejected, refreshing");

        let url = format!("{}{}", self.base_url, TOKEN_REFRESH_PATH);
        let outcome = async {
            let response = self
                .http
                .post(&url)
                .json(&serde_json::json!({ "refresh": refresh_token }))
                .send()
                .await
                .map_err(ApiError::from_transport)?;

            if !response.status().is_success() {
                return Err(Self::error_from_response(response).await);
            }

            response
                .json::<RefreshResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        .await;

        match outcome {
            Ok(renewed) => {
                self.session
                    .update_tokens(renewed.access, renewed.refresh)
                    .await?;
                tracing::info!("Access token refreshed");
                Ok(())
            }
            Err(e) => {
                // Refresh-token exhaustion is fatal to the session. This
                // covers rejection and network failure alike.
                tracing::warn!(error = %e, "Token refresh failed, clearing session");
                self.session.invalidate().await;
                Err(ApiError::AuthFailed)
            }
        }
    }

    /// Turn a non-2xx response into an `ApiError`, pulling the server's
    /// message out of the body when it has one.
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body).unwrap_or(body);
        ApiError::Api { status, message }
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to serialize request: {}", e)))
}

/// Best-effort extraction of a human-readable message from an error body.
/// DRF uses `detail`; some endpoints use `error`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
