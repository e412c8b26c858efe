// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: the credential and identity state of the logged-in user.
//!
//! Handles:
//! - Rehydration from durable storage at application start
//! - Atomic persistence of the {access, refresh, user} triple
//! - Read-only user/role views for the rest of the application
//! - "session invalidated" notifications on unrecoverable auth failure
//!
//! All session mutation is centralized here; the API client is the only
//! writer, everything else reads.

use crate::error::{ApiError, Result};
use crate::models::{RoleFlags, UserInfo};
use crate::storage::{PersistedSession, SessionStorage, StorageError};
use serde_json::Value;
use std::sync::{Arc, Mutex, RwLock};

/// In-memory session snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Raw user object as the server sent it; cached verbatim.
    pub user: Option<Value>,
}

type InvalidatedHandler = Arc<dyn Fn() + Send + Sync>;

struct SessionInner {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<Option<Session>>,
    /// Serializes the refresh protocol across concurrent requests
    /// (single-flight; see the client's refresh path).
    refresh_lock: tokio::sync::Mutex<()>,
    invalidated_handlers: Mutex<Vec<InvalidatedHandler>>,
}

/// Shared, injectable owner of the session state.
///
/// Cloning is cheap and every clone observes the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Create a store over the given durable backend. Call
    /// [`SessionStore::initialize`] once at startup to rehydrate.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                storage,
                state: RwLock::new(None),
                refresh_lock: tokio::sync::Mutex::new(()),
                invalidated_handlers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Load any persisted session from storage.
    ///
    /// A missing session is normal (cold start before login). A corrupt
    /// session file is discarded so the user can log in fresh.
    pub async fn initialize(&self) -> Result<()> {
        match self.inner.storage.load().await {
            Ok(Some(persisted)) => {
                *self.inner.state.write().unwrap() = Some(Session {
                    access_token: persisted.access_token,
                    refresh_token: persisted.refresh_token,
                    user: persisted.user_data,
                });
                tracing::info!("Session rehydrated from storage");
            }
            Ok(None) => {
                tracing::debug!("No persisted session found");
            }
            Err(StorageError::Corrupt(msg)) => {
                tracing::warn!(error = %msg, "Discarding corrupt persisted session");
                self.inner
                    .storage
                    .clear()
                    .await
                    .map_err(|e| ApiError::Storage(e.to_string()))?;
            }
            Err(e) => return Err(ApiError::Storage(e.to_string())),
        }
        Ok(())
    }

    /// Establish a fresh session after login or registration-then-login.
    ///
    /// The triple is persisted first; the in-memory state only changes once
    /// storage has accepted the full snapshot.
    pub async fn establish(
        &self,
        access_token: String,
        refresh_token: String,
        user: Option<Value>,
    ) -> Result<()> {
        let persisted = PersistedSession {
            access_token,
            refresh_token,
            user_data: user,
        };
        self.inner
            .storage
            .save(&persisted)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        *self.inner.state.write().unwrap() = Some(Session {
            access_token: persisted.access_token,
            refresh_token: persisted.refresh_token,
            user: persisted.user_data,
        });
        tracing::info!("Session established");
        Ok(())
    }

    /// Store a renewed access token (and refresh token, when the server
    /// rotates it). Always writes the full pair plus the cached user in one
    /// snapshot; a failure leaves the previous session intact.
    pub(crate) async fn update_tokens(
        &self,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Result<()> {
        let current = self
            .current()
            .ok_or_else(|| ApiError::Storage("no session to update".to_string()))?;

        let persisted = PersistedSession {
            access_token,
            refresh_token: refresh_token.unwrap_or(current.refresh_token),
            user_data: current.user,
        };
        self.inner
            .storage
            .save(&persisted)
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        *self.inner.state.write().unwrap() = Some(Session {
            access_token: persisted.access_token,
            refresh_token: persisted.refresh_token,
            user: persisted.user_data,
        });
        Ok(())
    }

    /// Explicit logout: drop the session and remove every storage key.
    pub async fn clear(&self) -> Result<()> {
        *self.inner.state.write().unwrap() = None;
        self.inner
            .storage
            .clear()
            .await
            .map_err(|e| ApiError::Storage(e.to_string()))?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Unrecoverable auth failure: wipe the session and notify subscribers.
    ///
    /// Storage failures here are logged, not returned: the in-memory
    /// session is gone either way and the caller is about to see
    /// `AuthFailed`.
    pub(crate) async fn invalidate(&self) {
        *self.inner.state.write().unwrap() = None;
        if let Err(e) = self.inner.storage.clear().await {
            tracing::error!(error = %e, "Failed to clear session storage");
        }
        tracing::warn!("Session invalidated, login required");

        let handlers: Vec<InvalidatedHandler> = self
            .inner
            .invalidated_handlers
            .lock()
            .unwrap()
            .iter()
            .cloned()
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Subscribe to session invalidation (e.g. to navigate back to login).
    /// Handlers run on the task that detected the failure; keep them short.
    pub fn on_session_invalidated(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.inner
            .invalidated_handlers
            .lock()
            .unwrap()
            .push(Arc::new(handler));
    }

    // ─── Read-only views ─────────────────────────────────────────────────

    /// Snapshot of the whole session, if logged in.
    pub fn current(&self) -> Option<Session> {
        self.inner.state.read().unwrap().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner
            .state
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .state
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.refresh_token.clone())
    }

    /// Raw cached user object, if the server sent one at login.
    pub fn user(&self) -> Option<Value> {
        self.inner
            .state
            .read()
            .unwrap()
            .as_ref()
            .and_then(|s| s.user.clone())
    }

    /// Typed view of the cached user object.
    pub fn user_info(&self) -> Option<UserInfo> {
        self.user()
            .and_then(|u| serde_json::from_value(u).ok())
    }

    /// Role flags derived from the cached user object; all-false when
    /// logged out or when no user object was cached.
    pub fn role_flags(&self) -> RoleFlags {
        self.user()
            .map(|u| RoleFlags::from_user(&u))
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().unwrap().is_some()
    }

    pub(crate) fn refresh_lock(&self) -> &tokio::sync::Mutex<()> {
        &self.inner.refresh_lock
    }
}
