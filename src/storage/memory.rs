// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session storage for tests (offline mode).

use crate::storage::{keys, PersistedSession, SessionStorage, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Session storage backed by an in-process map.
///
/// Mirrors the string-key layout of the real stores so tests can assert on
/// the raw `access_token` / `refresh_token` / `user_data` entries.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under a storage key, if present.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Keys currently present, sorted.
    pub fn stored_keys(&self) -> Vec<String> {
        let mut out: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        out.sort();
        out
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let entries = self.entries.lock().unwrap();

        let (access, refresh) = match (
            entries.get(keys::ACCESS_TOKEN),
            entries.get(keys::REFRESH_TOKEN),
        ) {
            (Some(a), Some(r)) => (a.clone(), r.clone()),
            _ => return Ok(None),
        };

        let user_data = entries
            .get(keys::USER_DATA)
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|e| StorageError::Corrupt(format!("user_data: {}", e)))
            })
            .transpose()?;

        Ok(Some(PersistedSession {
            access_token: access,
            refresh_token: refresh,
            user_data,
        }))
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        let mut next = HashMap::new();
        next.insert(keys::ACCESS_TOKEN.to_string(), session.access_token.clone());
        next.insert(
            keys::REFRESH_TOKEN.to_string(),
            session.refresh_token.clone(),
        );
        if let Some(user) = &session.user_data {
            next.insert(keys::USER_DATA.to_string(), user.to_string());
        }

        // Single swap keeps the three keys consistent with each other.
        *self.entries.lock().unwrap() = next;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
