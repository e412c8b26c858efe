// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed session storage.
//!
//! The session lives in one JSON document holding the `access_token`,
//! `refresh_token` and `user_data` keys. Writes go to a sibling temp file
//! first and are renamed into place, so a crash mid-write leaves either the
//! old snapshot or the new one, never a torn pair.

use crate::storage::{keys, PersistedSession, SessionStorage, StorageError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Session storage backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a store at the given path. The file is created lazily on the
    /// first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let doc: Map<String, Value> = serde_json::from_str(&raw)
            .map_err(|e| StorageError::Corrupt(format!("session file: {}", e)))?;

        let field = |key: &str| -> Result<String, StorageError> {
            doc.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| StorageError::Corrupt(format!("missing key {}", key)))
        };

        let access_token = field(keys::ACCESS_TOKEN)?;
        let refresh_token = field(keys::REFRESH_TOKEN)?;

        // user_data is stored in serialized form, same as the other stores.
        let user_data = doc
            .get(keys::USER_DATA)
            .and_then(Value::as_str)
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|e| StorageError::Corrupt(format!("user_data: {}", e)))
            })
            .transpose()?;

        Ok(Some(PersistedSession {
            access_token,
            refresh_token,
            user_data,
        }))
    }

    async fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        let mut doc = Map::new();
        doc.insert(
            keys::ACCESS_TOKEN.to_string(),
            Value::String(session.access_token.clone()),
        );
        doc.insert(
            keys::REFRESH_TOKEN.to_string(),
            Value::String(session.refresh_token.clone()),
        );
        if let Some(user) = &session.user_data {
            doc.insert(keys::USER_DATA.to_string(), Value::String(user.to_string()));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.tmp_path();
        let body = serde_json::to_string_pretty(&Value::Object(doc))
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
