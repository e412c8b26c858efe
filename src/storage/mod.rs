//! Durable session persistence (key-value).

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

/// Storage keys as constants.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// JSON-serialized user/role object
    pub const USER_DATA: &str = "user_data";
}

/// One persisted session snapshot.
///
/// The three keys travel together: a snapshot is saved whole and cleared
/// whole, so a reader can never observe a half-written token pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Cached user object, stored under `user_data` in serialized form.
    pub user_data: Option<serde_json::Value>,
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt session data: {0}")]
    Corrupt(String),
}

/// Backend-agnostic session persistence.
///
/// Treated as potentially asynchronous for portability even where the
/// underlying store is synchronous. A missing session on `load` is normal
/// (cold start before any login) and reported as `Ok(None)`.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the persisted session, if any.
    async fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Persist a full snapshot, replacing whatever was there.
    async fn save(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Remove all session keys.
    async fn clear(&self) -> Result<(), StorageError>;
}
