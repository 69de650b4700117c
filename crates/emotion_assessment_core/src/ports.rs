//! crates/emotion_assessment_core/src/ports.rs
//!
//! Defines the service contracts (traits) the engine depends on.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of a concrete on-device store, HTTP client, or ML runtime.

use crate::domain::{AnonymizedAssessment, Assessment, StoragePreference, User};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

//=========================================================================================
// Port Error and Result Types
//=========================================================================================

/// A failure of the local persistence store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected persistence error occurred: {0}")]
    Unexpected(String),
}

/// A failure of a remote upload. Logged, never retried, never surfaced to the caller of `save`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Remote responded with status {0}")]
    Status(u16),
    #[error("Failed to serialize payload: {0}")]
    Serialization(String),
}

/// A failure of the optional sentiment model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Sentiment model is unavailable")]
    Unavailable,
    #[error("Sentiment model failed: {0}")]
    Failed(String),
}

/// A convenience type alias for `Result<T, PersistError>`.
pub type PersistResult<T> = Result<T, PersistError>;

/// A convenience type alias for `Result<T, SyncError>`.
pub type SyncResult<T> = Result<T, SyncError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The on-device store. Implementations own their concurrency discipline; every call
/// is treated as individually atomic.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    async fn save(&self, assessment: &Assessment) -> PersistResult<()>;

    /// Returns the user's assessments ordered newest first.
    async fn fetch_by_user(&self, user_id: Uuid) -> PersistResult<Vec<Assessment>>;

    async fn delete_by_id(&self, id: Uuid) -> PersistResult<()>;
}

/// The remote service that receives uploads.
#[async_trait]
pub trait RemoteSync: Send + Sync {
    async fn upload_full(&self, assessment: &Assessment) -> SyncResult<()>;

    async fn upload_anonymized(&self, payload: &AnonymizedAssessment) -> SyncResult<()>;
}

/// Looks up the data-sharing policy of a user.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the user, registering unknown ids with the directory's default preference.
    async fn get_user(&self, user_id: Uuid) -> PersistResult<User>;

    async fn set_storage_preference(
        &self,
        user_id: Uuid,
        preference: StoragePreference,
    ) -> PersistResult<()>;
}

/// Storage on the receiving side of `RemoteSync`, kept apart from the local store.
#[async_trait]
pub trait RemoteArchive: Send + Sync {
    async fn save_full(&self, assessment: &Assessment) -> PersistResult<()>;

    async fn save_anonymous(&self, record: &AnonymizedAssessment) -> PersistResult<()>;
}

/// An optional statistical classifier. Scoring is synchronous and CPU-only, so this
/// capability is too.
pub trait SentimentModel: Send + Sync {
    /// Returns label hypotheses (e.g. `"Positive"`, `"Negative"`) with their confidences.
    fn hypotheses(&self, text: &str) -> Result<HashMap<String, f64>, ModelError>;
}
