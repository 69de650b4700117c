//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use emotion_assessment_core::ports::{RemoteArchive, UserDirectory};
use emotion_assessment_core::{AssessmentEngine, StorageRouter};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every collaborator is constructed explicitly in the binary (or a test) and injected here.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AssessmentEngine>,
    pub router: StorageRouter,
    pub users: Arc<dyn UserDirectory>,
    /// Receiving side of remote sync.
    pub archive: Arc<dyn RemoteArchive>,
}
