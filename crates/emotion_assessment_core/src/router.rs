//! crates/emotion_assessment_core/src/router.rs
//!
//! Decides what is persisted locally and what is synchronized remotely for a
//! completed assessment, according to the owner's data-sharing policy.
//!
//! The local write is awaited and its result is the result of `save`. Remote
//! uploads run as detached tasks: their failures are logged and reported on the
//! optional diagnostics channel, never returned, and never retried.

use crate::domain::{AnonymizedAssessment, Assessment, StoragePreference};
use crate::ports::{PersistResult, PersistenceStore, RemoteSync, SyncResult};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Which remote upload, if any, a `save` call dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    LocalOnly,
    Full,
    Anonymized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Full,
    Anonymized,
}

/// Outcome of one background upload, emitted once the upload finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub assessment_id: Uuid,
    pub kind: UploadKind,
    pub outcome: SyncResult<()>,
}

#[derive(Clone)]
pub struct StorageRouter {
    store: Arc<dyn PersistenceStore>,
    sync: Arc<dyn RemoteSync>,
    diagnostics: Option<UnboundedSender<SyncReport>>,
}

impl StorageRouter {
    pub fn new(store: Arc<dyn PersistenceStore>, sync: Arc<dyn RemoteSync>) -> Self {
        Self {
            store,
            sync,
            diagnostics: None,
        }
    }

    /// Routes every background upload outcome to `sink` in addition to the log.
    pub fn with_diagnostics(mut self, sink: UnboundedSender<SyncReport>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Persists locally, then dispatches the upload the preference allows.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn save(
        &self,
        assessment: Assessment,
        preference: StoragePreference,
    ) -> PersistResult<Dispatch> {
        if let Err(e) = self.store.save(&assessment).await {
            error!("Failed to persist assessment {} locally: {}", assessment.id, e);
            return Err(e);
        }
        info!(
            "Persisted assessment {} locally (preference: {}).",
            assessment.id, preference
        );

        match preference {
            StoragePreference::Local => Ok(Dispatch::LocalOnly),
            StoragePreference::Server => {
                self.spawn_full_upload(assessment);
                Ok(Dispatch::Full)
            }
            StoragePreference::Hybrid => {
                self.spawn_anonymized_upload(assessment.id, assessment.anonymize());
                Ok(Dispatch::Anonymized)
            }
        }
    }

    /// The user's local history, newest first. Store failures degrade to an empty list.
    pub async fn history(&self, user_id: Uuid) -> Vec<Assessment> {
        match self.store.fetch_by_user(user_id).await {
            Ok(assessments) => assessments,
            Err(e) => {
                warn!("Failed to fetch assessments for user {}: {}", user_id, e);
                Vec::new()
            }
        }
    }

    /// Deletes a local record. Store failures degrade to a logged no-op.
    pub async fn delete(&self, id: Uuid) {
        if let Err(e) = self.store.delete_by_id(id).await {
            warn!("Failed to delete assessment {}: {}", id, e);
        }
    }

    /// A "fire-and-forget" background task uploading the full record.
    fn spawn_full_upload(&self, assessment: Assessment) {
        let sync = self.sync.clone();
        let diagnostics = self.diagnostics.clone();
        tokio::spawn(async move {
            let outcome = sync.upload_full(&assessment).await;
            finish(diagnostics, assessment.id, UploadKind::Full, outcome);
        });
    }

    /// A "fire-and-forget" background task uploading only the numeric fields.
    fn spawn_anonymized_upload(&self, assessment_id: Uuid, payload: AnonymizedAssessment) {
        let sync = self.sync.clone();
        let diagnostics = self.diagnostics.clone();
        tokio::spawn(async move {
            let outcome = sync.upload_anonymized(&payload).await;
            finish(diagnostics, assessment_id, UploadKind::Anonymized, outcome);
        });
    }
}

fn finish(
    diagnostics: Option<UnboundedSender<SyncReport>>,
    assessment_id: Uuid,
    kind: UploadKind,
    outcome: SyncResult<()>,
) {
    match &outcome {
        Ok(()) => info!("{:?} upload of assessment {} succeeded.", kind, assessment_id),
        // No retry: delivery is not guaranteed.
        Err(e) => error!("{:?} upload of assessment {} failed: {}", kind, assessment_id, e),
    }

    if let Some(sink) = diagnostics {
        let _ = sink.send(SyncReport {
            assessment_id,
            kind,
            outcome,
        });
    }
}
