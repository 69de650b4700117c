//! services/api/src/adapters/sync.rs
//!
//! This module contains the HTTP adapter for remote synchronization.
//! It implements the `RemoteSync` port from the `core` crate.

use crate::web::protocol::{AnonymizedPayload, AssessmentPayload};
use async_trait::async_trait;
use emotion_assessment_core::domain::{AnonymizedAssessment, Assessment};
use emotion_assessment_core::ports::{RemoteSync, SyncError, SyncResult};
use serde::Serialize;
use std::time::Duration;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `RemoteSync` by POSTing JSON to the remote ingest endpoints.
#[derive(Clone)]
pub struct HttpRemoteSync {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteSync {
    /// Creates a new `HttpRemoteSync`. The timeout bounds each upload.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> SyncResult<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() || e.is_body() {
                    SyncError::Serialization(e.to_string())
                } else {
                    SyncError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        Ok(())
    }
}

//=========================================================================================
// `RemoteSync` Trait Implementation
//=========================================================================================

#[async_trait]
impl RemoteSync for HttpRemoteSync {
    async fn upload_full(&self, assessment: &Assessment) -> SyncResult<()> {
        self.post_json("/api/assessments", &AssessmentPayload::from(assessment))
            .await
    }

    async fn upload_anonymized(&self, payload: &AnonymizedAssessment) -> SyncResult<()> {
        self.post_json("/api/assessments/anonymous", &AnonymizedPayload::from(payload))
            .await
    }
}
