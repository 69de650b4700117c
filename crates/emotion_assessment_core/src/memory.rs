//! crates/emotion_assessment_core/src/memory.rs
//!
//! An in-process implementation of the persistence ports. Used by tests and by
//! the service when no database is configured.

use crate::domain::{AnonymizedAssessment, Assessment, StoragePreference, User};
use crate::ports::{
    PersistError, PersistResult, PersistenceStore, RemoteArchive, UserDirectory,
};
use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
pub struct InMemoryStore {
    assessments: RwLock<HashMap<Uuid, Assessment>>,
    users: RwLock<HashMap<Uuid, StoragePreference>>,
    received: RwLock<Vec<Assessment>>,
    anonymous: RwLock<Vec<AnonymizedAssessment>>,
    default_preference: StoragePreference,
}

impl InMemoryStore {
    /// Unknown users are registered with `default_preference`.
    pub fn new(default_preference: StoragePreference) -> Self {
        Self {
            assessments: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            received: RwLock::new(Vec::new()),
            anonymous: RwLock::new(Vec::new()),
            default_preference,
        }
    }

    /// Full records received through the remote archive.
    pub async fn received_records(&self) -> Vec<Assessment> {
        self.received.read().await.clone()
    }

    /// Anonymized records received through the remote archive.
    pub async fn anonymous_records(&self) -> Vec<AnonymizedAssessment> {
        self.anonymous.read().await.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(StoragePreference::Local)
    }
}

#[async_trait]
impl PersistenceStore for InMemoryStore {
    async fn save(&self, assessment: &Assessment) -> PersistResult<()> {
        match self.assessments.write().await.entry(assessment.id) {
            Entry::Occupied(_) => Err(PersistError::Unexpected(format!(
                "Assessment {} already exists",
                assessment.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(assessment.clone());
                Ok(())
            }
        }
    }

    async fn fetch_by_user(&self, user_id: Uuid) -> PersistResult<Vec<Assessment>> {
        let mut found: Vec<Assessment> = self
            .assessments
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }

    async fn delete_by_id(&self, id: Uuid) -> PersistResult<()> {
        match self.assessments.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(PersistError::NotFound(format!("Assessment {} not found", id))),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn get_user(&self, user_id: Uuid) -> PersistResult<User> {
        let mut users = self.users.write().await;
        let preference = *users.entry(user_id).or_insert(self.default_preference);
        Ok(User {
            id: user_id,
            data_storage_preference: preference,
        })
    }

    async fn set_storage_preference(
        &self,
        user_id: Uuid,
        preference: StoragePreference,
    ) -> PersistResult<()> {
        self.users.write().await.insert(user_id, preference);
        Ok(())
    }
}

#[async_trait]
impl RemoteArchive for InMemoryStore {
    async fn save_full(&self, assessment: &Assessment) -> PersistResult<()> {
        self.received.write().await.push(assessment.clone());
        Ok(())
    }

    async fn save_anonymous(&self, record: &AnonymizedAssessment) -> PersistResult<()> {
        self.anonymous.write().await.push(*record);
        Ok(())
    }
}
