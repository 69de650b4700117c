pub mod domain;
pub mod engine;
pub mod features;
pub mod memory;
pub mod ports;
pub mod report;
pub mod risk;
pub mod router;
pub mod sentiment;

pub use domain::{AnonymizedAssessment, Assessment, InputType, RiskLevel, StoragePreference, User};
pub use engine::{AssessmentEngine, EngineConfig, Evaluation};
pub use memory::InMemoryStore;
pub use ports::{
    ModelError, PersistError, PersistResult, PersistenceStore, RemoteArchive, RemoteSync,
    SentimentModel, SyncError, SyncResult, UserDirectory,
};
pub use router::{Dispatch, StorageRouter, SyncReport, UploadKind};
pub use sentiment::{KeywordSentimentScorer, ModelSentimentScorer, SentimentScorer};
