//! crates/emotion_assessment_core/src/domain.rs
//!
//! Defines the pure, core data structures for the assessment engine.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Enumerations
//=========================================================================================

/// Where the assessed text came from. Provenance only, never used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Voice,
}

/// The discretized risk tier derived from stress and anxiety levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A user's data-sharing policy, read by the storage router at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoragePreference {
    /// Everything is uploaded to the server.
    Server,
    /// Only anonymized numeric fields leave the device.
    Hybrid,
    /// Nothing leaves the device.
    Local,
}

/// Returned when a stored or transmitted enum value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Voice => "voice",
        }
    }
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl StoragePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoragePreference::Server => "server",
            StoragePreference::Hybrid => "hybrid",
            StoragePreference::Local => "local",
        }
    }
}

impl FromStr for InputType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(InputType::Text),
            "voice" => Ok(InputType::Voice),
            _ => Err(UnknownVariant { kind: "input type", value: s.to_string() }),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(UnknownVariant { kind: "risk level", value: s.to_string() }),
        }
    }
}

impl FromStr for StoragePreference {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "server" => Ok(StoragePreference::Server),
            "hybrid" => Ok(StoragePreference::Hybrid),
            "local" => Ok(StoragePreference::Local),
            _ => Err(UnknownVariant { kind: "storage preference", value: s.to_string() }),
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StoragePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Core Records
//=========================================================================================

/// One immutable scored result for a single text input.
///
/// Built once by the `AssessmentEngine` and never mutated afterwards. All scores
/// and levels are normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub input_type: InputType,
    pub timestamp: DateTime<Utc>,
    pub positive_score: f64,
    pub negative_score: f64,
    pub stress_level: f64,
    pub anxiety_level: f64,
    pub risk_level: RiskLevel,
    pub report_text: String,
}

impl Assessment {
    /// The non-identifying projection that may leave the device under a hybrid policy.
    pub fn anonymize(&self) -> AnonymizedAssessment {
        AnonymizedAssessment {
            positive_score: self.positive_score,
            negative_score: self.negative_score,
            stress_level: self.stress_level,
            anxiety_level: self.anxiety_level,
            risk_level: self.risk_level,
        }
    }
}

/// Scores and levels only. Carries no id, user id, input text, or report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnonymizedAssessment {
    pub positive_score: f64,
    pub negative_score: f64,
    pub stress_level: f64,
    pub anxiety_level: f64,
    pub risk_level: RiskLevel,
}

/// A user as seen by the engine: an id and a data-sharing policy. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub data_storage_preference: StoragePreference,
}
