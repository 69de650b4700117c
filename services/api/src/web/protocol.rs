//! services/api/src/web/protocol.rs
//!
//! Defines the JSON wire shapes shared by the REST handlers and the remote sync
//! adapter. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use emotion_assessment_core::{
    AnonymizedAssessment, Assessment, InputType, RiskLevel, StoragePreference,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Wire Enumerations
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WireInputType {
    #[default]
    Text,
    Voice,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WireRiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WireStoragePreference {
    Server,
    Hybrid,
    Local,
}

impl From<InputType> for WireInputType {
    fn from(value: InputType) -> Self {
        match value {
            InputType::Text => WireInputType::Text,
            InputType::Voice => WireInputType::Voice,
        }
    }
}

impl From<WireInputType> for InputType {
    fn from(value: WireInputType) -> Self {
        match value {
            WireInputType::Text => InputType::Text,
            WireInputType::Voice => InputType::Voice,
        }
    }
}

impl From<RiskLevel> for WireRiskLevel {
    fn from(value: RiskLevel) -> Self {
        match value {
            RiskLevel::Low => WireRiskLevel::Low,
            RiskLevel::Medium => WireRiskLevel::Medium,
            RiskLevel::High => WireRiskLevel::High,
        }
    }
}

impl From<WireRiskLevel> for RiskLevel {
    fn from(value: WireRiskLevel) -> Self {
        match value {
            WireRiskLevel::Low => RiskLevel::Low,
            WireRiskLevel::Medium => RiskLevel::Medium,
            WireRiskLevel::High => RiskLevel::High,
        }
    }
}

impl From<WireStoragePreference> for StoragePreference {
    fn from(value: WireStoragePreference) -> Self {
        match value {
            WireStoragePreference::Server => StoragePreference::Server,
            WireStoragePreference::Hybrid => StoragePreference::Hybrid,
            WireStoragePreference::Local => StoragePreference::Local,
        }
    }
}

//=========================================================================================
// Assessment Payloads
//=========================================================================================

/// The full record, as uploaded under a `server` preference and returned to clients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPayload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_text: String,
    pub input_type: WireInputType,
    pub assessment_timestamp: DateTime<Utc>,
    pub positive_score: f64,
    pub negative_score: f64,
    pub stress_level: f64,
    pub anxiety_level: f64,
    pub risk_level: WireRiskLevel,
    pub report_text: String,
}

impl From<&Assessment> for AssessmentPayload {
    fn from(a: &Assessment) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            input_text: a.input_text.clone(),
            input_type: a.input_type.into(),
            assessment_timestamp: a.timestamp,
            positive_score: a.positive_score,
            negative_score: a.negative_score,
            stress_level: a.stress_level,
            anxiety_level: a.anxiety_level,
            risk_level: a.risk_level.into(),
            report_text: a.report_text.clone(),
        }
    }
}

impl From<AssessmentPayload> for Assessment {
    fn from(p: AssessmentPayload) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            input_text: p.input_text,
            input_type: p.input_type.into(),
            timestamp: p.assessment_timestamp,
            positive_score: p.positive_score,
            negative_score: p.negative_score,
            stress_level: p.stress_level,
            anxiety_level: p.anxiety_level,
            risk_level: p.risk_level.into(),
            report_text: p.report_text,
        }
    }
}

/// The numeric projection uploaded under a `hybrid` preference.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizedPayload {
    pub positive_score: f64,
    pub negative_score: f64,
    pub stress_level: f64,
    pub anxiety_level: f64,
    pub risk_level: WireRiskLevel,
}

impl From<&AnonymizedAssessment> for AnonymizedPayload {
    fn from(a: &AnonymizedAssessment) -> Self {
        Self {
            positive_score: a.positive_score,
            negative_score: a.negative_score,
            stress_level: a.stress_level,
            anxiety_level: a.anxiety_level,
            risk_level: a.risk_level.into(),
        }
    }
}

impl From<AnonymizedPayload> for AnonymizedAssessment {
    fn from(p: AnonymizedPayload) -> Self {
        Self {
            positive_score: p.positive_score,
            negative_score: p.negative_score,
            stress_level: p.stress_level,
            anxiety_level: p.anxiety_level,
            risk_level: p.risk_level.into(),
        }
    }
}

//=========================================================================================
// Request and Response Bodies
//=========================================================================================

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessRequest {
    pub text: String,
    #[serde(default)]
    pub input_type: WireInputType,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AssessResponse {
    pub assessment: AssessmentPayload,
    pub suggestions: Vec<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRequest {
    pub data_storage_preference: WireStoragePreference,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Echo of what the remote ingest stored. Identifying fields are left out.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    pub positive_score: f64,
    pub negative_score: f64,
    pub stress_level: f64,
    pub anxiety_level: f64,
    pub risk_level: WireRiskLevel,
    pub report_text: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct IngestResponse {
    pub success: bool,
    pub assessment: IngestSummary,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use emotion_assessment_core::{AssessmentEngine, InputType};

    #[test]
    fn full_payload_uses_the_camel_case_wire_shape() {
        let a = AssessmentEngine::default().assess("fine", InputType::Voice, Uuid::new_v4());
        let json = serde_json::to_value(AssessmentPayload::from(&a)).unwrap();
        for key in [
            "id",
            "userId",
            "inputText",
            "inputType",
            "assessmentTimestamp",
            "positiveScore",
            "negativeScore",
            "stressLevel",
            "anxietyLevel",
            "riskLevel",
            "reportText",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["inputType"], "voice");
        assert_eq!(json["riskLevel"], "low");
    }

    #[test]
    fn anonymized_payload_carries_no_identifying_fields() {
        let a = AssessmentEngine::default().assess("so worried", InputType::Text, Uuid::new_v4());
        let json = serde_json::to_value(AnonymizedPayload::from(&a.anonymize())).unwrap();
        let object = json.as_object().unwrap();
        for key in ["id", "userId", "inputText", "reportText"] {
            assert!(!object.contains_key(key), "leaked {}", key);
        }
        assert_eq!(object.len(), 5);
    }

    #[test]
    fn full_payload_converts_back_to_the_same_assessment() {
        let a = AssessmentEngine::default().assess("calm", InputType::Text, Uuid::new_v4());
        let back: Assessment = AssessmentPayload::from(&a).into();
        assert_eq!(back, a);
    }
}
