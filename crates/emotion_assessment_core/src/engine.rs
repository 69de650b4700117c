//! crates/emotion_assessment_core/src/engine.rs
//!
//! The orchestrator: composes feature extraction, sentiment scoring, risk
//! classification, and report generation into a single `assess` call.

use crate::domain::{Assessment, InputType};
use crate::features::{FeatureExtractor, KeywordLexicon, DEFAULT_SENSITIVITY};
use crate::report::{ReportGenerator, ReportInput};
use crate::risk;
use crate::sentiment::{KeywordSentimentScorer, SentimentScorer};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Tunables of the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Multiplier applied to keyword density when deriving stress and anxiety levels.
    pub sensitivity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

/// An assessment together with the suggestions rendered into its report.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub assessment: Assessment,
    pub suggestions: Vec<String>,
}

/// Holds no mutable state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct AssessmentEngine {
    extractor: FeatureExtractor,
    scorer: Arc<dyn SentimentScorer>,
    reports: ReportGenerator,
    config: EngineConfig,
}

impl AssessmentEngine {
    pub fn new(
        extractor: FeatureExtractor,
        scorer: Arc<dyn SentimentScorer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            extractor,
            scorer,
            reports: ReportGenerator::new(),
            config,
        }
    }

    /// Default lexicon, keyword sentiment fallback, and default sensitivity.
    pub fn with_defaults() -> Self {
        Self::new(
            FeatureExtractor::new(KeywordLexicon::default()),
            Arc::new(KeywordSentimentScorer::new()),
            EngineConfig::default(),
        )
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Scores `text`. Never fails; empty input produces zeroed levels.
    pub fn assess(&self, text: &str, input_type: InputType, user_id: Uuid) -> Assessment {
        self.evaluate(text, input_type, user_id).assessment
    }

    pub fn evaluate(&self, text: &str, input_type: InputType, user_id: Uuid) -> Evaluation {
        let sentiment = self.scorer.score(text);

        let features = self.extractor.extract(text);
        let stress_level = features.stress_level(self.config.sensitivity);
        let anxiety_level = features.anxiety_level(self.config.sensitivity);
        let risk_level = risk::classify(stress_level, anxiety_level);

        let report = self.reports.generate(&ReportInput {
            positive: sentiment.positive,
            negative: sentiment.negative,
            stress_level,
            anxiety_level,
            risk_level,
            components: sentiment.components,
        });

        let assessment = Assessment {
            id: Uuid::new_v4(),
            user_id,
            input_text: text.to_string(),
            input_type,
            timestamp: Utc::now(),
            positive_score: sentiment.positive,
            negative_score: sentiment.negative,
            stress_level,
            anxiety_level,
            risk_level,
            report_text: report.text,
        };

        Evaluation {
            assessment,
            suggestions: report.suggestions,
        }
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;
    use crate::sentiment::ModelSentimentScorer;

    #[test]
    fn empty_text_yields_a_low_risk_assessment() {
        let a = AssessmentEngine::default().assess("", InputType::Text, Uuid::new_v4());
        assert_eq!(a.stress_level, 0.0);
        assert_eq!(a.anxiety_level, 0.0);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert!(!a.report_text.is_empty());
    }

    #[test]
    fn positive_text_is_low_risk_and_optimistic() {
        let a = AssessmentEngine::default().assess(
            "今天心情非常好，一切都很顺利",
            InputType::Text,
            Uuid::new_v4(),
        );
        assert!(a.negative_score < 0.5);
        assert!(a.stress_level < 0.05);
        assert!(a.anxiety_level < 0.05);
        assert_eq!(a.risk_level, RiskLevel::Low);
        assert!(a.report_text.contains("positive/optimistic"));
    }

    #[test]
    fn anxious_text_raises_both_levels() {
        let a = AssessmentEngine::default().assess(
            "我感到非常焦虑和压抑，很不安",
            InputType::Voice,
            Uuid::new_v4(),
        );
        assert!(a.stress_level > 0.5);
        assert!(a.anxiety_level > 0.5);
        assert!(matches!(a.risk_level, RiskLevel::Medium | RiskLevel::High));
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let engine = AssessmentEngine::default();
        let user_id = Uuid::new_v4();
        let text = "work has been stressful and I am very worried about tomorrow";
        let first = engine.assess(text, InputType::Text, user_id);
        let second = engine.assess(text, InputType::Text, user_id);
        assert_ne!(first.id, second.id);
        assert_eq!(first.positive_score, second.positive_score);
        assert_eq!(first.negative_score, second.negative_score);
        assert_eq!(first.stress_level, second.stress_level);
        assert_eq!(first.anxiety_level, second.anxiety_level);
        assert_eq!(first.risk_level, second.risk_level);
        assert_eq!(first.report_text, second.report_text);
    }

    #[test]
    fn input_type_does_not_affect_scores() {
        let engine = AssessmentEngine::default();
        let user_id = Uuid::new_v4();
        let text = "so nervous and tense";
        let typed = engine.assess(text, InputType::Text, user_id);
        let spoken = engine.assess(text, InputType::Voice, user_id);
        assert_eq!(typed.stress_level, spoken.stress_level);
        assert_eq!(typed.anxiety_level, spoken.anxiety_level);
        assert_eq!(spoken.input_type, InputType::Voice);
    }

    #[test]
    fn unavailable_model_scorer_still_produces_an_assessment() {
        let engine = AssessmentEngine::new(
            FeatureExtractor::default(),
            Arc::new(ModelSentimentScorer::new(None)),
            EngineConfig::default(),
        );
        let a = engine.assess("hello", InputType::Text, Uuid::new_v4());
        assert_eq!(a.positive_score, 0.5);
        assert_eq!(a.negative_score, 0.5);
        assert!(a.report_text.contains("mildly negative"));
    }

    #[test]
    fn sensitivity_scales_levels() {
        let user_id = Uuid::new_v4();
        let text = "stressed a b c d e f g h i";
        let gentle = AssessmentEngine::new(
            FeatureExtractor::default(),
            Arc::new(KeywordSentimentScorer::new()),
            EngineConfig { sensitivity: 1.0 },
        )
        .assess(text, InputType::Text, user_id);
        let default = AssessmentEngine::default().assess(text, InputType::Text, user_id);
        assert_eq!(gentle.stress_level, 0.1);
        assert_eq!(default.stress_level, 0.3);
    }

    #[test]
    fn sad_text_with_hao_is_not_reported_as_stable() {
        let a = AssessmentEngine::default().assess("我好难过", InputType::Text, Uuid::new_v4());
        assert_eq!(a.positive_score, 0.0);
        assert!(a.negative_score > 0.0);
        assert!(a.report_text.contains("mildly negative"));
        assert!(!a.report_text.contains("stable"));
        assert!(!a.report_text.contains("positive/optimistic"));
    }

    #[test]
    fn levels_landing_on_the_low_ceiling_classify_as_low() {
        // One stress and one anxiety keyword in ten tokens: both levels are 0.3.
        let a = AssessmentEngine::default().assess(
            "stressed worried a b c d e f g h",
            InputType::Text,
            Uuid::new_v4(),
        );
        assert_eq!(a.stress_level, 0.3);
        assert_eq!(a.anxiety_level, 0.3);
        assert_eq!(a.risk_level, RiskLevel::Low);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = Arc::new(AssessmentEngine::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    engine.assess("very anxious", InputType::Text, Uuid::nil()).anxiety_level
                })
            })
            .collect();
        let levels: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(levels.windows(2).all(|w| w[0] == w[1]));
    }
}
