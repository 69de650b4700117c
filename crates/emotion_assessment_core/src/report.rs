//! crates/emotion_assessment_core/src/report.rs
//!
//! Renders the deterministic textual report and the tier-specific suggestion list.

use crate::domain::RiskLevel;
use crate::sentiment::EmotionComponents;

/// Component score at which a targeted suggestion is appended.
pub const COMPONENT_ALERT_THRESHOLD: f64 = 0.6;

const LOW_RISK_SUGGESTIONS: &[&str] = &[
    "Keep a regular sleep and daily routine",
    "Get moderate exercise",
    "Practice deep breathing",
];

const MEDIUM_RISK_SUGGESTIONS: &[&str] = &[
    "Try meditation or relaxation exercises",
    "Talk things through with friends or family",
    "Adjust your work pace",
    "Make sure you get enough sleep",
];

const HIGH_RISK_SUGGESTIONS: &[&str] = &[
    "Consider seeking professional psychological counseling",
    "Practice mindfulness-based stress reduction",
    "Reduce your work pressure where possible",
    "Spend more time talking with family and friends",
    "Keep a regular routine and a healthy lifestyle",
];

/// Coarse label for the overall mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalState {
    PositiveOptimistic,
    LowMood,
    Stable,
    MildlyNegative,
}

impl EmotionalState {
    /// First match wins, in this order.
    pub fn from_scores(positive: f64, negative: f64) -> Self {
        if positive > 0.7 {
            EmotionalState::PositiveOptimistic
        } else if negative > 0.7 {
            EmotionalState::LowMood
        } else if positive > negative {
            EmotionalState::Stable
        } else {
            EmotionalState::MildlyNegative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmotionalState::PositiveOptimistic => "positive/optimistic",
            EmotionalState::LowMood => "low mood",
            EmotionalState::Stable => "stable",
            EmotionalState::MildlyNegative => "mildly negative",
        }
    }
}

/// Everything the generator needs, on the unit scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportInput {
    pub positive: f64,
    pub negative: f64,
    pub stress_level: f64,
    pub anxiety_level: f64,
    pub risk_level: RiskLevel,
    pub components: Option<EmotionComponents>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, input: &ReportInput) -> Report {
        let state = EmotionalState::from_scores(input.positive, input.negative);
        let suggestions = self.suggestions(input.risk_level, input.components.as_ref());

        let suggestion_lines = suggestions
            .iter()
            .map(|s| format!("   - {}", s))
            .collect::<Vec<_>>()
            .join("\n");

        let text = format!(
            "Emotional Assessment Report\n\
             1. Emotional state: {state}\n\
             2. Risk level: {risk}\n\
             3. Detailed analysis:\n   \
             - Positive affect: {positive}\n   \
             - Negative affect: {negative}\n   \
             - Stress level: {stress}\n   \
             - Anxiety level: {anxiety}\n\
             \n\
             4. Suggestions:\n\
             {suggestion_lines}\n\
             \n\
             Note: this assessment is for reference only. Please seek professional help if you need it.",
            state = state.label(),
            risk = input.risk_level,
            positive = percent(input.positive),
            negative = percent(input.negative),
            stress = percent(input.stress_level),
            anxiety = percent(input.anxiety_level),
        );

        Report { text, suggestions }
    }

    /// Tier suggestions, followed by one targeted line per alarming component.
    pub fn suggestions(
        &self,
        risk_level: RiskLevel,
        components: Option<&EmotionComponents>,
    ) -> Vec<String> {
        let base = match risk_level {
            RiskLevel::Low => LOW_RISK_SUGGESTIONS,
            RiskLevel::Medium => MEDIUM_RISK_SUGGESTIONS,
            RiskLevel::High => HIGH_RISK_SUGGESTIONS,
        };
        let mut suggestions: Vec<String> = base.iter().map(|s| s.to_string()).collect();

        if let Some(c) = components {
            let targeted = [
                (c.sadness, "Reach out to someone you trust about what is weighing on you"),
                (c.anger, "Step away and take a short walk before responding to what upset you"),
                (c.fear, "Write down what you are afraid of and which parts you can control"),
                (c.anxiety, "Try a paced breathing exercise: inhale for 4 seconds, exhale for 6"),
            ];
            suggestions.extend(
                targeted
                    .iter()
                    .filter(|(score, _)| *score >= COMPONENT_ALERT_THRESHOLD)
                    .map(|(_, s)| s.to_string()),
            );
        }

        suggestions
    }
}

/// One-decimal fixed-point percentage.
fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
