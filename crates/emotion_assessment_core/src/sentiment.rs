//! crates/emotion_assessment_core/src/sentiment.rs
//!
//! Polarity scoring. Two interchangeable implementations of `SentimentScorer`:
//! a model-backed scorer that degrades to a neutral result, and a deterministic
//! keyword-frequency fallback. Every score is on the unit scale `[0, 1]`.

use crate::features::tokenize;
use crate::ports::SentimentModel;
use std::sync::Arc;
use tracing::warn;

/// Result returned whenever the model cannot be consulted.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Contribution of one keyword hit to a component score (20 points out of 100).
pub const HIT_INCREMENT: f64 = 0.2;

//=========================================================================================
// Scorer Contract
//=========================================================================================

/// Per-emotion component scores, available when the keyword scorer is active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmotionComponents {
    pub joy: f64,
    pub calm: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub anxiety: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
    pub components: Option<EmotionComponents>,
}

impl SentimentScore {
    pub fn neutral() -> Self {
        Self {
            positive: NEUTRAL_SCORE,
            negative: NEUTRAL_SCORE,
            components: None,
        }
    }
}

/// Scores the polarity of a whole text. Never fails: degradation yields a neutral score.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;
}

//=========================================================================================
// Model-backed Scorer
//=========================================================================================

/// Delegates to a pluggable `SentimentModel`, reading its `Positive` and `Negative`
/// hypotheses.
#[derive(Clone, Default)]
pub struct ModelSentimentScorer {
    model: Option<Arc<dyn SentimentModel>>,
}

impl ModelSentimentScorer {
    pub fn new(model: Option<Arc<dyn SentimentModel>>) -> Self {
        Self { model }
    }
}

impl SentimentScorer for ModelSentimentScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let Some(model) = &self.model else {
            warn!("No sentiment model loaded; using neutral sentiment.");
            return SentimentScore::neutral();
        };

        match model.hypotheses(text) {
            Ok(hypotheses) => {
                let read = |label: &str| {
                    hypotheses
                        .get(label)
                        .copied()
                        .filter(|v| v.is_finite())
                        .map(|v| v.clamp(0.0, 1.0))
                        .unwrap_or(NEUTRAL_SCORE)
                };
                SentimentScore {
                    positive: read("Positive"),
                    negative: read("Negative"),
                    components: None,
                }
            }
            Err(e) => {
                warn!("Sentiment model failed, using neutral sentiment: {}", e);
                SentimentScore::neutral()
            }
        }
    }
}

//=========================================================================================
// Keyword Fallback Scorer
//=========================================================================================

const JOY: &[&str] = &[
    "开心", "高兴", "快乐", "幸福", "愉快", "满意", "喜悦", "美好", "希望", "好", "顺利", "棒",
    "happy", "glad", "joy", "great", "good", "wonderful", "excited",
];
const CALM: &[&str] = &[
    "平静", "放松", "安心", "轻松", "舒服", "踏实", "平和", "安稳", "从容", "好", "顺利",
    "calm", "relaxed", "peaceful", "fine", "steady",
];
const SADNESS: &[&str] = &[
    "难过", "伤心", "悲伤", "失落", "沮丧", "压抑", "痛苦", "孤独", "绝望", "哭",
    "不好", "不开心", "不高兴", "不舒服", "不顺利", "糟糕",
    "sad", "unhappy", "lonely", "hopeless", "miserable", "depressed",
];
const ANGER: &[&str] = &[
    "生气", "愤怒", "恼火", "烦躁", "讨厌", "气愤",
    "angry", "furious", "annoyed", "mad", "irritated",
];
const FEAR: &[&str] = &[
    "害怕", "恐惧", "惊慌", "恐慌", "惶恐", "担心",
    "scared", "afraid", "fear", "terrified", "frightened",
];
const ANXIETY: &[&str] = &[
    "焦虑", "不安", "忧虑", "紧张", "忐忑", "慌张",
    "anxious", "worried", "nervous", "uneasy", "tense",
];
const INTENSIFIERS: &[&str] = &[
    "非常", "很", "特别", "极其", "太", "真的", "好", "超级",
    "very", "extremely", "really", "so", "super", "incredibly", "too", "especially",
];

/// Component order: joy, calm, sadness, anger, fear, anxiety.
const EMOTION_SETS: [&[&str]; 6] = [JOY, CALM, SADNESS, ANGER, FEAR, ANXIETY];

/// Number of hits credited to a keyword directly preceded by an intensifier.
pub const INTENSIFIED_HIT_WEIGHT: f64 = 2.0;

/// Counts keyword hits per emotion. A hit adds `HIT_INCREMENT` to its component,
/// capped at `1.0`; a keyword directly preceded by an intensifier is credited
/// `INTENSIFIED_HIT_WEIGHT` hits.
///
/// CJK tokens are segmented by longest match, so `美好` is one hit and `不好` is not
/// read as `好`. A word that is both an intensifier and a keyword (`好`) acts as an
/// intensifier when another keyword follows it directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSentimentScorer;

impl KeywordSentimentScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn components(&self, text: &str) -> EmotionComponents {
        let tokens: Vec<String> = tokenize(text).map(str::to_lowercase).collect();
        let hits = weighted_hits(&segment(&tokens));
        let component = |i: usize| (hits[i] * HIT_INCREMENT).min(1.0);

        EmotionComponents {
            joy: component(0),
            calm: component(1),
            sadness: component(2),
            anger: component(3),
            fear: component(4),
            anxiety: component(5),
        }
    }
}

impl SentimentScorer for KeywordSentimentScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let c = self.components(text);
        SentimentScore {
            positive: (c.joy + c.calm) / 2.0,
            negative: (c.sadness + c.anger + c.fear + c.anxiety) / 4.0,
            components: Some(c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Word(&'static str),
    Gap,
}

fn is_intensifier(word: &str) -> bool {
    INTENSIFIERS.contains(&word)
}

fn is_keyword(word: &str) -> bool {
    EMOTION_SETS.iter().any(|set| set.contains(&word))
}

fn lexicon() -> impl Iterator<Item = &'static str> {
    EMOTION_SETS
        .into_iter()
        .flatten()
        .chain(INTENSIFIERS)
        .copied()
}

fn longest_prefix(rest: &str) -> Option<&'static str> {
    lexicon()
        .filter(|w| !w.is_ascii() && rest.starts_with(*w))
        .max_by_key(|w| w.len())
}

fn push_gap(pieces: &mut Vec<Piece>) {
    if pieces.last() != Some(&Piece::Gap) {
        pieces.push(Piece::Gap);
    }
}

/// Flattens tokens into matched words separated by gaps. A token that is exactly
/// one intensifier leaves no gap, so it stays adjacent to the next token.
fn segment(tokens: &[String]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for token in tokens {
        if token.is_ascii() {
            if let Some(word) = lexicon().find(|w| *w == token.as_str()) {
                pieces.push(Piece::Word(word));
            }
            if !is_intensifier(token) {
                push_gap(&mut pieces);
            }
            continue;
        }

        let mut rest = token.as_str();
        while let Some(c) = rest.chars().next() {
            match longest_prefix(rest) {
                Some(word) => {
                    pieces.push(Piece::Word(word));
                    rest = &rest[word.len()..];
                }
                None => {
                    push_gap(&mut pieces);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        if !is_intensifier(token) {
            push_gap(&mut pieces);
        }
    }
    pieces
}

fn weighted_hits(pieces: &[Piece]) -> [f64; 6] {
    let mut hits = [0.0; 6];
    for (i, piece) in pieces.iter().enumerate() {
        let Piece::Word(word) = *piece else { continue };
        let before_keyword = matches!(pieces.get(i + 1), Some(Piece::Word(next)) if is_keyword(next));
        if is_intensifier(word) && before_keyword {
            continue;
        }
        let intensified = i > 0 && matches!(pieces[i - 1], Piece::Word(prev) if is_intensifier(prev));
        let weight = if intensified { INTENSIFIED_HIT_WEIGHT } else { 1.0 };
        for (slot, set) in hits.iter_mut().zip(EMOTION_SETS) {
            if set.contains(&word) {
                *slot += weight;
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ModelError;
    use std::collections::HashMap;

    struct FixedModel(Result<HashMap<String, f64>, ModelError>);

    impl SentimentModel for FixedModel {
        fn hypotheses(&self, _text: &str) -> Result<HashMap<String, f64>, ModelError> {
            self.0.clone()
        }
    }

    #[test]
    fn missing_model_is_neutral() {
        let score = ModelSentimentScorer::new(None).score("anything");
        assert_eq!(score, SentimentScore::neutral());
    }

    #[test]
    fn failing_model_is_neutral() {
        let model = FixedModel(Err(ModelError::Failed("boom".into())));
        let score = ModelSentimentScorer::new(Some(Arc::new(model))).score("anything");
        assert_eq!(score, SentimentScore::neutral());
    }

    #[test]
    fn model_hypotheses_are_read_and_missing_labels_default() {
        let mut map = HashMap::new();
        map.insert("Positive".to_string(), 0.9);
        let score = ModelSentimentScorer::new(Some(Arc::new(FixedModel(Ok(map))))).score("x");
        assert_eq!(score.positive, 0.9);
        assert_eq!(score.negative, NEUTRAL_SCORE);
    }

    #[test]
    fn model_values_are_clamped_to_unit_range() {
        let mut map = HashMap::new();
        map.insert("Positive".to_string(), 1.7);
        map.insert("Negative".to_string(), -0.2);
        let score = ModelSentimentScorer::new(Some(Arc::new(FixedModel(Ok(map))))).score("x");
        assert_eq!(score.positive, 1.0);
        assert_eq!(score.negative, 0.0);
    }

    #[test]
    fn empty_text_scores_zero_on_both_sides() {
        let score = KeywordSentimentScorer::new().score("");
        assert_eq!(score.positive, 0.0);
        assert_eq!(score.negative, 0.0);
    }

    #[test]
    fn intensified_positive_text_scores_high() {
        let score = KeywordSentimentScorer::new().score("今天心情非常好，一切都很顺利");
        assert!(score.positive > 0.7, "positive was {}", score.positive);
        assert_eq!(score.negative, 0.0);
    }

    #[test]
    fn components_cap_at_one() {
        let c = KeywordSentimentScorer::new().components("sad sad sad sad sad sad sad");
        assert_eq!(c.sadness, 1.0);
    }

    #[test]
    fn english_intensifier_weights_the_hit() {
        let plain = KeywordSentimentScorer::new().components("I am happy");
        let intensified = KeywordSentimentScorer::new().components("I am really happy");
        assert_eq!(plain.joy, HIT_INCREMENT);
        assert_eq!(intensified.joy, INTENSIFIED_HIT_WEIGHT * HIT_INCREMENT);
        assert_eq!(intensified.calm, 0.0);
    }

    #[test]
    fn intensifier_must_be_adjacent() {
        let c = KeywordSentimentScorer::new().components("really tired but happy");
        assert_eq!(c.joy, HIT_INCREMENT);
    }

    #[test]
    fn hao_before_a_negative_keyword_is_an_intensifier() {
        let score = KeywordSentimentScorer::new().score("我好难过");
        let c = score.components.unwrap();
        assert_eq!(c.joy, 0.0);
        assert_eq!(c.calm, 0.0);
        assert_eq!(c.sadness, INTENSIFIED_HIT_WEIGHT * HIT_INCREMENT);
        assert_eq!(score.positive, 0.0);
        assert!(score.negative > score.positive);
    }

    #[test]
    fn negated_good_reads_as_sadness() {
        let c = KeywordSentimentScorer::new().components("今天不好");
        assert_eq!(c.joy, 0.0);
        assert_eq!(c.sadness, HIT_INCREMENT);
    }

    #[test]
    fn longer_keyword_is_one_hit() {
        let c = KeywordSentimentScorer::new().components("生活很美好");
        // `很` intensifies `美好`; the trailing `好` is not counted again.
        assert_eq!(c.joy, INTENSIFIED_HIT_WEIGHT * HIT_INCREMENT);
        assert_eq!(c.calm, 0.0);
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let score = KeywordSentimentScorer::new()
            .score("happy happy happy calm calm calm great good fine relaxed wonderful");
        assert!((0.0..=1.0).contains(&score.positive));
        assert!((0.0..=1.0).contains(&score.negative));
    }
}
