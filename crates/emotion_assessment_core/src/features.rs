//! crates/emotion_assessment_core/src/features.rs
//!
//! Keyword feature extraction: tokenizes text and accumulates stress and anxiety
//! hits, weighting a keyword by a preceding intensifier.

use regex::Regex;
use std::sync::LazyLock;

/// Sensitivity tuning factor applied to keyword density before clamping to `1.0`.
pub const DEFAULT_SENSITIVITY: f64 = 3.0;

/// Weight of a keyword that follows an intensifier.
pub const INTENSIFIER_MULTIPLIER: f64 = 1.5;

/// Whitespace and Unicode punctuation (including `，` and `。`) separate tokens.
static TOKEN_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\p{P}]+").expect("token boundary pattern is valid"));

const STRESS_KEYWORDS: &[&str] = &[
    "压力", "紧张", "疲惫", "不堪重负", "焦虑", "烦躁", "压抑", "沮丧", "困扰", "崩溃",
    "stress", "stressed", "tense", "exhausted", "overwhelmed", "irritable", "frustrated",
    "depressed", "burnout", "drained",
];

const ANXIETY_KEYWORDS: &[&str] = &[
    "担心", "害怕", "恐惧", "慌张", "不安", "忧虑", "惊慌", "恐慌", "惶恐", "忐忑",
    "anxious", "worried", "worry", "afraid", "scared", "nervous", "panic", "uneasy",
    "fearful", "restless",
];

const INTENSIFIERS: &[&str] = &[
    "非常", "很", "特别", "极其", "太", "真的", "好", "超级",
    "very", "extremely", "really", "so", "super", "incredibly", "too", "especially",
];

//=========================================================================================
// Lexicon
//=========================================================================================

/// The keyword sets the extractor matches against. Entries are stored lowercase.
#[derive(Debug, Clone)]
pub struct KeywordLexicon {
    stress: Vec<String>,
    anxiety: Vec<String>,
    intensifiers: Vec<String>,
}

impl KeywordLexicon {
    pub fn new<S: AsRef<str>>(stress: &[S], anxiety: &[S], intensifiers: &[S]) -> Self {
        let normalize = |words: &[S]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            stress: normalize(stress),
            anxiety: normalize(anxiety),
            intensifiers: normalize(intensifiers),
        }
    }

    fn is_stress(&self, token: &str) -> bool {
        matches_any(token, &self.stress)
    }

    fn is_anxiety(&self, token: &str) -> bool {
        matches_any(token, &self.anxiety)
    }

    fn is_intensifier(&self, token: &str) -> bool {
        matches_any(token, &self.intensifiers)
    }
}

impl Default for KeywordLexicon {
    fn default() -> Self {
        Self::new(STRESS_KEYWORDS, ANXIETY_KEYWORDS, INTENSIFIERS)
    }
}

/// ASCII keywords must equal the token; CJK keywords may sit anywhere inside it,
/// since CJK text has no spaces between words.
fn keyword_matches(token: &str, keyword: &str) -> bool {
    if keyword.is_ascii() {
        token == keyword
    } else {
        token.contains(keyword)
    }
}

fn matches_any(token: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| keyword_matches(token, k))
}

/// Splits text on word boundaries. No stemming.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_BOUNDARY.split(text).filter(|t| !t.is_empty())
}

//=========================================================================================
// Extraction
//=========================================================================================

/// Raw accumulators produced by a single pass over the tokens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmotionFeatures {
    pub stress: f64,
    pub anxiety: f64,
    pub token_count: usize,
}

impl EmotionFeatures {
    pub fn stress_level(&self, sensitivity: f64) -> f64 {
        density_level(self.stress, self.token_count, sensitivity)
    }

    pub fn anxiety_level(&self, sensitivity: f64) -> f64 {
        density_level(self.anxiety, self.token_count, sensitivity)
    }
}

/// `min(accumulator / token_count * sensitivity, 1.0)`, with `0 / 0` defined as `0.0`.
///
/// The product is formed before dividing so that the division is the only rounding
/// step: one hit in ten tokens at sensitivity 3 yields exactly `0.3`.
pub fn density_level(accumulator: f64, token_count: usize, sensitivity: f64) -> f64 {
    if token_count == 0 {
        return 0.0;
    }
    (accumulator * sensitivity / token_count as f64).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    lexicon: KeywordLexicon,
}

impl FeatureExtractor {
    pub fn new(lexicon: KeywordLexicon) -> Self {
        Self { lexicon }
    }

    pub fn extract(&self, text: &str) -> EmotionFeatures {
        let mut features = EmotionFeatures::default();
        // Set by a token that is only an intensifier; consumed by the next token.
        let mut armed = false;

        for raw in tokenize(text) {
            features.token_count += 1;
            let token = raw.to_lowercase();

            let intensified = self.lexicon.is_intensifier(&token);
            let is_stress = self.lexicon.is_stress(&token);
            let is_anxiety = self.lexicon.is_anxiety(&token);

            if intensified && !is_stress && !is_anxiety {
                armed = true;
                continue;
            }

            let multiplier = if armed || intensified { INTENSIFIER_MULTIPLIER } else { 1.0 };
            if is_stress {
                features.stress += multiplier;
            }
            if is_anxiety {
                features.anxiety += multiplier;
            }
            armed = false;
        }

        features
    }
}
