use std::fmt;

use serde::{Deserialize, Serialize};

/// Scores at or above this value are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores at or below this value are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Maps a compound score to a label. Both thresholds are inclusive.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated text with its compound score and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem {
    pub text: String,
    pub score: f64,
    pub label: Sentiment,
}

impl ScoredItem {
    #[must_use]
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
            label: Sentiment::classify(score),
        }
    }
}

/// Scored batch plus the mean score and its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub items: Vec<ScoredItem>,
    pub overall_score: f64,
    pub overall_label: Sentiment,
}

impl AggregateResult {
    /// Builds the aggregate from already scored items. An empty batch averages to 0.
    #[must_use]
    pub fn from_items(items: Vec<ScoredItem>) -> Self {
        let overall_score = if items.is_empty() {
            0.0
        } else {
            let total: f64 = items.iter().map(|item| item.score).sum();
            #[allow(clippy::cast_precision_loss)]
            let count = items.len() as f64;
            total / count
        };

        Self {
            items,
            overall_score,
            overall_label: Sentiment::classify(overall_score),
        }
    }
}
