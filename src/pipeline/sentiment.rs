use std::sync::Arc;

use crate::analysis::SentimentScorer;
use crate::domain::{AggregateResult, ScoredItem, Sentiment};

/// Turns a batch of texts into per-item scores and one overall score.
///
/// Stateless apart from the scorer, so one instance is shared by every request.
#[derive(Clone)]
pub struct SentimentPipeline {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentPipeline {
    #[must_use]
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Compound score of `text`, always within `[-1, 1]`.
    #[must_use]
    pub fn score(&self, text: &str) -> f64 {
        let raw = self.scorer.compound(text);
        if raw.is_finite() {
            raw.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn classify(&self, score: f64) -> Sentiment {
        Sentiment::classify(score)
    }

    /// Scores every text in order and averages the scores.
    #[must_use]
    pub fn aggregate<S: AsRef<str>>(&self, texts: &[S]) -> AggregateResult {
        let items = texts
            .iter()
            .map(|text| {
                let text = text.as_ref();
                ScoredItem::new(text, self.score(text))
            })
            .collect();
        AggregateResult::from_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::KeywordScorer;

    struct ConstantScorer(f64);

    impl SentimentScorer for ConstantScorer {
        fn compound(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn pipeline(score: f64) -> SentimentPipeline {
        SentimentPipeline::new(Arc::new(ConstantScorer(score)))
    }

    #[test]
    fn score_clamps_out_of_range_output() {
        assert!((pipeline(3.5).score("x") - 1.0).abs() < f64::EPSILON);
        assert!((pipeline(-7.0).score("x") + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_maps_non_finite_output_to_zero() {
        assert!(pipeline(f64::NAN).score("x").abs() < f64::EPSILON);
        assert!(pipeline(f64::INFINITY).score("x").abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_preserves_order_and_text() {
        let pipeline = SentimentPipeline::new(Arc::new(KeywordScorer::default()));
        let texts = ["great", "awful", "plain"];

        let result = pipeline.aggregate(&texts);

        let returned: Vec<&str> = result.items.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(returned, texts);
    }

    #[test]
    fn aggregate_of_nothing_is_neutral() {
        let result = pipeline(0.9).aggregate::<&str>(&[]);
        assert!(result.items.is_empty());
        assert!(result.overall_score.abs() < f64::EPSILON);
        assert_eq!(result.overall_label, Sentiment::Neutral);
    }

    #[test]
    fn single_sentinel_text_scores_like_any_text() {
        let pipeline = SentimentPipeline::new(Arc::new(KeywordScorer::default()));
        let sentinel = "Error generating reviews: connection refused";

        let result = pipeline.aggregate(&[sentinel]);

        assert_eq!(result.items.len(), 1);
        assert!((result.overall_score - pipeline.score(sentinel)).abs() < f64::EPSILON);
    }
}
