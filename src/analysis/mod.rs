//! Sentiment scorers used by the aggregation pipeline.
mod vader;

pub use vader::VaderScorer;

/// Produces a compound polarity score for a piece of text.
///
/// Implementations must be total: any string, including an empty one, yields a score.
pub trait SentimentScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}
