use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::clients::TextGenerator;
use crate::domain::ContentKind;
use crate::observability::metrics::Metrics;

/// How many texts to request per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSizes {
    pub reviews: NonZeroUsize,
    pub tweets: NonZeroUsize,
}

impl BatchSizes {
    #[must_use]
    pub fn for_kind(&self, kind: ContentKind) -> NonZeroUsize {
        match kind {
            ContentKind::Review => self.reviews,
            ContentKind::Tweet => self.tweets,
        }
    }
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self {
            reviews: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
            tweets: NonZeroUsize::new(20).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

/// Boundary between the fallible generator and the total sentiment pipeline.
///
/// `generate` never fails: a generator error becomes a one-element batch
/// holding a readable `"Error generating <kind>s: ..."` line.
#[derive(Clone)]
pub struct TextSource {
    generator: Arc<dyn TextGenerator>,
    batch_sizes: BatchSizes,
    metrics: Option<Arc<Metrics>>,
}

impl TextSource {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, batch_sizes: BatchSizes) -> Self {
        Self {
            generator,
            batch_sizes,
            metrics: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn batch_sizes(&self) -> BatchSizes {
        self.batch_sizes
    }

    pub async fn generate(&self, subject: &str, kind: ContentKind) -> Vec<String> {
        let count = self.batch_sizes.for_kind(kind);
        let started = Instant::now();
        let outcome = self.generator.generate_batch(subject, kind, count).await;

        if let Some(metrics) = &self.metrics {
            metrics.observe_generation(kind, started.elapsed(), outcome.is_ok());
        }

        match outcome {
            Ok(texts) => {
                debug!(subject, %kind, received = texts.len(), "generated text batch");
                texts
            }
            Err(error) => {
                warn!(subject, %kind, %error, "text generation failed, using sentinel batch");
                vec![sentinel_text(kind, &error)]
            }
        }
    }
}

/// The single line shown in place of a batch when generation fails.
#[must_use]
pub fn sentinel_text(kind: ContentKind, error: &dyn std::fmt::Display) -> String {
    format!("Error generating {}: {error}", kind.plural())
}
