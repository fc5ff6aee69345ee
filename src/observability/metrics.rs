/// Prometheus metric definitions.
use std::sync::Arc;
use std::time::Duration;

use prometheus::{
    CounterVec, HistogramVec, Registry, register_counter_vec_with_registry,
    register_histogram_vec_with_registry,
};

use crate::domain::{AggregateResult, ContentKind};

const GENERATION_BUCKETS: &[f64] = &[0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 15.0, 30.0, 60.0];

#[derive(Debug, Clone)]
pub struct Metrics {
    pub details_views: CounterVec,
    pub generation_failures: CounterVec,
    pub generation_duration: HistogramVec,
    pub scored_items: CounterVec,
}

impl Metrics {
    /// Registers every collector on `registry`.
    ///
    /// # Errors
    /// Fails when a metric with the same name is already registered.
    pub fn new(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            details_views: register_counter_vec_with_registry!(
                "cinecatalog_details_views_total",
                "Details views rendered, by content kind",
                &["kind"],
                registry
            )?,
            generation_failures: register_counter_vec_with_registry!(
                "cinecatalog_text_generation_failures_total",
                "Text generation calls that fell back to the error line",
                &["kind"],
                registry
            )?,
            generation_duration: register_histogram_vec_with_registry!(
                "cinecatalog_text_generation_duration_seconds",
                "Latency of text generation calls",
                &["kind"],
                GENERATION_BUCKETS.to_vec(),
                registry
            )?,
            scored_items: register_counter_vec_with_registry!(
                "cinecatalog_scored_items_total",
                "Scored texts, by sentiment label",
                &["label"],
                registry
            )?,
        })
    }

    pub fn observe_generation(&self, kind: ContentKind, elapsed: Duration, succeeded: bool) {
        self.generation_duration
            .with_label_values(&[kind.as_str()])
            .observe(elapsed.as_secs_f64());
        if !succeeded {
            self.generation_failures
                .with_label_values(&[kind.as_str()])
                .inc();
        }
    }

    pub fn record_details_view(&self, kind: ContentKind) {
        self.details_views.with_label_values(&[kind.as_str()]).inc();
    }

    pub fn record_scored_items(&self, result: &AggregateResult) {
        for item in &result.items {
            self.scored_items
                .with_label_values(&[item.label.as_str()])
                .inc();
        }
    }
}
