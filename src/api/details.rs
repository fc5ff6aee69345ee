use crate::app::AppState;
use crate::domain::{AggregateResult, ContentKind};

/// Generates the batch for `subject`, scores it and records the view.
pub(crate) async fn scored_batch(
    state: &AppState,
    subject: &str,
    kind: ContentKind,
) -> AggregateResult {
    let texts = state.text_source().generate(subject, kind).await;
    let result = state.sentiment().aggregate(&texts);

    let metrics = state.telemetry().metrics();
    metrics.record_details_view(kind);
    metrics.record_scored_items(&result);
    result
}
