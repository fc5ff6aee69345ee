//! Per-request details pipeline: fetch a text batch, then score it.
pub mod sentiment;
pub mod text_source;

pub use sentiment::SentimentPipeline;
pub use text_source::{BatchSizes, TextSource};
