use std::num::NonZeroUsize;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ContentKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("subject name is empty")]
    EmptySubject,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response envelope: {0}")]
    Envelope(String),
    #[error("response contained no message content")]
    MissingContent,
    #[error("message content is not valid JSON: {0}")]
    MalformedContent(String),
    #[error("no {key} found in AI JSON response")]
    MissingField { key: &'static str },
}

/// Source of generated texts about a subject.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Asks for `count` texts of `kind` about `subject`.
    ///
    /// The returned batch may be shorter or longer than `count` if the
    /// upstream model ignores the requested size.
    async fn generate_batch(
        &self,
        subject: &str,
        kind: ContentKind,
        count: NonZeroUsize,
    ) -> Result<Vec<String>, GenerationError>;
}
