//! Chat-completions client for an Azure OpenAI deployment.
mod models;
mod prompt;

use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::clients::{GenerationError, TextGenerator};
use crate::domain::ContentKind;

use self::models::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat, extract_batch,
    truncate_error_body,
};

/// Connection and sampling settings for the text generation deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerationConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    completions_url: Url,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl AzureOpenAiClient {
    /// Builds the client, rejecting incomplete configuration up front.
    ///
    /// # Errors
    /// Returns an error when the endpoint, key or deployment is blank, the
    /// endpoint is not an absolute URL, or the HTTP client cannot be built.
    pub fn new(config: TextGenerationConfig) -> Result<Self> {
        ensure!(
            !config.api_key.trim().is_empty(),
            "text generation API key is empty"
        );
        ensure!(
            !config.deployment.trim().is_empty(),
            "text generation deployment name is empty"
        );
        ensure!(
            !config.api_version.trim().is_empty(),
            "text generation API version is empty"
        );

        let completions_url = completions_url(&config)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build text generation client")?;

        Ok(Self {
            client,
            completions_url,
            api_key: config.api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn completions_url(&self) -> &Url {
        &self.completions_url
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat::json_object(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.completions_url.clone())
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|error| GenerationError::Transport(error.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let envelope: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|error| GenerationError::Envelope(error.without_url().to_string()))?;

        envelope.into_content().ok_or(GenerationError::MissingContent)
    }
}

#[async_trait]
impl TextGenerator for AzureOpenAiClient {
    async fn generate_batch(
        &self,
        subject: &str,
        kind: ContentKind,
        count: NonZeroUsize,
    ) -> Result<Vec<String>, GenerationError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(GenerationError::EmptySubject);
        }

        let prompt = prompt::build(subject, kind, count);
        debug!(subject, %kind, count = count.get(), "requesting text batch");

        let content = self.complete(&prompt.system, &prompt.user).await?;
        extract_batch(&content, kind)
    }
}

fn completions_url(config: &TextGenerationConfig) -> Result<Url> {
    let endpoint = config.endpoint.trim();
    ensure!(!endpoint.is_empty(), "text generation endpoint is empty");

    let mut base = Url::parse(endpoint)
        .with_context(|| format!("invalid text generation endpoint: {endpoint}"))?;
    ensure!(
        matches!(base.scheme(), "http" | "https"),
        "text generation endpoint must use http or https"
    );
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base
        .join(&format!(
            "openai/deployments/{}/chat/completions",
            config.deployment.trim()
        ))
        .context("failed to build chat completions URL")?;
    url.query_pairs_mut()
        .append_pair("api-version", config.api_version.trim());
    Ok(url)
}
