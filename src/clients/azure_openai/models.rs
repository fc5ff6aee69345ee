use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::GenerationError;
use crate::domain::ContentKind;

const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub(crate) messages: [ChatMessage<'a>; 2],
    pub(crate) response_format: ResponseFormat,
    pub(crate) max_tokens: u32,
    pub(crate) temperature: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub(crate) role: &'static str,
    pub(crate) content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
}

impl ResponseFormat {
    pub(crate) fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub(crate) choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub(crate) message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub(crate) content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the model produced any.
    pub(crate) fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

/// Pulls the string array under the kind's key out of the model's JSON reply.
pub(crate) fn extract_batch(content: &str, kind: ContentKind) -> Result<Vec<String>, GenerationError> {
    let key = kind.plural();
    let parsed: Value = serde_json::from_str(content)
        .map_err(|error| GenerationError::MalformedContent(error.to_string()))?;

    let items = parsed
        .get(key)
        .and_then(Value::as_array)
        .ok_or(GenerationError::MissingField { key })?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or(GenerationError::MissingField { key })
        })
        .collect()
}

pub(crate) fn truncate_error_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}
