use std::collections::BTreeMap;

use reqwest::Url;
use serde::Serialize;
use thiserror::Error;

/// Field-level validation failures collected from a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("validation failed for {} field(s)", .fields.len())]
pub struct ValidationError {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationError {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`. The first message per field wins.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.fields
    }

    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub(crate) fn check_text(
        &mut self,
        field: &'static str,
        value: &str,
        max_chars: usize,
    ) {
        let len = value.trim().chars().count();
        if len == 0 {
            self.push(field, "is required");
        } else if len > max_chars {
            self.push(field, format!("must be at most {max_chars} characters"));
        }
    }

    pub(crate) fn check_range(&mut self, field: &'static str, value: i32, min: i32, max: i32) {
        if !(min..=max).contains(&value) {
            self.push(field, format!("must be between {min} and {max}"));
        }
    }

    /// Empty links are accepted; anything else must be an absolute http(s) URL.
    pub(crate) fn check_link(&mut self, field: &'static str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => self.push(field, "must be an absolute http(s) URL"),
        }
    }
}
