// * Title generation against an OpenAI-compatible chat completion endpoint
// * One attempt per document, no retry

use crate::config::constants::COMPLETION_TIMEOUT_SECS;
use crate::engine::prompt::{build_messages, ChatMessage};
use crate::network::{ApiClient, ApiRequest, ApiResponse, Credentials, NetworkError};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Completion response has no message content")]
    MissingContent,

    #[error("Completion endpoint returned a non-JSON body")]
    UnexpectedBody,
}

pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;

/// Produces the raw model answer for a document's OCR text.
pub trait TitleGenerator: Send + Sync {
    fn generate_title<'a>(&'a self, content: &'a str) -> GenerationFuture<'a>;
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

// * Pulls choices[0].message.content out of a completion payload
fn first_choice_content(value: serde_json::Value) -> Option<String> {
    let response: CompletionResponse = serde_json::from_value(value).ok()?;
    response
        .choices
        .into_iter()
        .next()?
        .message?
        .content
}

/// Chat-completion client for OpenAI and API-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiTitleGenerator {
    api: ApiClient,
    credentials: Credentials,
    base_url: String,
    model: String,
    prompt: String,
    timeout: Duration,
}

impl OpenAiTitleGenerator {
    pub fn new(
        api: ApiClient,
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            api,
            credentials: Credentials::bearer(api_key)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            prompt: prompt.into(),
            timeout: Duration::from_secs(COMPLETION_TIMEOUT_SECS),
        })
    }

    // * Completion calls run on their own timeout, not the shared client's
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
        })
    }

    // * Date is injected so the message layout stays testable
    pub async fn generate_for_date(
        &self,
        content: &str,
        date: NaiveDate,
    ) -> Result<String, GenerationError> {
        let messages = build_messages(&self.prompt, content, &self.model, date);
        debug!(
            model = %self.model,
            user_chars = messages[1].content.chars().count(),
            "Requesting title"
        );

        let request = ApiRequest::post(self.completions_url())
            .timeout(self.timeout)
            .header(
                reqwest::header::AUTHORIZATION,
                self.credentials.header_value(),
            )
            .json(&self.request_body(&messages));

        match self.api.execute(request).await? {
            ApiResponse::Json(value) => {
                first_choice_content(value).ok_or(GenerationError::MissingContent)
            }
            ApiResponse::Text(_) => Err(GenerationError::UnexpectedBody),
        }
    }
}

impl TitleGenerator for OpenAiTitleGenerator {
    fn generate_title<'a>(&'a self, content: &'a str) -> GenerationFuture<'a> {
        Box::pin(self.generate_for_date(content, Local::now().date_naive()))
    }
}
