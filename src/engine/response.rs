use serde_json::Value;
use thiserror::Error;

/// Title and reasoning extracted from a model answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSuggestion {
    pub title: String,
    /// Empty when the model gave none.
    pub explanation: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Response has no title field")]
    MissingTitle,

    #[error("Response title is empty")]
    EmptyTitle,
}

/// Parses the raw model answer `{"title": "...", "explanation": "..."}`.
pub fn parse_title_response(raw: &str) -> Result<TitleSuggestion, ParseError> {
    let data: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let title = data
        .get("title")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingTitle)?;

    if title.trim().is_empty() {
        return Err(ParseError::EmptyTitle);
    }

    let explanation = data
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(TitleSuggestion {
        title: title.to_string(),
        explanation: explanation.to_string(),
    })
}
