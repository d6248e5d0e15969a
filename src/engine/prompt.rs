// * Prompt assembly for title generation
// * Date stamp + whitespace-collapsed OCR text, capped by the model's character budget

use crate::config::constants::{
    DATE_STAMP_FORMAT, DEFAULT_CHARACTER_LIMIT, HIGH_CAPACITY_MODEL_MARKER, LARGE_CHARACTER_LIMIT,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// * Maximum OCR characters forwarded for the given model
pub fn character_limit(model: &str) -> usize {
    if model.contains(HIGH_CAPACITY_MODEL_MARKER) {
        LARGE_CHARACTER_LIMIT
    } else {
        DEFAULT_CHARACTER_LIMIT
    }
}

// * Collapses every whitespace run to one space, then keeps at most `limit` characters.
// * Counts chars, never bytes, so multi-byte OCR text is never split mid-character.
pub fn normalize_content(content: &str, limit: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.char_indices().nth(limit) {
        Some((cut, _)) => collapsed[..cut].trim_end().to_string(),
        None => collapsed,
    }
}

pub fn date_stamp(date: NaiveDate) -> String {
    date.format(DATE_STAMP_FORMAT).to_string()
}

// * System prompt first, then the user message: date stamp immediately followed by the text
pub fn build_messages(
    prompt: &str,
    content: &str,
    model: &str,
    date: NaiveDate,
) -> Vec<ChatMessage> {
    let limit = character_limit(model);
    let user = format!("{}{}", date_stamp(date), normalize_content(content, limit));

    vec![ChatMessage::system(prompt), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_character_limit_by_model() {
        assert_eq!(character_limit("gpt-4-turbo"), LARGE_CHARACTER_LIMIT);
        assert_eq!(character_limit("gpt-4o-mini"), LARGE_CHARACTER_LIMIT);
        assert_eq!(character_limit("ft:gpt-4-0613:acme"), LARGE_CHARACTER_LIMIT);
        assert_eq!(character_limit("gpt-3.5-turbo"), DEFAULT_CHARACTER_LIMIT);
        assert_eq!(character_limit("llama3"), DEFAULT_CHARACTER_LIMIT);
        assert_eq!(character_limit(""), DEFAULT_CHARACTER_LIMIT);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        let text = "Invoice\n\nTotal:   $500\t\n2023 Tax Form  ";
        assert_eq!(normalize_content(text, 1000), "Invoice Total: $500 2023 Tax Form");
    }

    #[test]
    fn test_normalize_truncates_to_limit() {
        assert_eq!(normalize_content("abcdef ghij", 4), "abcd");
        assert_eq!(normalize_content("abc def", 4), "abc");
        assert_eq!(normalize_content("abc", 3), "abc");
        assert_eq!(normalize_content("", 10), "");
    }

    #[test]
    fn test_normalize_never_exceeds_limit() {
        let text = "lorem  ipsum\n\ndolor sit amet ".repeat(500);
        for limit in [0, 1, 5, 17, 100, 4096] {
            let out = normalize_content(&text, limit);
            assert!(out.chars().count() <= limit, "limit {} produced {}", limit, out.len());
        }
    }

    #[test]
    fn test_normalize_counts_characters_not_bytes() {
        let out = normalize_content("Größe Übersicht", 5);
        assert_eq!(out, "Größe");
    }

    #[test]
    fn test_date_stamp_format() {
        assert_eq!(date_stamp(date()), "03/07/2024");
    }

    #[test]
    fn test_build_messages_layout() {
        let messages = build_messages("PROMPT", "Invoice\n\nTotal: $500", "gpt-4-turbo", date());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::system("PROMPT"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "03/07/2024Invoice Total: $500");
    }

    #[test]
    fn test_build_messages_respects_model_budget() {
        let content = "x".repeat(LARGE_CHARACTER_LIMIT + 10);

        let small = build_messages("p", &content, "gpt-3.5-turbo", date());
        assert_eq!(small[1].content.chars().count(), 10 + DEFAULT_CHARACTER_LIMIT);

        let large = build_messages("p", &content, "gpt-4", date());
        assert_eq!(large[1].content.chars().count(), 10 + LARGE_CHARACTER_LIMIT);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("x")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "x"}));
    }
}
