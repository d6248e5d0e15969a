use crate::config::cli::Cli;
use crate::config::constants::{
    COMPLETION_TIMEOUT_SECS, DEFAULT_OPENAI_BASE_URL, DEFAULT_PROMPT, REQUEST_TIMEOUT_SECS,
};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required argument: {0}")]
    Missing(&'static str),
}

/// Run configuration, built once at startup and passed down by reference.
#[derive(Clone)]
pub struct Settings {
    pub paperless_url: String,
    pub paperless_api_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    /// Override for OpenAI-compatible endpoints; None means the public API.
    pub openai_base_url: Option<String>,
    pub prompt: String,
    pub dry_run: bool,
    /// Document service requests.
    pub timeout: Duration,
    /// Completion requests.
    pub completion_timeout: Duration,
}

impl Settings {
    /// Collects the global options. Missing credentials stay empty until [`Settings::validate`].
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            paperless_url: cli.paperless_url.trim().to_string(),
            paperless_api_key: cli.paperless_key.clone().unwrap_or_default(),
            openai_api_key: cli.openai_key.clone().unwrap_or_default(),
            openai_model: cli.model().trim().to_string(),
            openai_base_url: cli
                .openai_base_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            prompt: cli
                .prompt
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            dry_run: cli.dry,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            completion_timeout: Duration::from_secs(COMPLETION_TIMEOUT_SECS),
        }
    }

    /// Fails on the first empty required value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("PAPERLESS_API_KEY", &self.paperless_api_key),
            ("PAPERLESS_URL", &self.paperless_url),
            ("OPENAI_API_KEY", &self.openai_api_key),
            ("OPENAI_MODEL", &self.openai_model),
            ("PROMPT", &self.prompt),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Missing(name));
            }
        }

        Ok(())
    }

    pub fn completion_base_url(&self) -> &str {
        self.openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("paperless_url", &self.paperless_url)
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("dry_run", &self.dry_run)
            .field("timeout", &self.timeout)
            .field("completion_timeout", &self.completion_timeout)
            .finish_non_exhaustive()
    }
}

/// Parses the common truthy spellings; anything else is false.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "y" | "yes" | "on" | "1" | "true" | "t"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings() -> Settings {
        Settings {
            paperless_url: "http://localhost:8000".to_string(),
            paperless_api_key: "pk".to_string(),
            openai_api_key: "ok".to_string(),
            openai_model: "gpt-4-turbo".to_string(),
            openai_base_url: None,
            prompt: DEFAULT_PROMPT.to_string(),
            dry_run: false,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            completion_timeout: Duration::from_secs(COMPLETION_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_parse_bool_flag_truthy() {
        for value in ["y", "YES", "On", "1", "true", "T", " yes "] {
            assert!(parse_bool_flag(value), "{} should be truthy", value);
        }
    }

    #[test]
    fn test_parse_bool_flag_falsy() {
        for value in ["n", "no", "off", "0", "false", "", "maybe"] {
            assert!(!parse_bool_flag(value), "{} should be falsy", value);
        }
    }

    #[test]
    fn test_validate_accepts_complete_settings() {
        assert_eq!(settings().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_missing_keys() {
        let mut s = settings();
        s.paperless_api_key.clear();
        assert_eq!(s.validate(), Err(ConfigError::Missing("PAPERLESS_API_KEY")));

        let mut s = settings();
        s.openai_api_key = "   ".to_string();
        assert_eq!(s.validate(), Err(ConfigError::Missing("OPENAI_API_KEY")));
    }

    #[test]
    fn test_completion_base_url_default_and_override() {
        let mut s = settings();
        assert_eq!(s.completion_base_url(), DEFAULT_OPENAI_BASE_URL);

        s.openai_base_url = Some("http://llm.local/v1".to_string());
        assert_eq!(s.completion_base_url(), "http://llm.local/v1");
    }

    #[test]
    fn test_from_cli_applies_overrides() {
        let cli = Cli::try_parse_from([
            "doc-titler",
            "--paperlessurl",
            "http://paperless:8000",
            "--paperlesskey",
            "pk",
            "--openaikey",
            "ok",
            "--openaimodel",
            "llama3",
            "--openaibaseurl",
            "http://ollama:11434/v1",
            "--prompt",
            "Custom prompt",
            "--dry",
            "all",
        ])
        .unwrap();

        let s = Settings::from_cli(&cli);
        assert_eq!(s.paperless_url, "http://paperless:8000");
        assert_eq!(s.openai_model, "llama3");
        assert_eq!(s.completion_base_url(), "http://ollama:11434/v1");
        assert_eq!(s.prompt, "Custom prompt");
        assert!(s.dry_run);
        assert_eq!(s.timeout, Duration::from_secs(10));
        assert!(s.completion_timeout > s.timeout);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("pk"));
        assert!(rendered.contains("gpt-4-turbo"));
    }
}
