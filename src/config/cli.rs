use crate::config::constants::{DEFAULT_OPENAI_MODEL, DEFAULT_PAPERLESS_URL};
use crate::config::settings::parse_bool_flag;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

// * Command-line surface. Every global option can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "doc-titler")]
#[command(about = "Generate document titles from OCR text with a language model")]
#[command(version)]
pub struct Cli {
    /// Set the logging level
    #[arg(
        short = 'l',
        long = "loglevel",
        env = "LOGLEVEL",
        value_enum,
        ignore_case = true,
        default_value = "info"
    )]
    pub loglevel: LogLevel,

    /// Emit logs as JSON lines
    #[arg(long = "log-json")]
    pub log_json: bool,

    /// Run without making any changes
    #[arg(
        long = "dry",
        env = "DRY_RUN",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_dry_flag
    )]
    pub dry: bool,

    /// URL for the paperless instance
    #[arg(long = "paperlessurl", env = "PAPERLESS_URL", default_value = DEFAULT_PAPERLESS_URL)]
    pub paperless_url: String,

    /// API key for the paperless instance
    #[arg(long = "paperlesskey", env = "PAPERLESS_API_KEY", hide_env_values = true)]
    pub paperless_key: Option<String>,

    /// OpenAI model to use
    #[arg(long = "openaimodel", env = "OPENAI_MODEL")]
    pub openai_model: Option<String>,

    // * Older .env files spell the model variable OPENAPI_MODEL
    #[arg(long = "openapimodel", env = "OPENAPI_MODEL", hide = true)]
    pub legacy_openai_model: Option<String>,

    /// OpenAI key to use
    #[arg(long = "openaikey", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_key: Option<String>,

    /// Endpoint for OpenAI compatible API to use when generating titles
    #[arg(long = "openaibaseurl", env = "OPENAI_BASEURL")]
    pub openai_base_url: Option<String>,

    /// System prompt sent with every title request
    #[arg(long = "prompt", env = "OVERRIDE_PROMPT", hide_env_values = true)]
    pub prompt: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run on all documents
    All {
        /// Document ID to skip (repeatable)
        #[arg(long = "exclude")]
        exclude: Vec<i64>,

        /// URL query parameters to filter the document list request by
        #[arg(long = "filterstr")]
        filter: Option<String>,
    },
    /// Run on a single document
    Single {
        #[arg(env = "DOCUMENT_ID")]
        document_id: Option<i64>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Cli {
    // * OPENAI_MODEL wins over the legacy spelling, then the built-in default
    pub fn model(&self) -> &str {
        self.openai_model
            .as_deref()
            .or(self.legacy_openai_model.as_deref())
            .unwrap_or(DEFAULT_OPENAI_MODEL)
    }
}

impl LogLevel {
    // * Directive understood by tracing_subscriber::EnvFilter
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

fn parse_dry_flag(value: &str) -> Result<bool, String> {
    Ok(parse_bool_flag(value))
}
