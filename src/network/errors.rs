use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

// * Unified Error type for the Network Layer.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Error connecting to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Timeout calling {url}: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error calling {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Http error calling {url}: HTTP {status}")]
    Status { url: String, status: u16, body: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid header value")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl NetworkError {
    // * Sorts a transport error into the connect/timeout/generic buckets
    pub fn from_transport(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            NetworkError::Timeout { url, source }
        } else if source.is_connect() {
            NetworkError::Connect { url, source }
        } else {
            NetworkError::Request { url, source }
        }
    }

    // * HTTP status for Status errors, None for transport failures
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
