use crate::network::errors::NetworkError;
use reqwest::header::HeaderValue;

// * Authorization scheme expected by each upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    // * Document service: "Token {key}"
    Token,
    // * Completion endpoint: "Bearer {key}"
    Bearer,
}

// * Credentials for one upstream, rendered once into a sensitive header value.
#[derive(Clone)]
pub struct Credentials {
    scheme: AuthScheme,
    value: HeaderValue,
}

impl Credentials {
    pub fn new(scheme: AuthScheme, api_key: &str) -> Result<Self, NetworkError> {
        let prefix = match scheme {
            AuthScheme::Token => "Token",
            AuthScheme::Bearer => "Bearer",
        };
        let mut value = HeaderValue::from_str(&format!("{} {}", prefix, api_key))?;
        value.set_sensitive(true);

        Ok(Self { scheme, value })
    }

    pub fn token(api_key: &str) -> Result<Self, NetworkError> {
        Self::new(AuthScheme::Token, api_key)
    }

    pub fn bearer(api_key: &str) -> Result<Self, NetworkError> {
        Self::new(AuthScheme::Bearer, api_key)
    }

    pub fn header_value(&self) -> HeaderValue {
        self.value.clone()
    }
}

// ! Keeps API keys out of Debug output and therefore out of the logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("scheme", &self.scheme)
            .field("value", &"<redacted>")
            .finish()
    }
}
