use crate::network::errors::NetworkError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, warn};

// * Decoded body of a successful call.
// * Json when the body parsed, Text with the raw body when it did not.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    // * Returns the JSON object, or None for raw text and non-object JSON
    pub fn into_object(self) -> Option<Map<String, Value>> {
        match self {
            ApiResponse::Json(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

// * A single outbound call. Built by the callers, executed by ApiClient.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    url: String,
    // * Serialization errors are held until execute so they are logged with the URL
    body: Option<Result<Value, serde_json::Error>>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    // * Replaces the client-wide timeout for this call only
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// * The single choke point for outbound HTTP.
// * Cloning is cheap and every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Client,
}

impl ApiClient {
    // * Builds the pooled client with a default per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        let inner = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NetworkError::Build)?;

        Ok(Self { inner })
    }

    // * Executes the request. Every failure is logged here before it is returned,
    // * callers only decide whether to continue.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, NetworkError> {
        let ApiRequest {
            method,
            url,
            body,
            query,
            mut headers,
            timeout,
        } = request;

        // ! Content-Type is mandatory on every call, caller headers cannot override it
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = self.inner.request(method.clone(), &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            let bytes = body.and_then(|value| serde_json::to_vec(&value)).map_err(|e| {
                let err = NetworkError::from(e);
                error!("Could not serialize request body for {}: {}", url, err);
                err
            })?;
            builder = builder.body(bytes);
        }

        debug!(%method, url = %url, "Sending request");

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = NetworkError::from_transport(&url, e);
                error!("{}", err);
                return Err(err);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Http error calling {}", url);
            error!("Response: {}", body);
            return Err(NetworkError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                let err = NetworkError::from_transport(&url, e);
                error!("{}", err);
                return Err(err);
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(ApiResponse::Json(value)),
            Err(e) => {
                warn!(error = %e, "Error occurred converting response from {} to json", url);
                Ok(ApiResponse::Text(text))
            }
        }
    }
}
