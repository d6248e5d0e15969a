pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AuthScheme, Credentials};
pub use client::{ApiClient, ApiRequest, ApiResponse};
pub use errors::NetworkError;
