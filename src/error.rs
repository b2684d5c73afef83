use thiserror::Error;

/// Failures that escape the normalized [`ApiResponse`](crate::api::ApiResponse).
///
/// HTTP status errors are never reported through this type; they arrive as
/// `ApiResponse::Error`. Everything here is a transport, decode or local
/// failure that the caller has to catch separately.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The request never produced a response (DNS, connection refused, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response body was not valid JSON for the expected payload
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The path does not match any known view
    #[error("No view for path: {0}")]
    UnknownRoute(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Terminal input/output error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
