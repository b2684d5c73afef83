//! Typed JSON client for the recipes API.
//!
//! Every call resolves in one of three ways:
//! - `Ok(ApiResponse::Success)` for a 2xx status with a decodable body,
//! - `Ok(ApiResponse::Error)` for any other status, carrying the status text,
//! - `Err(ViewerError)` when the request could not be made or the body was not
//!   valid JSON for the expected type.
//!
//! Callers have to handle both the error variant and the `Err` case.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{ViewerConfig, DEFAULT_BASE_URL};
use crate::error::ViewerError;
use crate::model::{Recipe, RecipeList};

/// Methods the client is allowed to issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Normalized outcome of a request that reached the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    /// Create a client from the loaded configuration
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_base_url(&config.base_url)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one request against `{base_url}/{path}`.
    ///
    /// `Content-Type: application/json` is always sent. The body, when given,
    /// is serialized to a JSON string; otherwise the request has no body.
    /// The response body is only read for 2xx statuses.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Map<String, Value>>,
    ) -> Result<ApiResponse<T>, ViewerError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("{:?} {}", method, url);

        let mut request = self
            .client
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            let encoded = serde_json::to_string(body).map_err(ViewerError::Encode)?;
            request = request.body(encoded);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("{} answered {}", url, status);
            return Ok(ApiResponse::Error {
                message: status_text(&response),
            });
        }

        let bytes = response.bytes().await?;
        let data = serde_json::from_slice(&bytes).map_err(ViewerError::Decode)?;
        Ok(ApiResponse::Success { data })
    }
}

/// Reason phrase exactly as the server sent it.
///
/// hyper only records the phrase when it differs from the canonical one, so a
/// missing extension means the canonical phrase was on the wire. An empty
/// phrase stays empty.
fn status_text(response: &Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Where the views get their recipes from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch the whole catalogue in one call
    async fn list_recipes(&self) -> Result<ApiResponse<RecipeList>, ViewerError>;

    /// Fetch one recipe by the identifier taken from the route
    async fn recipe(&self, id: &str) -> Result<ApiResponse<Recipe>, ViewerError>;
}

#[async_trait]
impl RecipeSource for ApiClient {
    async fn list_recipes(&self) -> Result<ApiResponse<RecipeList>, ViewerError> {
        self.request("recipes", HttpMethod::Get, None).await
    }

    async fn recipe(&self, id: &str) -> Result<ApiResponse<Recipe>, ViewerError> {
        self.request(&format!("recipes/{id}"), HttpMethod::Get, None)
            .await
    }
}
