//! Authenticated HTTP transport.
//!
//! The [`Gateway`] trait is the seam between the repositories and the
//! network. [`HttpGateway`] is the reqwest-backed implementation; tests
//! substitute a recording fake.
//!
//! # Example
//!
//! ```rust,no_run
//! use cfctl_api::gateway::{Gateway, HttpGateway};
//!
//! # async fn example() -> Result<(), cfctl_api::ApiError> {
//! let gateway = HttpGateway::new()?;
//! let info: serde_json::Value = gateway
//!     .get_resource("https://api.example.com/v2/info", "bearer token")
//!     .await?;
//! println!("{info}");
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::error::{ApiError, ApiResult};

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Performs authenticated requests against the API.
///
/// Every method takes a full URL and the access token to present. Failures
/// are reported as [`ApiError`]; nothing is retried.
pub trait Gateway: Send + Sync {
    /// `GET` the URL and decode the JSON body into `T`.
    fn get_resource<T>(
        &self,
        url: &str,
        access_token: &str,
    ) -> impl Future<Output = ApiResult<T>> + Send
    where
        T: DeserializeOwned + Send;

    /// `POST` a JSON body.
    fn create_resource(
        &self,
        url: &str,
        access_token: &str,
        body: String,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    /// `PUT` a JSON body.
    fn update_resource(
        &self,
        url: &str,
        access_token: &str,
        body: String,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    /// `PUT` a JSON body and decode the response body into `T`.
    fn update_resource_for_response<T>(
        &self,
        url: &str,
        access_token: &str,
        body: String,
    ) -> impl Future<Output = ApiResult<T>> + Send
    where
        T: DeserializeOwned + Send;

    /// `DELETE` the URL.
    fn delete_resource(
        &self,
        url: &str,
        access_token: &str,
    ) -> impl Future<Output = ApiResult<()>> + Send;
}

/// reqwest-backed gateway.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway with the default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new() -> ApiResult<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a gateway with custom timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn with_timeouts(connect_timeout: Duration, request_timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(concat!("cfctl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        access_token: &str,
        body: Option<String>,
    ) -> ApiResult<Response> {
        debug!(%method, url, "Sending request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, access_token)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            trace!(%method, url, body = %body, "Request body");
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            trace!(%method, url, status = status.as_u16(), "Received response");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        debug!(%method, url, status = status.as_u16(), "Request failed");
        Err(http_error(status, &text))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::from)
    }
}

impl Gateway for HttpGateway {
    async fn get_resource<T>(&self, url: &str, access_token: &str) -> ApiResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let response = self.send(Method::GET, url, access_token, None).await?;
        Self::decode(response).await
    }

    async fn create_resource(&self, url: &str, access_token: &str, body: String) -> ApiResult<()> {
        self.send(Method::POST, url, access_token, Some(body)).await?;
        Ok(())
    }

    async fn update_resource(&self, url: &str, access_token: &str, body: String) -> ApiResult<()> {
        self.send(Method::PUT, url, access_token, Some(body)).await?;
        Ok(())
    }

    async fn update_resource_for_response<T>(
        &self,
        url: &str,
        access_token: &str,
        body: String,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let response = self.send(Method::PUT, url, access_token, Some(body)).await?;
        Self::decode(response).await
    }

    async fn delete_resource(&self, url: &str, access_token: &str) -> ApiResult<()> {
        self.send(Method::DELETE, url, access_token, None).await?;
        Ok(())
    }
}

/// Error body returned by the cloud controller.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: String,
    #[serde(default)]
    error_code: String,
}

fn http_error(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let description = if !parsed.description.is_empty() {
        parsed.description
    } else if !body.trim().is_empty() && parsed.error_code.is_empty() {
        body.trim().to_string()
    } else {
        status.canonical_reason().unwrap_or("request failed").to_string()
    };

    ApiError::Http {
        status: status.as_u16(),
        error_code: parsed.error_code,
        description,
    }
}
