//! Recording gateway for repository tests.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::gateway::Gateway;

/// A request seen by [`FakeGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub access_token: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
enum Canned {
    Json(String),
    Status(u16),
}

/// Gateway answering from canned responses keyed by method and URL.
///
/// Unregistered reads answer 404; unregistered writes succeed.
#[derive(Debug, Default)]
pub struct FakeGateway {
    responses: HashMap<(&'static str, String), Canned>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_get(mut self, url: &str, json: impl Into<String>) -> Self {
        self.responses.insert(("GET", url.to_string()), Canned::Json(json.into()));
        self
    }

    #[must_use]
    pub fn on_put(mut self, url: &str, json: impl Into<String>) -> Self {
        self.responses.insert(("PUT", url.to_string()), Canned::Json(json.into()));
        self
    }

    #[must_use]
    pub fn fail_get(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(("GET", url.to_string()), Canned::Status(status));
        self
    }

    #[must_use]
    pub fn fail_put(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(("PUT", url.to_string()), Canned::Status(status));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.method == method).count()
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        access_token: &str,
        body: Option<String>,
    ) -> Option<Canned> {
        self.requests.lock().push(RecordedRequest {
            method,
            url: url.to_string(),
            access_token: access_token.to_string(),
            body,
        });
        self.responses.get(&(method, url.to_string())).cloned()
    }

    fn decode<T: DeserializeOwned>(canned: Option<Canned>) -> ApiResult<T> {
        match canned {
            Some(Canned::Json(json)) => serde_json::from_str(&json).map_err(ApiError::from),
            Some(Canned::Status(status)) => Err(status_error(status)),
            None => Err(status_error(404)),
        }
    }

    fn acknowledge(canned: Option<Canned>) -> ApiResult<()> {
        match canned {
            Some(Canned::Status(status)) => Err(status_error(status)),
            _ => Ok(()),
        }
    }
}

fn status_error(status: u16) -> ApiError {
    ApiError::Http {
        status,
        error_code: "CF-Fake".to_string(),
        description: format!("canned status {status}"),
    }
}

impl Gateway for FakeGateway {
    async fn get_resource<T>(&self, url: &str, access_token: &str) -> ApiResult<T>
    where
        T: DeserializeOwned + Send,
    {
        Self::decode(self.record("GET", url, access_token, None))
    }

    async fn create_resource(&self, url: &str, access_token: &str, body: String) -> ApiResult<()> {
        Self::acknowledge(self.record("POST", url, access_token, Some(body)))
    }

    async fn update_resource(&self, url: &str, access_token: &str, body: String) -> ApiResult<()> {
        Self::acknowledge(self.record("PUT", url, access_token, Some(body)))
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
        Self::decode(self.record("PUT", url, access_token, Some(body)))
    }

    async fn delete_resource(&self, url: &str, access_token: &str) -> ApiResult<()> {
        Self::acknowledge(self.record("DELETE", url, access_token, None))
    }
}
