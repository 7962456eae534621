//! HTTP backend abstraction for the update endpoints.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest and makes exactly one attempt per call.

use crate::config::UpdateClientConfig;
use crate::error::{HttpError, HttpResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that exchange JSON with the update backend.
///
/// This is an implementation detail - external code should use the
/// `UpdateApiPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T>;

    /// POST to a URL without a body and deserialize the JSON reply.
    async fn post_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// A response body that decodes as the expected JSON is returned whatever
/// the status code. Only when decoding fails does a non-2xx status become
/// an error.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &UpdateClientConfig) -> HttpResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn decode<T: DeserializeOwned + Send>(
        response: reqwest::Response,
        url: &Url,
    ) -> HttpResult<T> {
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(data) => {
                if !status.is_success() {
                    debug!(
                        status = status.as_u16(),
                        url = %url,
                        "Using JSON body of error response"
                    );
                }
                Ok(data)
            }
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(HttpError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
        let response = self.client.get(url.as_str()).send().await?;
        Self::decode(response, url).await
    }

    async fn post_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
        let response = self.client.post(url.as_str()).send().await?;
        Self::decode(response, url).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// A fake HTTP backend that returns canned JSON and records requests.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, serde_json::Value)>,
        requests: Mutex<Vec<(&'static str, String)>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for URLs containing `url_contains`.
        pub fn with_response(mut self, url_contains: &str, json: serde_json::Value) -> Self {
            self.responses.push((url_contains.to_string(), json));
            self
        }

        /// Requests seen so far, as `(method, url)` pairs.
        pub fn requests(&self) -> Vec<(&'static str, String)> {
            self.requests.lock().unwrap().clone()
        }

        fn respond<T: DeserializeOwned>(&self, method: &'static str, url: &Url) -> HttpResult<T> {
            self.requests
                .lock()
                .unwrap()
                .push((method, url.to_string()));
            let json = self
                .responses
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, json)| json.clone())
                .ok_or_else(|| HttpError::ApiRequestFailed {
                    status: 404,
                    url: url.to_string(),
                })?;
            serde_json::from_value(json).map_err(Into::into)
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
            self.respond("GET", url)
        }

        async fn post_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HttpResult<T> {
            self.respond("POST", url)
        }
    }
}
