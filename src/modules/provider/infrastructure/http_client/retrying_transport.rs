//! HTTP transport with bounded retries and exponential backoff
//!
//! Only exchanges that could not complete (connection errors, timeouts) and
//! 5xx responses are retried. Any other response, 4xx included, is handed
//! back to the adapter on the first attempt.

use reqwest::{header, Client, Method, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::retry_policy::RetryPolicy;
use crate::shared::domain::value_objects::ProviderId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("{provider} request failed after {attempts} attempts: {cause}")]
    Exhausted {
        provider: ProviderId,
        attempts: u32,
        cause: String,
    },

    #[error("{provider} request cancelled")]
    Cancelled { provider: ProviderId },

    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

/// A request that can be re-issued on every attempt
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// Executes single HTTP exchanges for one provider under a shared [`RetryPolicy`]
#[derive(Debug, Clone)]
pub struct RetryingTransport {
    client: Client,
    policy: RetryPolicy,
    provider: ProviderId,
}

impl RetryingTransport {
    pub fn new(provider: ProviderId, policy: RetryPolicy, client: Client) -> Self {
        Self {
            client,
            policy,
            provider,
        }
    }

    /// Build a transport with its own client using the given timeout and user agent
    pub fn with_timeout(
        provider: ProviderId,
        policy: RetryPolicy,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let client = create_http_client(timeout, user_agent)?;
        Ok(Self::new(provider, policy, client))
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Perform the request, retrying retryable failures until the policy is exhausted.
    ///
    /// Cancellation is observed while waiting on the network and during backoff.
    pub async fn execute(
        &self,
        request: &HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<Response, TransportError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_cause = String::from("no attempt made");

        for attempt in 0..max_attempts {
            if cancel.is_cancelled() {
                return Err(self.cancelled());
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.cancelled()),
                outcome = self.send(request) => outcome,
            };

            let cause = match outcome {
                Ok(response) if response.status().is_server_error() => {
                    format!("server returned {}", response.status())
                }
                Ok(response) => {
                    if attempt > 0 {
                        debug!(
                            "{} {} succeeded on attempt {}",
                            self.provider,
                            request.url,
                            attempt + 1
                        );
                    }
                    return Ok(response);
                }
                Err(e) => format!("request failed: {}", e),
            };

            if attempt + 1 < max_attempts {
                let delay = self.policy.delay_after(attempt);
                warn!(
                    "{} attempt {}/{} failed ({}), retrying in {:?}",
                    self.provider,
                    attempt + 1,
                    max_attempts,
                    cause,
                    delay
                );
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(self.cancelled()),
                    _ = sleep(delay) => {}
                }
            } else {
                warn!(
                    "{} attempt {}/{} failed ({}), giving up",
                    self.provider,
                    attempt + 1,
                    max_attempts,
                    cause
                );
            }
            last_cause = cause;
        }

        Err(TransportError::Exhausted {
            provider: self.provider,
            attempts: max_attempts,
            cause: last_cause,
        })
    }

    async fn send(&self, request: &HttpRequest) -> Result<Response, reqwest::Error> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(header::ACCEPT, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder.send().await
    }

    fn cancelled(&self) -> TransportError {
        debug!("{} request cancelled by caller", self.provider);
        TransportError::Cancelled {
            provider: self.provider,
        }
    }
}

/// Create an HTTP client with consistent configuration
pub fn create_http_client(timeout: Duration, user_agent: &str) -> Result<Client, TransportError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| TransportError::Build(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let get = HttpRequest::get("https://api.jikan.moe/v4/anime/1");
        assert_eq!(get.method, Method::GET);
        assert!(get.body.is_none());

        let post = HttpRequest::post_json("https://graphql.anilist.co", serde_json::json!({"a": 1}));
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body, Some(serde_json::json!({"a": 1})));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_attempt() {
        let transport = RetryingTransport::new(
            ProviderId::Jikan,
            RetryPolicy::standard(),
            Client::new(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = transport
            .execute(&HttpRequest::get("http://127.0.0.1:9/anime/1"), &cancel)
            .await;
        assert_eq!(
            result.unwrap_err(),
            TransportError::Cancelled {
                provider: ProviderId::Jikan
            }
        );
    }

    #[tokio::test]
    async fn test_connection_failures_exhaust_policy() {
        let transport = RetryingTransport::with_timeout(
            ProviderId::Kitsu,
            RetryPolicy::immediate(2),
            Duration::from_secs(2),
            "animerec-test",
        )
        .unwrap();

        // Port 9 (discard) is not listening on loopback
        let result = transport
            .execute(
                &HttpRequest::get("http://127.0.0.1:9/anime"),
                &CancellationToken::new(),
            )
            .await;

        match result {
            Err(TransportError::Exhausted {
                provider, attempts, ..
            }) => {
                assert_eq!(provider, ProviderId::Kitsu);
                assert_eq!(attempts, 2);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }
}
