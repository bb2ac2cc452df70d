//! Retry wrapper for LLM providers.
//!
//! Every configured provider is wrapped separately, so an outage at one
//! provider never delays requests routed to another. Provider adapters
//! report HTTP failures as `"{status}: {body}"`; the status decides whether
//! a failure is worth another attempt.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// Backoff schedule for one wrapped provider.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts after the first one. Zero disables retrying.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Fraction of the delay (0.0 to 1.0) added or removed at random.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based), without jitter.
    fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    fn delay_for(&self, retry: u32) -> Duration {
        let delay = self.backoff(retry);
        if self.jitter <= 0.0 {
            return delay;
        }
        let spread = rand::thread_rng().gen_range(-self.jitter..=self.jitter);
        delay.mul_f64((1.0 + spread).max(0.0))
    }
}

/// HTTP status at the front of a provider error, if there is one.
fn status_of(message: &str) -> Option<u16> {
    let (code, _) = message.split_once(':')?;
    code.trim().parse().ok()
}

/// Client errors are final, except timeouts and rate limits. Transport
/// failures and unreadable bodies are retried.
fn is_transient(error: &LlmError) -> bool {
    match error {
        LlmError::RequestFailed(message) => match status_of(message) {
            Some(408 | 429) => true,
            Some(status) => !(400..500).contains(&status),
            None => true,
        },
        LlmError::InvalidResponse(_) => true,
    }
}

pub struct ResilientLlmClient {
    inner: Arc<dyn LlmPort>,
    policy: RetryPolicy,
}

impl ResilientLlmClient {
    pub fn new(inner: Arc<dyn LlmPort>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Default backoff with a caller-chosen retry count.
    pub fn with_max_retries(inner: Arc<dyn LlmPort>, max_retries: u32) -> Self {
        Self::new(
            inner,
            RetryPolicy {
                max_retries,
                ..RetryPolicy::default()
            },
        )
    }
}

#[async_trait]
impl LlmPort for ResilientLlmClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut retry = 0;
        loop {
            let error = match self.inner.generate(request.clone()).await {
                Ok(response) => {
                    if retry > 0 {
                        tracing::info!(retries = retry, "LLM request recovered");
                    }
                    return Ok(response);
                }
                Err(e) => e,
            };

            if !is_transient(&error) {
                tracing::error!(error = %error, "LLM request rejected, not retrying");
                return Err(error);
            }
            if retry >= self.policy.max_retries {
                tracing::error!(
                    attempts = retry + 1,
                    error = %error,
                    "LLM request failed on every attempt"
                );
                return Err(error);
            }

            retry += 1;
            let delay = self.policy.delay_for(retry);
            tracing::warn!(
                retry,
                max_retries = self.policy.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "LLM request failed, backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{FinishReason, MockLlmPort};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
            jitter: 0.0,
        }
    }

    fn ok_response() -> LlmResponse {
        LlmResponse {
            content: r#"{"name": "Ok"}"#.to_string(),
            finish_reason: FinishReason::Stop,
            usage: None,
        }
    }

    /// Mock that fails `failures` times with `error`, then succeeds.
    fn flaky(failures: u32, error: LlmError) -> (MockLlmPort, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut mock = MockLlmPort::new();
        mock.expect_generate().returning(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < failures {
                Err(error.clone())
            } else {
                Ok(ok_response())
            }
        });
        (mock, calls)
    }

    #[tokio::test]
    async fn succeeds_without_retry() {
        let (mock, calls) = flaky(0, LlmError::RequestFailed("unused".into()));
        let client = ResilientLlmClient::new(Arc::new(mock), fast_policy(3));

        let result = client.generate(LlmRequest::new(vec![])).await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let (mock, calls) = flaky(2, LlmError::RequestFailed("503: overloaded".into()));
        let client = ResilientLlmClient::new(Arc::new(mock), fast_policy(3));

        let result = client.generate(LlmRequest::new(vec![])).await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let (mock, calls) = flaky(10, LlmError::RequestFailed("connection reset".into()));
        let client = ResilientLlmClient::new(Arc::new(mock), fast_policy(2));

        let result = client.generate(LlmRequest::new(vec![])).await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn auth_errors_are_not_retried() {
        let (mock, calls) = flaky(10, LlmError::RequestFailed("401: invalid x-api-key".into()));
        let client = ResilientLlmClient::new(Arc::new(mock), fast_policy(3));

        let result = client.generate(LlmRequest::new(vec![])).await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1, "401 must fail on the first attempt");
    }

    #[tokio::test]
    async fn rate_limits_are_retried() {
        let (mock, calls) = flaky(1, LlmError::RequestFailed("429: slow down".into()));
        let client = ResilientLlmClient::new(Arc::new(mock), fast_policy(3));

        assert!(client.generate(LlmRequest::new(vec![])).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn transient_classification() {
        assert!(is_transient(&LlmError::RequestFailed("500: upstream".into())));
        assert!(is_transient(&LlmError::RequestFailed("error sending request".into())));
        assert!(is_transient(&LlmError::InvalidResponse("truncated body".into())));
        assert!(!is_transient(&LlmError::RequestFailed("404: model not found".into())));
        assert!(!is_transient(&LlmError::RequestFailed("400: bad request".into())));
    }

    #[test]
    fn status_is_read_from_the_message_prefix() {
        assert_eq!(status_of("503: overloaded"), Some(503));
        assert_eq!(status_of("dns error: no record"), None);
        assert_eq!(status_of("no colon"), None);
    }

    #[test]
    fn backoff_doubles_until_capped() {
        let policy = RetryPolicy {
            max_retries: 5,
            jitter: 0.0,
            ..RetryPolicy::default()
        };
        let delays: Vec<u64> = (1..=6).map(|r| policy.delay_for(r).as_millis() as u64).collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 8000, 16000, 30000]);
        assert_eq!(policy.delay_for(64), Duration::from_secs(30));
    }

    #[test]
    fn jitter_stays_within_its_fraction() {
        let policy = RetryPolicy::default();
        for _ in 0..50 {
            let delay = policy.delay_for(1);
            assert!(delay >= Duration::from_millis(790));
            assert!(delay <= Duration::from_millis(1210));
        }
    }
}
