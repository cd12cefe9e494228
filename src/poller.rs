//! Polling HTTP fetcher
//!
//! Issues a GET and keeps re-issuing it on a fixed delay while the server answers
//! `202 Accepted`. The first other status ends the chain:
//!
//! - `200` goes to the success handler,
//! - anything else (4xx and 5xx alike) goes to the error handler.
//!
//! Both handlers receive the body run through the same [`ResponseParser`].
//! Parse and transport failures are returned as `Err` and reach neither handler.
//!
//! There is no cancellation token. A chain ends when the server stops answering
//! 202, when `max_attempts` is reached, or when its future is dropped.

use std::fmt::Debug;

use reqwest::StatusCode;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::PollConfig;
use crate::error::{Result, TidbitsError};
use crate::parser::{Json, RawText, ResponseParser};

/// Terminal response of a polling chain
#[derive(Debug, Clone, PartialEq)]
pub struct Polled<T> {
    /// Final (non-202) status
    pub status: StatusCode,
    /// Requests issued, initial one included
    pub attempts: u32,
    /// Body after parsing
    pub body: T,
}

impl<T> Polled<T> {
    /// Only `200 OK` counts as success
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// `Ok(body)` on success, `Err(self)` otherwise
    pub fn into_result(self) -> std::result::Result<T, Self> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(self)
        }
    }
}

/// Polling fetcher with a shared HTTP client
#[derive(Debug, Clone)]
pub struct Poller {
    /// Shared HTTP client (connection pooling)
    http_client: reqwest::Client,
    config: PollConfig,
}

impl Poller {
    /// Create a poller, building its HTTP client from `config`
    pub fn new(config: PollConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(TidbitsError::Client)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a poller with [`PollConfig::default`]
    pub fn with_defaults() -> Result<Self> {
        Self::new(PollConfig::default())
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run a polling chain against `url` and return its terminal response
    #[instrument(skip_all, fields(url = %url))]
    pub async fn poll<P: ResponseParser>(
        &self,
        url: &str,
        parser: &P,
    ) -> Result<Polled<P::Output>> {
        let target = parse_url(url)?;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "GET");

            let response = self
                .http_client
                .get(target.clone())
                .send()
                .await
                .map_err(|source| TidbitsError::Transport {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();
            if status == StatusCode::ACCEPTED {
                if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                    return Err(TidbitsError::PollExhausted {
                        url: url.to_string(),
                        attempts,
                    });
                }
                debug!(
                    attempt = attempts,
                    delay_ms = self.config.poll_interval.as_millis() as u64,
                    "still processing, polling again"
                );
                tokio::time::sleep(self.config.poll_interval).await;
                continue;
            }

            let text = response
                .text()
                .await
                .map_err(|source| TidbitsError::Transport {
                    url: url.to_string(),
                    source,
                })?;
            debug!(status = status.as_u16(), attempts, body_len = text.len(), "completed");

            let body = parser.parse(text)?;
            return Ok(Polled {
                status,
                attempts,
                body,
            });
        }
    }

    /// Poll `url`, hand the raw body to `on_success`, log failures
    pub async fn call<S>(&self, url: &str, on_success: S) -> Result<()>
    where
        S: FnOnce(String),
    {
        self.call_with(url, RawText, on_success, log_error).await
    }

    /// Poll `url` and dispatch the parsed body to `on_success` or `on_error`
    pub async fn call_with<P, S, E>(
        &self,
        url: &str,
        parser: P,
        on_success: S,
        on_error: E,
    ) -> Result<()>
    where
        P: ResponseParser,
        S: FnOnce(P::Output),
        E: FnOnce(P::Output),
    {
        match self.poll(url, &parser).await?.into_result() {
            Ok(body) => on_success(body),
            Err(failed) => on_error(failed.body),
        }
        Ok(())
    }

    /// [`call_with`](Self::call_with) with the body decoded as JSON
    pub async fn call_json<S, E>(&self, url: &str, on_success: S, on_error: E) -> Result<()>
    where
        S: FnOnce(serde_json::Value),
        E: FnOnce(serde_json::Value),
    {
        self.call_with(url, Json::<serde_json::Value>::new(), on_success, on_error)
            .await
    }

    /// Run [`call_with`](Self::call_with) as a tokio task
    ///
    /// The caller is free as soon as this returns. Aborting the handle is the
    /// only way to stop the chain early.
    pub fn spawn_call<P, S, E>(
        &self,
        url: impl Into<String>,
        parser: P,
        on_success: S,
        on_error: E,
    ) -> JoinHandle<Result<()>>
    where
        P: ResponseParser + Send + Sync + 'static,
        P::Output: Send + 'static,
        S: FnOnce(P::Output) + Send + 'static,
        E: FnOnce(P::Output) + Send + 'static,
    {
        let poller = self.clone();
        let url = url.into();
        tokio::spawn(async move { poller.call_with(&url, parser, on_success, on_error).await })
    }
}

/// Default error handler: logs the body at `error` level
pub fn log_error<T: Debug>(body: T) {
    error!(?body, "request failed");
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| TidbitsError::InvalidUrl {
        url: raw.to_string(),
        details: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TidbitsError::InvalidUrl {
            url: raw.to_string(),
            details: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poller_is_clone() {
        let poller = Poller::with_defaults().unwrap();
        let _cloned = poller.clone();
    }

    #[test]
    fn polled_success_only_on_200() {
        let ok = Polled {
            status: StatusCode::OK,
            attempts: 1,
            body: "done",
        };
        assert!(ok.is_success());
        assert_eq!(ok.into_result(), Ok("done"));

        let created = Polled {
            status: StatusCode::CREATED,
            attempts: 1,
            body: "made",
        };
        assert!(!created.is_success());
        assert_eq!(created.into_result().unwrap_err().status, StatusCode::CREATED);
    }

    #[test]
    fn parse_url_accepts_http_and_https() {
        assert!(parse_url("http://localhost:8080/jobs/1").is_ok());
        assert!(parse_url("https://example.com").is_ok());
    }

    #[test]
    fn parse_url_rejects_garbage_and_other_schemes() {
        assert!(matches!(
            parse_url("jobs/1"),
            Err(TidbitsError::InvalidUrl { .. })
        ));
        let err = parse_url("ftp://example.com/file").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[tokio::test]
    async fn invalid_url_reaches_no_handler() {
        let poller = Poller::with_defaults().unwrap();
        let result = poller
            .call_with(
                "not a url",
                RawText,
                |_| panic!("success handler called"),
                |_| panic!("error handler called"),
            )
            .await;
        assert!(matches!(result, Err(TidbitsError::InvalidUrl { .. })));
    }
}
