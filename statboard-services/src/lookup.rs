//! Player lookup over HTTP.
//!
//! The lookup service accepts `{"query": "<name>"}` and answers with a
//! player record. Any transport, status or parse failure is reported as a
//! [`LookupError`]; a partial record is never returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use statboard_core::{PlayerRecord, SceneResult, SceneStore};
use thiserror::Error;
use url::Url;

/// Environment variable holding the lookup endpoint.
pub const ENV_LOOKUP_URL: &str = "STATBOARD_LOOKUP_URL";
/// Environment variable holding the bearer key.
pub const ENV_LOOKUP_KEY: &str = "STATBOARD_LOOKUP_KEY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_LOOKUP_TIMEOUT: &str = "STATBOARD_LOOKUP_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the player lookup collaborator.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid lookup URL: {0}")]
    InvalidUrl(String),
    /// The query was blank.
    #[error("player query is empty")]
    EmptyQuery,
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("lookup service returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, if any.
        message: String,
    },
    /// The body was not a player record.
    #[error("failed to parse lookup response: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// Returns true if the request may succeed when repeated.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Retry policy with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 200,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(
            self.initial_delay_ms
                .saturating_mul(factor)
                .min(self.max_delay_ms),
        )
    }
}

/// Lookup client configuration.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Endpoint that accepts the query.
    pub endpoint: Url,
    /// Optional bearer key.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for transient failures.
    pub retry: RetryConfig,
}

impl LookupConfig {
    /// Configuration for an endpoint with default timeout and retries.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the URL is malformed.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, LookupError> {
        let endpoint =
            Url::parse(endpoint.as_ref()).map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            endpoint,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        })
    }

    /// Set the bearer key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Build from `STATBOARD_LOOKUP_*` environment variables.
    ///
    /// Returns `Ok(None)` when no endpoint is configured.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidUrl`] if the configured URL is malformed.
    pub fn from_env() -> Result<Option<Self>, LookupError> {
        let Ok(url) = std::env::var(ENV_LOOKUP_URL) else {
            return Ok(None);
        };
        let mut config = Self::new(url)?;
        if let Ok(key) = std::env::var(ENV_LOOKUP_KEY) {
            if !key.trim().is_empty() {
                config = config.with_api_key(key);
            }
        }
        if let Some(secs) = std::env::var(ENV_LOOKUP_TIMEOUT)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(Some(config))
    }
}

/// Something that resolves a free-text name to a player record.
#[async_trait]
pub trait PlayerLookup: Send + Sync {
    /// Look a player up by name.
    async fn search(&self, query: &str) -> Result<PlayerRecord, LookupError>;
}

/// HTTP implementation of [`PlayerLookup`].
#[derive(Clone)]
pub struct HttpPlayerLookup {
    http: Client,
    config: LookupConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

impl HttpPlayerLookup {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the HTTP client fails to build.
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let http = Client::builder()
            .user_agent(concat!("statboard/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// The configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }

    async fn search_once(&self, query: &str) -> Result<PlayerRecord, LookupError> {
        let mut request = self
            .http
            .post(self.config.endpoint.clone())
            .json(&json!({ "query": query }));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }
        Ok(serde_json::from_str::<PlayerRecord>(&body)?.sanitized())
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}

#[async_trait]
impl PlayerLookup for HttpPlayerLookup {
    async fn search(&self, query: &str) -> Result<PlayerRecord, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyQuery);
        }

        let mut attempt = 0;
        loop {
            match self.search_once(query).await {
                Ok(record) => {
                    tracing::info!("Lookup for {query:?} resolved to {:?}", record.name);
                    return Ok(record);
                }
                Err(e) if e.is_retryable() && attempt + 1 < self.config.retry.max_attempts => {
                    let delay = self.config.retry.delay_for_attempt(attempt);
                    tracing::warn!("Lookup attempt {} failed: {e}; retrying in {delay:?}", attempt + 1);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Run a lookup and apply its result to the store as one batch.
///
/// On failure the scene is left untouched.
///
/// # Errors
///
/// Returns [`statboard_core::SceneError::ExternalAdapterFailure`] if the
/// lookup fails, or a batch error.
pub async fn search_and_apply(
    lookup: &dyn PlayerLookup,
    store: &mut SceneStore,
    query: &str,
) -> SceneResult<usize> {
    let result = lookup.search(query).await;
    store.apply_player_lookup(result)
}
