use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::{Response, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::riot::metrics::RequestMetrics;
use crate::riot::region::{Platform, Region};

/// Per-call timeout for every upstream request. A timed out call surfaces
/// as a transport error, which the fan-out treats as one more failed probe.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fallback when a 429 response does not carry a usable `Retry-After`.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Authenticated client for the Riot REST APIs.
///
/// The API key lives here and nowhere else: it is sent as the
/// `X-Riot-Token` header and never logged or echoed into errors.
pub struct RiotClient {
    client: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    key: String,
    pub metrics: Arc<RequestMetrics>,
    base_override: Option<String>,
}

// Hand written so the API key can never leak through debug formatting.
impl std::fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiotClient")
            .field("key", &"<redacted>")
            .field("base_override", &self.base_override)
            .finish_non_exhaustive()
    }
}

impl RiotClient {
    pub fn new(api_key: String, rate_limit_per_minute: NonZeroU32) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_minute(rate_limit_per_minute)),
            key: api_key,
            metrics: RequestMetrics::new(),
            base_override: None,
        })
    }

    /// Route every region and platform to one fixed base URL instead of the
    /// real Riot hosts. Intended for tests against a local mock server.
    pub fn with_base_url(
        api_key: String,
        rate_limit_per_minute: NonZeroU32,
        base_url: String,
    ) -> Result<Self, AppError> {
        let mut client = Self::new(api_key, rate_limit_per_minute)?;
        client.base_override = Some(base_url);
        Ok(client)
    }

    /// Spawn a task logging periodic metrics about upstream requests.
    pub fn start_metrics_logging(&self) {
        let metrics = self.metrics.clone();
        tokio::spawn(async move { metrics.log_loop().await });
    }

    pub(crate) fn region_base(&self, region: Region) -> String {
        self.base_override
            .clone()
            .unwrap_or_else(|| region.base_url())
    }

    pub(crate) fn platform_base(&self, platform: Platform) -> String {
        self.base_override
            .clone()
            .unwrap_or_else(|| platform.base_url())
    }

    /// Shared request logic: rate limit, authenticate, map the response
    /// status onto the error taxonomy, decode JSON.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        self.limiter.until_ready().await;
        self.metrics.inc();

        let res = self
            .client
            .get(url)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        let res = Self::check_status(res).await?;
        res.json().await.map_err(AppError::from)
    }

    async fn check_status(res: Response) -> Result<Response, AppError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = res
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_RETRY_AFTER);
                Err(AppError::RateLimited { retry_after })
            }
            _ => {
                let message = res
                    .text()
                    .await
                    .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());
                Err(AppError::RiotApi {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
