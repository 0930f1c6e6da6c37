//! Profile icon passthrough backed by the Data Dragon CDN.
//!
//! Data Dragon is versioned and keyless. The latest version is looked up
//! dynamically; when that lookup fails, or the latest version does not
//! serve the icon, a pinned list of known-good versions is tried in order.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::cache::{self, CacheValue, TtlCache};
use crate::error::AppError;

const DDRAGON_BASE_URL: &str = "https://ddragon.leagueoflegends.com";

/// Known-good asset versions, most recent first.
const PINNED_VERSIONS: &[&str] = &["16.1.1", "15.24.1", "15.12.1", "14.24.1"];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct IconFetcher {
    http: reqwest::Client,
    cache: Arc<TtlCache>,
    base_url: String,
}

impl IconFetcher {
    pub fn new(cache: Arc<TtlCache>) -> Result<Self, AppError> {
        Self::with_base_url(cache, DDRAGON_BASE_URL.to_string())
    }

    /// Point the fetcher at a different CDN base. Used by tests.
    pub fn with_base_url(cache: Arc<TtlCache>, base_url: String) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            cache,
            base_url,
        })
    }

    /// Fetch a profile icon, trying the dynamic latest version first and
    /// falling back through the pinned version list. Results are cached in
    /// the shared store under the icon namespace.
    pub async fn profile_icon(&self, icon_id: u32) -> Result<Bytes, AppError> {
        let key = cache::icon_key(icon_id);
        if let Some(CacheValue::Icon(bytes)) = self.cache.get(&key) {
            return Ok(bytes);
        }

        for version in self.candidate_versions().await {
            let url = format!(
                "{}/cdn/{}/img/profileicon/{}.png",
                self.base_url, version, icon_id
            );
            match self.fetch_png(&url).await {
                Ok(bytes) => {
                    debug!("icon {icon_id} served from ddragon v{version}");
                    self.cache.insert(key, CacheValue::Icon(bytes.clone()));
                    return Ok(bytes);
                }
                Err(err) => debug!("icon {icon_id} not on ddragon v{version}: {err}"),
            }
        }

        Err(AppError::IconUnavailable(icon_id))
    }

    /// The ordered version list to try: dynamic latest (when resolvable)
    /// followed by the pinned fallbacks, deduplicated.
    async fn candidate_versions(&self) -> Vec<String> {
        let mut versions: Vec<String> = Vec::with_capacity(PINNED_VERSIONS.len() + 1);

        match self.latest_version().await {
            Ok(latest) => versions.push(latest),
            Err(err) => warn!("ddragon version lookup failed, using pinned list: {err}"),
        }

        for pinned in PINNED_VERSIONS {
            if !versions.iter().any(|v| v.as_str() == *pinned) {
                versions.push((*pinned).to_string());
            }
        }

        versions
    }

    async fn latest_version(&self) -> Result<String, AppError> {
        let url = format!("{}/api/versions.json", self.base_url);
        let versions: Vec<String> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        versions
            .into_iter()
            .next()
            .ok_or_else(|| AppError::RiotApi {
                status: 502,
                message: "empty ddragon version list".into(),
            })
    }

    async fn fetch_png(&self, url: &str) -> Result<Bytes, AppError> {
        let res = self.http.get(url).send().await?.error_for_status()?;
        res.bytes().await.map_err(AppError::from)
    }
}
