use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use nonzero_ext::nonzero;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub port: u16,
    pub cache_ttl: Duration,
    pub cache_max_entries: usize,
    pub riot_rate_limit_per_minute: NonZeroU32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_PORT: u16 = 3000;
        const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;
        const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;
        const DEFAULT_RIOT_RATE_LIMIT_PER_MINUTE: NonZeroU32 = nonzero!(100u32);

        // No key, no process: requests could never succeed.
        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let cache_ttl = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_CACHE_TTL_SECS));

        let cache_max_entries = env::var("CACHE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES);

        let riot_rate_limit_per_minute = env::var("RIOT_RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or(DEFAULT_RIOT_RATE_LIMIT_PER_MINUTE);

        Ok(Self {
            riot_api_key,
            port,
            cache_ttl,
            cache_max_entries,
            riot_rate_limit_per_minute,
        })
    }
}
