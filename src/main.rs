use std::sync::Arc;

use tracing::{error, info};

use riftscope::aggregator::Aggregator;
use riftscope::assets::IconFetcher;
use riftscope::cache::TtlCache;
use riftscope::config::Config;
use riftscope::error::AppError;
use riftscope::http::{self, AppState};
use riftscope::logging;
use riftscope::riot::RiotClient;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    info!("🔭 Starting riftscope on port {}", config.port);

    let cache = Arc::new(TtlCache::new(config.cache_ttl, config.cache_max_entries));
    let client = Arc::new(RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_rate_limit_per_minute,
    )?);
    client.start_metrics_logging();

    let state = AppState {
        aggregator: Arc::new(Aggregator::new(client, cache.clone())),
        icons: Arc::new(IconFetcher::new(cache.clone())?),
        cache,
    };

    http::serve(config.port, state).await
}
