//! Thin HTTP surface over the aggregation core.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::aggregator::{Aggregator, AggregateResult};
use crate::assets::IconFetcher;
use crate::cache::{CacheStats, TtlCache};
use crate::error::AppError;
use crate::riot::region::Region;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub icons: Arc<IconFetcher>,
    pub cache: Arc<TtlCache>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/summoner", get(get_summoner))
        .route("/api/icon/{icon_id}", get(get_icon))
        .route("/api/cache/stats", get(get_cache_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(port: u16, state: AppState) -> Result<(), AppError> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("failed to bind {addr}: {e}")))?;

    tracing::info!("listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::Config(format!("server error: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummonerQuery {
    riot_id: Option<String>,
    region: Option<String>,
}

async fn get_summoner(
    State(state): State<AppState>,
    Query(query): Query<SummonerQuery>,
) -> Result<Json<AggregateResult>, AppError> {
    let raw = query
        .riot_id
        .ok_or_else(|| AppError::InvalidRiotId(String::new()))?;
    let region = match query.region.as_deref() {
        Some(code) => code.parse()?,
        None => Region::Americas,
    };

    let result = state.aggregator.resolve(&raw, region).await?;
    Ok(Json(result))
}

async fn get_icon(
    State(state): State<AppState>,
    Path(icon_id): Path<u32>,
) -> Result<Response, AppError> {
    let bytes = state.icons.profile_icon(icon_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
struct CacheStatsView {
    #[serde(flatten)]
    stats: CacheStats,
    keys: Vec<String>,
}

async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStatsView> {
    Json(CacheStatsView {
        stats: state.cache.stats(),
        keys: state.cache.keys(),
    })
}

impl AppError {
    fn http_status(&self) -> StatusCode {
        match self {
            AppError::InvalidRiotId(_) | AppError::InvalidRegion(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            err if err.is_not_found() => StatusCode::NOT_FOUND,
            // The caller does not hold the credential, so a rejected key is
            // an upstream problem from their point of view.
            AppError::InvalidApiKey
            | AppError::RiotApi { .. }
            | AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let mut response = (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response();

        if let AppError::RateLimited { retry_after } = &self
            && let Ok(value) = HeaderValue::from_str(&retry_after.as_secs().to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;
    use std::time::Duration;

    use crate::riot::RiotClient;

    #[test]
    fn error_to_status_mapping() {
        assert_eq!(
            AppError::InvalidRiotId("x".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRegion("moon".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PlayerNotFound {
                game_name: "a".into(),
                tag_line: "b".into()
            }
            .http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NoPlatformData {
                region: Region::Americas
            }
            .http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RateLimited {
                retry_after: Duration::from_secs(3)
            }
            .http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AppError::InvalidApiKey.http_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::RiotApi {
                status: 503,
                message: "down".into()
            }
            .http_status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn rate_limit_response_carries_retry_after() {
        let response = AppError::RateLimited {
            retry_after: Duration::from_secs(7),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER),
            Some(&HeaderValue::from_static("7"))
        );
    }

    #[test]
    fn router_creation() {
        let cache = Arc::new(TtlCache::new(Duration::from_secs(60), 16));
        let client = Arc::new(
            RiotClient::new("test-key".into(), NonZeroU32::new(100).unwrap()).unwrap(),
        );
        let state = AppState {
            aggregator: Arc::new(Aggregator::new(client, cache.clone())),
            icons: Arc::new(IconFetcher::new(cache.clone()).unwrap()),
            cache,
        };

        let _router = router(state);
    }
}
