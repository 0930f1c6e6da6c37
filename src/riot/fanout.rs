//! Parallel platform probing.
//!
//! The account lookup returns a cross-platform PUUID but not the platform
//! holding the player's profile or ranked data, so every platform of the
//! region is probed concurrently. All probes are awaited to completion
//! before a winner is picked: racing to the first success would mis-select
//! when one platform answers quickly with an empty result while a slower
//! one holds real data.

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::error::AppError;
use crate::riot::region::{Platform, Region};

/// Tells the selection policy whether a successful payload holds real data.
///
/// The default says yes, so for scalar results "populated" degenerates to
/// "any success". `Vec` payloads override it with non-emptiness.
pub trait PlatformData {
    fn is_populated(&self) -> bool {
        true
    }
}

impl<T> PlatformData for Vec<T> {
    fn is_populated(&self) -> bool {
        !self.is_empty()
    }
}

/// Invoke `query` against every platform of `region` concurrently and pick
/// one winner once all probes have settled:
///
/// 1. the first populated success, in platform enumeration order;
/// 2. else the first success at all;
/// 3. else the whole fan-out fails as "no data in this region".
///
/// Individual platform failures are expected noise (most platforms 404 for
/// any given player) and never propagate on their own.
pub async fn query_all_platforms<T, F, Fut>(
    region: Region,
    query: F,
) -> Result<(Platform, T), AppError>
where
    T: PlatformData,
    F: Fn(Platform) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let probes = region.platforms().iter().map(|&platform| {
        let fut = query(platform);
        async move { (platform, fut.await) }
    });

    let settled = join_all(probes).await;

    let mut first_success: Option<(Platform, T)> = None;
    for (platform, outcome) in settled {
        match outcome {
            Ok(value) if value.is_populated() => return Ok((platform, value)),
            Ok(value) => {
                if first_success.is_none() {
                    first_success = Some((platform, value));
                }
            }
            Err(err) => debug!("platform {platform} probe failed: {err}"),
        }
    }

    first_success.ok_or(AppError::NoPlatformData { region })
}
