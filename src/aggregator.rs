//! The per-request workflow: validate, consult the cache, resolve
//! account → profile → ranked stats against the Riot API, merge, cache.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::{self, CacheValue, TtlCache};
use crate::error::AppError;
use crate::riot::fanout::query_all_platforms;
use crate::riot::region::{Platform, Region};
use crate::riot::types::{AccountDto, LeagueEntryDto, SummonerDto};
use crate::riot::RiotClient;
use crate::riot_id::RiotId;

/// Per-platform profile section of the aggregate response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub puuid: String,
    pub display_name: String,
    pub profile_icon_id: i32,
    pub level: i64,
    pub last_updated: i64,
}

impl Profile {
    fn from_summoner(summoner: SummonerDto, riot_id: &RiotId) -> Self {
        Self {
            id: summoner.id,
            account_id: summoner.account_id,
            puuid: summoner.puuid,
            display_name: riot_id.to_string(),
            profile_icon_id: summoner.profile_icon_id,
            level: summoner.summoner_level,
            last_updated: summoner.revision_date,
        }
    }
}

/// One ranked queue row: the upstream entry plus the derived win rate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQueueStats {
    #[serde(flatten)]
    pub entry: LeagueEntryDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<u32>,
}

impl From<LeagueEntryDto> for RankedQueueStats {
    fn from(entry: LeagueEntryDto) -> Self {
        let win_rate = win_rate(entry.wins, entry.losses);
        Self { entry, win_rate }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStats {
    pub solo_duo: Option<RankedQueueStats>,
    pub flex: Option<RankedQueueStats>,
}

impl RankedStats {
    fn empty() -> Self {
        Self {
            solo_duo: None,
            flex: None,
        }
    }

    /// Pick the solo/duo and flex rows out of the winning platform's
    /// entries. First match wins should the upstream ever send duplicates.
    fn from_entries(entries: Vec<LeagueEntryDto>) -> Self {
        let solo_duo = entries
            .iter()
            .find(|e| e.is_ranked_solo_duo())
            .cloned()
            .map(RankedQueueStats::from);
        let flex = entries
            .iter()
            .find(|e| e.is_ranked_flex())
            .cloned()
            .map(RankedQueueStats::from);

        Self { solo_duo, flex }
    }
}

/// Which platforms the profile and ranked sections were sourced from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSources {
    pub profile_source: Platform,
    pub ranked_source: Option<Platform>,
}

/// The merged response payload. Immutable once constructed; cached as-is
/// with `cached` flipped to true on the way back out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub account: AccountDto,
    pub profile: Profile,
    pub ranked_stats: RankedStats,
    pub platform: PlatformSources,
    pub cached: bool,
}

/// Percentage of games won, rounded to the nearest integer. Undefined (and
/// guarded, not NaN) when no games were played.
pub fn win_rate(wins: u32, losses: u32) -> Option<u32> {
    let total = wins + losses;
    if total == 0 {
        return None;
    }
    Some((100.0 * f64::from(wins) / f64::from(total)).round() as u32)
}

pub struct Aggregator {
    client: Arc<RiotClient>,
    cache: Arc<TtlCache>,
}

impl Aggregator {
    pub fn new(client: Arc<RiotClient>, cache: Arc<TtlCache>) -> Self {
        Self { client, cache }
    }

    /// Resolve a raw riot-id string within a region into the aggregate
    /// payload, consulting and populating the cache.
    pub async fn resolve(&self, raw_riot_id: &str, region: Region) -> Result<AggregateResult, AppError> {
        let riot_id = RiotId::parse(raw_riot_id)?;

        let cache_key = cache::aggregate_key(&riot_id, region);
        if let Some(CacheValue::Aggregate(mut hit)) = self.cache.get(&cache_key) {
            debug!("cache hit for {riot_id} in {region}");
            hit.cached = true;
            return Ok(hit);
        }

        // Tag lines are user-chosen, so a platform hint is log flavour
        // only. The fan-out below always probes the whole region.
        let hint = Platform::from_tag_hint(&riot_id.tag_line)
            .unwrap_or_else(|| region.default_platform());
        debug!("best-guess platform for {riot_id}: {hint}");

        let account = self
            .client
            .get_account_by_riot_id(region, &riot_id.game_name, &riot_id.tag_line)
            .await?;

        let (profile_source, summoner) = query_all_platforms(region, |platform| {
            let client = Arc::clone(&self.client);
            let puuid = account.puuid.clone();
            async move { client.get_summoner_by_puuid(platform, &puuid).await }
        })
        .await?;

        // Ranked data is optional: a player with a profile but no ranked
        // entries anywhere still resolves successfully.
        let (ranked_source, ranked_stats) = match query_all_platforms(region, |platform| {
            let client = Arc::clone(&self.client);
            let puuid = account.puuid.clone();
            async move { client.get_league_entries_by_puuid(platform, &puuid).await }
        })
        .await
        {
            Ok((platform, entries)) => (Some(platform), RankedStats::from_entries(entries)),
            Err(err) => {
                info!("no ranked data for {riot_id} in {region}: {err}");
                (None, RankedStats::empty())
            }
        };

        let result = AggregateResult {
            profile: Profile::from_summoner(summoner, &riot_id),
            account,
            ranked_stats,
            platform: PlatformSources {
                profile_source,
                ranked_source,
            },
            cached: false,
        };

        self.cache
            .insert(cache_key, CacheValue::Aggregate(result.clone()));

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riot::types::{QUEUE_FLEX, QUEUE_SOLO_DUO};

    fn entry(queue_type: &str, wins: u32, losses: u32) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue_type.into(),
            tier: "GOLD".into(),
            rank: "II".into(),
            league_points: 57,
            wins,
            losses,
            mini_series: None,
        }
    }

    #[test]
    fn win_rate_rounds_to_nearest() {
        assert_eq!(win_rate(44, 47), Some(48));
        assert_eq!(win_rate(1, 0), Some(100));
        assert_eq!(win_rate(1, 2), Some(33));
    }

    #[test]
    fn win_rate_is_undefined_without_games() {
        assert_eq!(win_rate(0, 0), None);
    }

    #[test]
    fn merge_picks_queues_by_type() {
        let stats = RankedStats::from_entries(vec![
            entry("CHERRY", 10, 10),
            entry(QUEUE_FLEX, 20, 10),
            entry(QUEUE_SOLO_DUO, 44, 47),
        ]);

        let solo = stats.solo_duo.expect("solo queue should be found");
        assert_eq!(solo.entry.wins, 44);
        assert_eq!(solo.win_rate, Some(48));

        let flex = stats.flex.expect("flex queue should be found");
        assert_eq!(flex.entry.wins, 20);
        assert_eq!(flex.win_rate, Some(67));
    }

    #[test]
    fn merge_takes_first_duplicate() {
        let stats = RankedStats::from_entries(vec![
            entry(QUEUE_SOLO_DUO, 1, 1),
            entry(QUEUE_SOLO_DUO, 9, 9),
        ]);

        assert_eq!(stats.solo_duo.expect("solo queue").entry.wins, 1);
    }

    #[test]
    fn merge_of_no_entries_is_empty() {
        let stats = RankedStats::from_entries(Vec::new());
        assert!(stats.solo_duo.is_none());
        assert!(stats.flex.is_none());
    }

    #[test]
    fn aggregate_serializes_camel_case() {
        let result = AggregateResult {
            account: AccountDto {
                puuid: "p".into(),
                game_name: Some("Faker".into()),
                tag_line: Some("KR1".into()),
            },
            profile: Profile {
                id: None,
                account_id: None,
                puuid: "p".into(),
                display_name: "Faker#KR1".into(),
                profile_icon_id: 4568,
                level: 512,
                last_updated: 1_700_000_000_000,
            },
            ranked_stats: RankedStats::empty(),
            platform: PlatformSources {
                profile_source: Platform::KR,
                ranked_source: None,
            },
            cached: false,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["platform"]["profileSource"], "kr");
        assert!(json["platform"]["rankedSource"].is_null());
        assert_eq!(json["rankedStats"]["soloDuo"], serde_json::Value::Null);
        assert_eq!(json["profile"]["displayName"], "Faker#KR1");
        assert_eq!(json["cached"], false);
    }
}
