//! Wire representations of the upstream Riot API responses.

use serde::{Deserialize, Serialize};

use super::fanout::PlatformData;

/// Account-v1 response: the canonical cross-platform identity.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

/// Summoner-v4 response: the per-platform profile.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    pub puuid: String,
    pub profile_icon_id: i32,
    pub revision_date: i64,
    pub summoner_level: i64,
}

// A summoner either exists on a platform or the call 404s, so any success
// counts as populated in the fan-out selection.
impl PlatformData for SummonerDto {}

/// League-v4 response: one entry per ranked queue.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_series: Option<MiniSeriesDto>,
}

pub const QUEUE_SOLO_DUO: &str = "RANKED_SOLO_5x5";
pub const QUEUE_FLEX: &str = "RANKED_FLEX_SR";

impl LeagueEntryDto {
    pub fn is_ranked_solo_duo(&self) -> bool {
        self.queue_type == QUEUE_SOLO_DUO
    }

    pub fn is_ranked_flex(&self) -> bool {
        self.queue_type == QUEUE_FLEX
    }
}

/// Promotion series sub-state carried by a league entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MiniSeriesDto {
    pub target: u32,
    pub wins: u32,
    pub losses: u32,
    pub progress: String,
}
