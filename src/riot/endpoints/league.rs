use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Platform;
use crate::riot::types::LeagueEntryDto;

impl RiotClient {
    /// Get league entries (ranked info) for a player by PUUID.
    /// An empty vec is a valid result: the player has no ranked data here.
    pub async fn get_league_entries_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        tracing::trace!("get_league_entries_by_puuid {} on {}", puuid, platform);

        let url = format!(
            "{}/lol/league/v4/entries/by-puuid/{}",
            self.platform_base(platform),
            puuid
        );

        self.get(&url).await
    }
}
