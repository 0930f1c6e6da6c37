use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Platform;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner (profile) by PUUID.
    /// Uses platform routing (euw1, na1, kr, etc.).
    pub async fn get_summoner_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<SummonerDto, AppError> {
        tracing::trace!("get_summoner_by_puuid {} on {}", puuid, platform);

        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_base(platform),
            puuid
        );

        self.get(&url).await
    }
}
