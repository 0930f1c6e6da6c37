use std::time::Duration;

use thiserror::Error;

use crate::riot::region::Region;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid riot id: {0:?}")]
    InvalidRiotId(String),

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("the Riot API rejected the configured API key")]
    InvalidApiKey,

    #[error("player not found: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("no data for this player on any {region} platform")]
    NoPlatformData { region: Region },

    #[error("Riot API rate limit exceeded, retry after {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("profile icon {0} not available from any known Data Dragon version")]
    IconUnavailable(u32),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Whether this error means "the entity does not exist" as opposed to
    /// an actual upstream malfunction.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::PlayerNotFound { .. }
                | AppError::NoPlatformData { .. }
                | AppError::IconUnavailable(_)
                | AppError::RiotApi { status: 404, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let err = AppError::PlayerNotFound {
            game_name: "Faker".into(),
            tag_line: "KR1".into(),
        };
        assert!(err.is_not_found());
        assert!(
            AppError::RiotApi {
                status: 404,
                message: "not found".into()
            }
            .is_not_found()
        );
        assert!(
            !AppError::RiotApi {
                status: 500,
                message: "boom".into()
            }
            .is_not_found()
        );
        assert!(!AppError::InvalidApiKey.is_not_found());
    }

    #[test]
    fn display_never_contains_secrets() {
        assert_eq!(
            AppError::InvalidApiKey.to_string(),
            "the Riot API rejected the configured API key"
        );
    }
}
