//! Parsing and validation of user supplied Riot IDs (`name#tag`).

use crate::error::AppError;

/// A parsed Riot ID. Both halves are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl RiotId {
    /// Check whether a raw query string is a well formed Riot ID without
    /// constructing one. Percent-encoding is decoded first, so both
    /// `Faker#KR1` and `Faker%23KR1` are accepted.
    pub fn is_valid(raw: &str) -> bool {
        Self::split(raw).is_some()
    }

    /// Parse a raw query string into a [`RiotId`].
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let (game_name, tag_line) =
            Self::split(raw).ok_or_else(|| AppError::InvalidRiotId(raw.to_string()))?;

        Ok(Self {
            game_name,
            tag_line,
        })
    }

    /// Decode, require exactly one `#` delimiter and two non-empty halves.
    fn split(raw: &str) -> Option<(String, String)> {
        let decoded = urlencoding::decode(raw).ok()?;

        let mut parts = decoded.split('#');
        let name = parts.next()?.trim();
        let tag = parts.next()?.trim();
        if parts.next().is_some() || name.is_empty() || tag.is_empty() {
            return None;
        }

        Some((name.to_string(), tag.to_string()))
    }
}

impl std::fmt::Display for RiotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_both_halves() {
        let id = RiotId::parse("  Faker  #  KR1  ").unwrap();
        assert_eq!(id.game_name, "Faker");
        assert_eq!(id.tag_line, "KR1");
    }

    #[test]
    fn single_character_halves_are_valid() {
        assert!(RiotId::is_valid("F#KR"));
        assert!(RiotId::is_valid("F#K"));
    }

    #[test]
    fn rejects_wrong_delimiter_counts() {
        assert!(!RiotId::is_valid("Faker#KR1#Extra"));
        assert!(!RiotId::is_valid("Faker"));
        assert!(!RiotId::is_valid(""));
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(!RiotId::is_valid("#KR1"));
        assert!(!RiotId::is_valid("Faker#"));
        assert!(!RiotId::is_valid("   #   "));
    }

    #[test]
    fn decodes_percent_encoding() {
        let id = RiotId::parse("Hide%20on%20bush%23KR1").unwrap();
        assert_eq!(id.game_name, "Hide on bush");
        assert_eq!(id.tag_line, "KR1");
    }

    #[test]
    fn parse_failure_carries_raw_input() {
        let err = RiotId::parse("not-a-riot-id").unwrap_err();
        match err {
            AppError::InvalidRiotId(raw) => assert_eq!(raw, "not-a-riot-id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn display_round_trips() {
        let id = RiotId::parse("Faker#KR1").unwrap();
        assert_eq!(id.to_string(), "Faker#KR1");
    }
}
