//! Riot routing values: coarse regions for Account-v1 and fine grained
//! platforms for Summoner-v4 / League-v4.
//!
//! The region→platform table below is the single authority; the test module
//! asserts both directions agree so the two mappings cannot drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::AppError;

/// Platform routing values (Summoner-v4, League-v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    BR1,
    LA1,
    LA2,
    NA1,
    JP1,
    KR,
    EUN1,
    EUW1,
    ME1,
    RU,
    TR1,
    OC1,
    PH2,
    SG2,
    TH2,
    TW2,
    VN2,
}

impl Platform {
    pub const ALL: [Platform; 17] = [
        Self::BR1,
        Self::LA1,
        Self::LA2,
        Self::NA1,
        Self::JP1,
        Self::KR,
        Self::EUN1,
        Self::EUW1,
        Self::ME1,
        Self::RU,
        Self::TR1,
        Self::OC1,
        Self::PH2,
        Self::SG2,
        Self::TH2,
        Self::TW2,
        Self::VN2,
    ];

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BR1 => "br1",
            Self::LA1 => "la1",
            Self::LA2 => "la2",
            Self::NA1 => "na1",
            Self::JP1 => "jp1",
            Self::KR => "kr",
            Self::EUN1 => "eun1",
            Self::EUW1 => "euw1",
            Self::ME1 => "me1",
            Self::RU => "ru",
            Self::TR1 => "tr1",
            Self::OC1 => "oc1",
            Self::PH2 => "ph2",
            Self::SG2 => "sg2",
            Self::TH2 => "th2",
            Self::TW2 => "tw2",
            Self::VN2 => "vn2",
        }
    }

    pub fn to_region(self) -> Region {
        match self {
            Self::BR1 | Self::LA1 | Self::LA2 | Self::NA1 => Region::Americas,
            Self::EUN1 | Self::EUW1 | Self::ME1 | Self::RU | Self::TR1 => Region::Europe,
            Self::JP1 | Self::KR => Region::Asia,
            Self::OC1 | Self::PH2 | Self::SG2 | Self::TH2 | Self::TW2 | Self::VN2 => Region::Sea,
        }
    }

    /// Best-effort platform inference from a Riot ID tag line.
    ///
    /// Tag lines are user-chosen text, not authoritative routing data, so
    /// this is used for logging only. It must never be used to skip the
    /// platform fan-out.
    pub fn from_tag_hint(tag_line: &str) -> Option<Self> {
        Self::from_str(tag_line).ok()
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BR" | "BR1" => Ok(Self::BR1),
            "LAN" | "LA1" => Ok(Self::LA1),
            "LAS" | "LA2" => Ok(Self::LA2),
            "NA" | "NA1" => Ok(Self::NA1),
            "JP" | "JP1" => Ok(Self::JP1),
            "KR" => Ok(Self::KR),
            "EUNE" | "EUN" | "EUN1" => Ok(Self::EUN1),
            "EUW" | "EUW1" => Ok(Self::EUW1),
            "ME" | "ME1" => Ok(Self::ME1),
            "RU" => Ok(Self::RU),
            "TR" | "TR1" => Ok(Self::TR1),
            "OCE" | "OC" | "OC1" => Ok(Self::OC1),
            "PH" | "PH2" => Ok(Self::PH2),
            "SG" | "SG2" => Ok(Self::SG2),
            "TH" | "TH2" => Ok(Self::TH2),
            "TW" | "TW2" => Ok(Self::TW2),
            "VN" | "VN2" => Ok(Self::VN2),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Regional routing values (Account-v1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl Region {
    pub const ALL: [Region; 4] = [Self::Americas, Self::Europe, Self::Asia, Self::Sea];

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Europe => "europe",
            Self::Asia => "asia",
            Self::Sea => "sea",
        }
    }

    /// The platforms owned by this region, in the order the fan-out probes
    /// them and the order selection ties are broken.
    pub fn platforms(&self) -> &'static [Platform] {
        match self {
            Self::Americas => &[Platform::BR1, Platform::LA1, Platform::LA2, Platform::NA1],
            Self::Europe => &[
                Platform::EUN1,
                Platform::EUW1,
                Platform::ME1,
                Platform::RU,
                Platform::TR1,
            ],
            Self::Asia => &[Platform::JP1, Platform::KR],
            Self::Sea => &[
                Platform::OC1,
                Platform::PH2,
                Platform::SG2,
                Platform::TH2,
                Platform::TW2,
                Platform::VN2,
            ],
        }
    }

    /// One fixed representative platform per region. A last-resort hint
    /// only, never a substitute for the fan-out.
    pub fn default_platform(&self) -> Platform {
        match self {
            Self::Americas => Platform::NA1,
            Self::Europe => Platform::EUW1,
            Self::Asia => Platform::KR,
            Self::Sea => Platform::OC1,
        }
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "americas" => Ok(Self::Americas),
            "europe" => Ok(Self::Europe),
            "asia" => Ok(Self::Asia),
            "sea" => Ok(Self::Sea),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Region {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_platform_is_listed_by_its_region() {
        for platform in Platform::ALL {
            let region = platform.to_region();
            assert!(
                region.platforms().contains(&platform),
                "{platform} missing from {region} platform list"
            );
        }
    }

    #[test]
    fn every_listed_platform_maps_back_to_its_region() {
        let total: usize = Region::ALL.iter().map(|r| r.platforms().len()).sum();
        assert_eq!(total, Platform::ALL.len());

        for region in Region::ALL {
            for platform in region.platforms() {
                assert_eq!(platform.to_region(), region);
            }
        }
    }

    #[test]
    fn default_platform_belongs_to_its_region() {
        for region in Region::ALL {
            assert!(region.platforms().contains(&region.default_platform()));
        }
    }

    #[test]
    fn base_urls() {
        assert_eq!(
            Platform::EUW1.base_url(),
            "https://euw1.api.riotgames.com"
        );
        assert_eq!(
            Region::Americas.base_url(),
            "https://americas.api.riotgames.com"
        );
    }

    #[test]
    fn region_parses_case_insensitively() {
        assert_eq!(Region::from_str("Americas").unwrap(), Region::Americas);
        assert_eq!(Region::from_str("SEA").unwrap(), Region::Sea);
        assert!(Region::from_str("moon").is_err());
    }

    #[test]
    fn tag_hints_cover_common_aliases() {
        assert_eq!(Platform::from_tag_hint("NA1"), Some(Platform::NA1));
        assert_eq!(Platform::from_tag_hint("euw"), Some(Platform::EUW1));
        assert_eq!(Platform::from_tag_hint("KR1"), None);
        assert_eq!(Platform::from_tag_hint("1234"), None);
    }
}
