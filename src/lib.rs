//! Riftscope resolves a Riot ID into one aggregated payload of account,
//! profile and ranked data, probing every platform of a routing region in
//! parallel and caching the merged result in front of the Riot API.

pub mod aggregator;
pub mod assets;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod riot;
pub mod riot_id;
