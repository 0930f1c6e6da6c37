//! Everything that talks to the Riot API: routing tables, the
//! authenticated client, the per-endpoint wrappers and the platform
//! fan-out used to locate a player's data.

pub mod client;
pub mod endpoints;
pub mod fanout;
pub mod metrics;
pub mod region;
pub mod types;

pub use client::RiotClient;
pub use region::{Platform, Region};
