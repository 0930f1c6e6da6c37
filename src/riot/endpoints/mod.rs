//! One file per upstream endpoint family, each extending [`RiotClient`]
//! with typed wrappers.

mod account;
mod league;
mod summoner;
