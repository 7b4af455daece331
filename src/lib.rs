//! Galena - single-instrument continuous double-auction matching engine.
//!
//! Orders enter through [`matching::MatchingEngine::submit`]; crossing
//! trades execute under price-time priority and land in the append-only
//! [`ledger::TradeLedger`].

pub mod book;
pub mod ledger;
pub mod matching;
pub mod order;

mod arena;
