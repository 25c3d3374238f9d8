//! Routing Rule Engine Module
//!
//! Holds the ordered rule collection (with durable save/load) and the
//! pure matcher that selects the governing rule for an inbound message.

pub mod matcher;
pub mod seed;
mod store;

pub use matcher::classify;
pub use store::RuleStore;
