//! Greetings infrastructure

pub mod wish_ledger;

pub use wish_ledger::JsonWishHistory;
