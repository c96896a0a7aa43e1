//! Wish ledger seam

#[cfg(test)]
use mockall::mock;

use super::errors::GreetingError;

/// Ledger of every wish that has already been sent.
pub trait WishHistory {
    /// Whether `wish` has been sent before.
    fn contains(&self, wish: &str) -> bool;

    /// Records `wish` as sent.
    fn record(&self, wish: &str) -> Result<(), GreetingError>;
}

#[cfg(test)]
mock! {
    pub WishHistory {}

    impl WishHistory for WishHistory {
        fn contains(&self, wish: &str) -> bool;
        fn record(&self, wish: &str) -> Result<(), GreetingError>;
    }
}
