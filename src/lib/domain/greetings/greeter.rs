//! Wish selection

use tracing::warn;

#[cfg(test)]
use mockall::mock;

use crate::domain::roster::Person;

use super::errors::GreetingError;
use super::fallback::fallback_wish;
use super::history::WishHistory;

/// Produces a personalized wish for one person.
///
/// Implementations are free to call out to anything; the [`Greeter`] treats
/// every failure as a cue to fall back to the stock pool.
pub trait WishSource {
    /// Composes a wish for `person`.
    fn compose(&self, person: &Person) -> Result<String, GreetingError>;
}

/// Any plain function over a person works as a wish source, so an external
/// service can be plugged in as a closure.
impl<F> WishSource for F
where
    F: Fn(&Person) -> Result<String, GreetingError>,
{
    fn compose(&self, person: &Person) -> Result<String, GreetingError> {
        self(person)
    }
}

#[cfg(test)]
mock! {
    pub WishSource {}

    impl WishSource for WishSource {
        fn compose(&self, person: &Person) -> Result<String, GreetingError>;
    }
}

/// Picks the wish that goes on a person's card.
///
/// A sourced wish is used only when it is fresh; a wish the ledger has seen
/// before, and any source failure, falls back to the stock pool instead.
#[derive(Debug)]
pub struct Greeter<W: WishSource, H: WishHistory> {
    source: Option<W>,
    history: H,
}

impl<W: WishSource, H: WishHistory> Greeter<W, H> {
    /// Creates a greeter. `source` is `None` when no wish source is
    /// configured, in which case every wish comes from the stock pool.
    pub fn new(source: Option<W>, history: H) -> Self {
        Self { source, history }
    }

    /// Returns the wish for `person`.
    pub fn greeting_for(&self, person: &Person) -> String {
        let Some(source) = &self.source else {
            return fallback_wish(&person.name);
        };

        // Sources tend to wrap their output in quotes; those never render
        // well inside the card markup.
        let wish = match source.compose(person) {
            Ok(raw) => raw.trim().replace('"', ""),
            Err(error) => {
                warn!(name = person.name.as_str(), %error, "wish source failed");
                return fallback_wish(&person.name);
            }
        };

        if wish.is_empty() || self.history.contains(&wish) {
            return fallback_wish(&person.name);
        }

        if let Err(error) = self.history.record(&wish) {
            warn!(%error, "wish could not be recorded");
        }

        wish
    }
}
