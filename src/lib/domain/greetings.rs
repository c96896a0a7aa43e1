//! Wishes, subject lines, and celebration markup

pub mod audience;
pub mod cards;
pub mod errors;
pub mod fallback;
pub mod greeter;
pub mod history;

pub use audience::Audience;
pub use cards::{BirthdayCardTemplate, TeamDigestTemplate};
pub use errors::GreetingError;
pub use fallback::fallback_wish;
pub use greeter::{Greeter, WishSource};
pub use history::WishHistory;
