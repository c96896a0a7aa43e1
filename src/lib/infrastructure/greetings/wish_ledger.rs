//! JSON-backed wish ledger
//!
//! A flat JSON string array on disk. A missing or unparseable file counts
//! as an empty ledger, so a corrupted history degrades to occasionally
//! repeating a wish rather than blocking the run.

use std::fs::File;
use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use crate::domain::greetings::{GreetingError, WishHistory};

/// Ledger of sent wishes, persisted as a JSON array.
#[derive(Clone, Debug)]
pub struct JsonWishHistory {
    path: PathBuf,
}

impl JsonWishHistory {
    /// Creates a ledger backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Vec<String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(wishes) => wishes,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "wish ledger unreadable, treating as empty");
                Vec::new()
            }
        }
    }
}

impl WishHistory for JsonWishHistory {
    fn contains(&self, wish: &str) -> bool {
        self.load().iter().any(|known| known == wish)
    }

    fn record(&self, wish: &str) -> Result<(), GreetingError> {
        let mut wishes = self.load();

        if wishes.iter().any(|known| known == wish) {
            return Ok(());
        }

        wishes.push(wish.to_string());

        let file = File::create(&self.path).map_err(|source| GreetingError::Ledger {
            path: self.path.clone(),
            source,
        })?;

        // Four-space indents keep the file byte-compatible with ledgers
        // written by earlier versions of the bot.
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(file, formatter);
        wishes.serialize(&mut serializer)?;

        Ok(())
    }
}
