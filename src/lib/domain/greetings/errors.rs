//! Greeting errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while producing or recording wishes.
#[derive(Debug, Error)]
pub enum GreetingError {
    /// The wish source failed
    #[error(transparent)]
    Source(anyhow::Error),

    /// A wish could not be encoded for the ledger
    #[error("wish ledger entries could not be encoded")]
    Encode(#[from] serde_json::Error),

    /// The wish ledger file could not be rewritten
    #[error("wish ledger {path} could not be rewritten")]
    Ledger {
        /// The ledger file that was being written
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl From<anyhow::Error> for GreetingError {
    fn from(err: anyhow::Error) -> Self {
        GreetingError::Source(err)
    }
}
