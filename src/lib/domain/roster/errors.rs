//! Roster errors

use std::path::PathBuf;

/// Errors raised while reading or extending the roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The backing file could not be opened or created.
    #[error("roster file {path} is not accessible")]
    Unreadable {
        /// The file that was being opened
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A row in the backing file does not describe a person.
    #[error("roster record is malformed")]
    Malformed(#[from] csv::Error),

    /// A new person could not be written out.
    #[error("roster file {path} could not be extended")]
    Unwritable {
        /// The file that was being written
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
