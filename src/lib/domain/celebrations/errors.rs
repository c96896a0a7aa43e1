//! Daily-run errors

use thiserror::Error;

use crate::domain::delivery::errors::DispatchError;
use crate::domain::roster::RosterError;

/// Errors that abort a daily run before or during dispatch.
///
/// Per-task delivery failures never surface here; they live in the
/// [`BatchOutcome`](crate::domain::delivery::BatchOutcome) records.
#[derive(Debug, Error)]
pub enum CelebrationError {
    /// The roster could not be loaded.
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Card or digest markup could not be rendered.
    #[error("celebration markup could not be rendered")]
    Render(#[from] askama::Error),

    /// A plain-text body could not be rendered.
    #[error("plain-text body could not be rendered")]
    PlainText(#[source] anyhow::Error),

    /// The batch never started: configuration or session failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
