//! Error taxonomy for composition, envelope resolution, and dispatch

use lettre::address::AddressError;
use thiserror::Error;

/// Pre-flight configuration problems. The batch never starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// No sender address was configured.
    #[error("sender address is not configured")]
    MissingSender,

    /// No username/password credential was configured.
    #[error("smtp credential is not configured")]
    MissingCredential,
}

/// The SMTP session could not be established. Covers connect, the STARTTLS
/// upgrade, and authentication; the blocking transport reports these as one
/// handshake failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The connect/upgrade/login exchange failed outright.
    #[error(transparent)]
    Handshake(anyhow::Error),

    /// The server answered the post-login probe negatively.
    #[error("smtp server declined the session probe")]
    Probe,
}

impl From<lettre::transport::smtp::Error> for SessionError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        SessionError::Handshake(err.into())
    }
}

/// A single message could not be composed.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The sender identity does not form a valid mailbox.
    #[error("sender address {address:?} could not be parsed")]
    InvalidSender {
        /// The configured sender address.
        address: String,
        /// The underlying parse failure.
        #[source]
        source: AddressError,
    },

    /// The task's recipient does not form a valid mailbox.
    #[error("recipient address {address:?} could not be parsed")]
    InvalidRecipient {
        /// The recipient as queued.
        address: String,
        /// The underlying parse failure.
        #[source]
        source: AddressError,
    },

    /// The message body tree could not be assembled.
    #[error("message assembly failed")]
    Assembly(#[from] lettre::error::Error),
}

/// The transport envelope could not be derived for a task.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The sender's bare address is not routable.
    #[error("sender address {address:?} is not routable")]
    InvalidSender {
        /// The configured sender address.
        address: String,
        /// The underlying parse failure.
        #[source]
        source: AddressError,
    },

    /// Every resolved recipient was dropped during address parsing.
    #[error("no deliverable envelope recipients")]
    NoRecipients(#[source] lettre::error::Error),
}

/// The open session refused one message; later tasks still proceed.
#[derive(Debug, Error)]
pub enum TransmitError {
    /// The server rejected the message or the connection failed mid-send.
    #[error(transparent)]
    Refused(anyhow::Error),
}

impl From<lettre::transport::smtp::Error> for TransmitError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        TransmitError::Refused(err.into())
    }
}

/// Why one task failed while the batch carried on.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Composition failed before anything touched the wire.
    #[error("build failed")]
    Build(#[from] ComposeError),

    /// Envelope resolution left nothing deliverable.
    #[error("envelope resolution failed")]
    Envelope(#[from] EnvelopeError),

    /// The transport refused the message.
    #[error("send failed")]
    Send(#[from] TransmitError),
}

/// Fatal dispatch failures; per-task errors never surface here.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Sender identity or credential missing; zero attempts made.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The session handshake failed; zero attempts made.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl TaskError {
    /// Renders the full cause chain for console and log lines.
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);

        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }

        out
    }
}
