//! Transport session seam
//!
//! The dispatcher never talks SMTP directly; it goes through these traits so
//! the batch loop can be exercised against mocks. A [`MailSession`] value is
//! proof the handshake succeeded: it can only be obtained from
//! [`MailTransport::open_session`], and dropping it closes the connection.

use lettre::address::Envelope;

#[cfg(test)]
use mockall::mock;

use super::errors::{ConfigurationError, SessionError, TransmitError};

/// An authenticated, open mail session.
pub trait MailSession {
    /// Transmits one serialized message to the envelope's recipients.
    fn transmit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), TransmitError>;
}

/// Opens authenticated sessions toward one configured endpoint.
pub trait MailTransport {
    /// Confirms the sender identity and credential are present, before any
    /// network activity happens.
    fn preflight(&self) -> Result<(), ConfigurationError>;

    /// Connects, upgrades to TLS, authenticates, and probes the session.
    fn open_session(&self) -> Result<Box<dyn MailSession>, SessionError>;
}

#[cfg(test)]
mock! {
    pub MailSession {}

    impl MailSession for MailSession {
        fn transmit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), TransmitError>;
    }
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    impl MailTransport for MailTransport {
        fn preflight(&self) -> Result<(), ConfigurationError>;
        fn open_session(&self) -> Result<Box<dyn MailSession>, SessionError>;
    }
}
