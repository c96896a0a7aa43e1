//! SMTP transport implementation
//!
//! The blocking `lettre` transport behind the [`MailTransport`] seam:
//! opening a session connects, upgrades with STARTTLS, authenticates, and
//! probes the server with a NOOP before any message is handed over.

use clap::Parser;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{address::Envelope, SmtpTransport, Transport};
use tracing::debug;

use crate::domain::delivery::errors::{ConfigurationError, SessionError, TransmitError};
use crate::domain::delivery::{MailSession, MailTransport, SenderIdentity};

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_SERVER", default_value = "smtp.gmail.com")]
    pub server: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The sender email address, also used as the login username
    #[clap(long, env = "SENDER_EMAIL", default_value = "")]
    pub sender_email: String,

    /// The sender password
    #[clap(long, env = "SENDER_PASSWORD", default_value = "")]
    pub sender_password: String,

    /// The display name shown next to the sender address
    #[clap(long, env = "SENDER_NAME", default_value = "Birthday Bot")]
    pub sender_name: String,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

/// SMTP mailer
#[derive(Clone, Debug)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Creates a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// The identity stamped into every `From` header.
    pub fn sender_identity(&self) -> SenderIdentity {
        SenderIdentity::new(
            self.config.sender_name.clone(),
            self.config.sender_email.clone(),
        )
    }

    fn relay(&self) -> Result<SmtpTransport, SessionError> {
        let creds = Credentials::new(
            self.config.sender_email.clone(),
            self.config.sender_password.clone(),
        );

        let relay = if self.config.starttls {
            SmtpTransport::starttls_relay(&self.config.server)?
        } else {
            SmtpTransport::relay(&self.config.server)?
        };

        Ok(relay
            .credentials(creds)
            .port(self.config.port)
            .tls(Tls::Opportunistic(
                TlsParameters::builder(self.config.server.to_string())
                    .dangerous_accept_invalid_certs(!self.config.verify_tls)
                    .build()?,
            ))
            .build())
    }
}

impl MailTransport for SmtpMailer {
    fn preflight(&self) -> Result<(), ConfigurationError> {
        if self.config.sender_email.trim().is_empty() {
            return Err(ConfigurationError::MissingSender);
        }

        if self.config.sender_password.is_empty() {
            return Err(ConfigurationError::MissingCredential);
        }

        Ok(())
    }

    fn open_session(&self) -> Result<Box<dyn MailSession>, SessionError> {
        let transport = self.relay()?;

        debug!(
            server = self.config.server.as_str(),
            port = self.config.port,
            "probing smtp session"
        );

        if !transport.test_connection()? {
            return Err(SessionError::Probe);
        }

        Ok(Box::new(SmtpSession { transport }))
    }
}

/// One open, authenticated connection. Dropping it closes the connection.
struct SmtpSession {
    transport: SmtpTransport,
}

impl MailSession for SmtpSession {
    fn transmit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), TransmitError> {
        self.transport.send_raw(envelope, message)?;

        Ok(())
    }
}
