//! Message composition, envelope resolution, and batch dispatch
//!
//! The session lifecycle (connect, STARTTLS, authenticate, send N messages,
//! close) is encoded in the types: a [`MailSession`] only exists after
//! [`MailTransport::open_session`] has completed the handshake, transmission
//! requires one, and dropping it closes the connection.

pub mod address;
pub mod composer;
pub mod dispatcher;
pub mod envelope;
pub mod errors;
pub mod headers;
pub mod outcome;
pub mod session;
pub mod task;

pub use address::EmailAddress;
pub use composer::{ComposedMessage, DisplayRecipients, MessageComposer, SenderIdentity, SkippedPart};
pub use dispatcher::BatchDispatcher;
pub use envelope::TransportRecipients;
pub use outcome::{BatchOutcome, DeliveryRecord, DeliveryStatus};
pub use session::{MailSession, MailTransport};
pub use task::MessageTask;
