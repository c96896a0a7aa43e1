//! Multipart message composition
//!
//! Builds the full MIME tree for one task: a `mixed` root holding an
//! `alternative` (plain text, plus a `related` container when a rich body is
//! present, carrying the HTML and its `cid:`-referenced inline media) and any
//! base64 file attachments. Missing or unreadable media never fails a
//! message; those parts are recorded as skipped and left out.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use tracing::warn;
use uuid::Uuid;

use super::errors::ComposeError;
use super::headers::{
    AutoResponseSuppress, AutoSubmitted, InlineContentId, InlineDisposition, Precedence,
};
use super::task::MessageTask;

/// The synthesized display-name/address pair every message is sent from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SenderIdentity {
    display_name: String,
    address: String,
}

impl SenderIdentity {
    /// Creates a sender identity; the address is whitespace-trimmed.
    pub fn new(display_name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            address: address.into().trim().to_string(),
        }
    }

    /// The bare sender address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The display name shown next to the address.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    fn mailbox(&self) -> Result<Mailbox, ComposeError> {
        let address = self
            .address
            .parse()
            .map_err(|source| ComposeError::InvalidSender {
                address: self.address.clone(),
                source,
            })?;

        let name = (!self.display_name.trim().is_empty()).then(|| self.display_name.clone());

        Ok(Mailbox::new(name, address))
    }

    fn message_id_domain(&self) -> &str {
        self.address
            .split_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
            .unwrap_or("localhost")
    }
}

/// The To and Cc mailboxes written into the headers: what recipients see,
/// as opposed to the [`TransportRecipients`](super::TransportRecipients)
/// the session delivers to.
#[derive(Clone, Debug)]
pub struct DisplayRecipients {
    /// The single `To` mailbox.
    pub to: Mailbox,

    /// The `Cc` mailboxes, in header order; empty means no `Cc` header.
    pub cc: Vec<Mailbox>,
}

/// One attachment or inline part left out of an otherwise-sent message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedPart {
    /// The path that could not be embedded.
    pub path: PathBuf,

    /// Why it was left out.
    pub reason: String,
}

impl SkippedPart {
    fn new(path: &Path, reason: String) -> Self {
        Self {
            path: path.to_path_buf(),
            reason,
        }
    }
}

/// A fully-formed message ready for transmission.
///
/// Constructed fresh per task, never mutated afterwards, discarded once
/// serialized onto the wire.
pub struct ComposedMessage {
    message: Message,
    message_id: String,
    display: DisplayRecipients,
    skipped: Vec<SkippedPart>,
}

impl ComposedMessage {
    /// Serializes the message into its RFC 5322 wire form.
    pub fn formatted(&self) -> Vec<u8> {
        self.message.formatted()
    }

    /// The globally unique `Message-ID` this message carries.
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// The header-visible recipients.
    pub fn display_recipients(&self) -> &DisplayRecipients {
        &self.display
    }

    /// Parts that were skipped during composition, with reasons.
    pub fn skipped_parts(&self) -> &[SkippedPart] {
        &self.skipped
    }
}

impl fmt::Debug for ComposedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedMessage")
            .field("message_id", &self.message_id)
            .field("display", &self.display)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

/// Builds [`ComposedMessage`]s for a fixed sender identity.
#[derive(Clone, Debug)]
pub struct MessageComposer {
    sender: SenderIdentity,
}

impl MessageComposer {
    /// Creates a composer sending as the given identity.
    pub fn new(sender: SenderIdentity) -> Self {
        Self { sender }
    }

    /// The identity stamped into each `From` header.
    pub fn sender(&self) -> &SenderIdentity {
        &self.sender
    }

    /// Composes the message for one task.
    ///
    /// Pure apart from filesystem reads of the attachment and inline-media
    /// paths. Only an unparseable sender/recipient or a body-assembly
    /// failure errors; missing media degrades to a skipped part.
    pub fn compose(&self, task: &MessageTask) -> Result<ComposedMessage, ComposeError> {
        let from = self.sender.mailbox()?;
        let to: Mailbox = task
            .to
            .parse()
            .map_err(|source| ComposeError::InvalidRecipient {
                address: task.to.clone(),
                source,
            })?;

        let mut skipped = Vec::new();

        let plain = SinglePart::builder()
            .header(ContentType::TEXT_PLAIN)
            .body(task.body.clone().unwrap_or_default());

        let mut alternative = MultiPart::alternative().singlepart(plain);

        if let Some(html) = &task.html_body {
            let mut related = MultiPart::related().singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(html.clone()),
            );

            for path in &task.inline_media {
                match inline_part(path) {
                    Ok(part) => related = related.singlepart(part),
                    Err(skip) => {
                        warn!(path = %skip.path.display(), reason = %skip.reason, "skipping inline media");
                        skipped.push(skip);
                    }
                }
            }

            alternative = alternative.multipart(related);
        }

        let mut mixed = MultiPart::mixed().multipart(alternative);

        for path in &task.attachments {
            match attachment_part(path) {
                Ok(part) => mixed = mixed.singlepart(part),
                Err(skip) => {
                    warn!(path = %skip.path.display(), reason = %skip.reason, "skipping attachment");
                    skipped.push(skip);
                }
            }
        }

        let message_id = format!(
            "<{}@{}>",
            Uuid::now_v7(),
            self.sender.message_id_domain()
        );

        let mut builder = Message::builder()
            .from(from)
            .to(to.clone())
            .subject(task.subject.clone())
            .date_now()
            .message_id(Some(message_id.clone()))
            .header(Precedence::bulk())
            .header(AutoResponseSuppress::all())
            .header(AutoSubmitted::auto_generated());

        let mut cc = Vec::new();

        for raw in &task.cc {
            if raw.trim().is_empty() {
                continue;
            }

            match raw.parse::<Mailbox>() {
                Ok(mailbox) => {
                    builder = builder.cc(mailbox.clone());
                    cc.push(mailbox);
                }
                Err(error) => {
                    warn!(address = raw.as_str(), %error, "dropping unparseable cc entry");
                }
            }
        }

        let message = builder.multipart(mixed)?;

        Ok(ComposedMessage {
            message,
            message_id,
            display: DisplayRecipients { to, cc },
            skipped,
        })
    }
}

fn inline_part(path: &Path) -> Result<SinglePart, SkippedPart> {
    let body = read_base64_body(path)?;
    let media_type = mime_guess::from_path(path).first_or_octet_stream();
    let content_type = ContentType::parse(media_type.as_ref())
        .map_err(|e| SkippedPart::new(path, format!("media type: {e}")))?;
    let content_id = base_name(path);

    Ok(SinglePart::builder()
        .header(content_type)
        .header(InlineContentId::new(&content_id))
        .header(InlineDisposition::new(&content_id))
        .body(body))
}

fn attachment_part(path: &Path) -> Result<SinglePart, SkippedPart> {
    let body = read_base64_body(path)?;
    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| SkippedPart::new(path, format!("media type: {e}")))?;

    Ok(Attachment::new(base_name(path)).body(body, content_type))
}

fn read_base64_body(path: &Path) -> Result<Body, SkippedPart> {
    let content = fs::read(path).map_err(|e| SkippedPart::new(path, e.to_string()))?;

    Body::new_with_encoding(content, ContentTransferEncoding::Base64)
        .map_err(|_| SkippedPart::new(path, "content not encodable as base64".into()))
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
