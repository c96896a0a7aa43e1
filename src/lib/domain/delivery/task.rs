//! One queued unit of delivery work

use std::path::PathBuf;

/// A message to compose and transmit
///
/// Addresses are kept as the raw strings the caller queued; the composer and
/// the envelope resolver decide what is parseable, so a bad address surfaces
/// as a per-task dispatch failure rather than a construction panic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageTask {
    /// The header recipient, possibly decorated (`Name <addr>`)
    pub to: String,

    /// The subject line
    pub subject: String,

    /// The plain-text body; `None` becomes an empty-text fallback part
    pub body: Option<String>,

    /// Paths of files to attach as base64 binary parts
    pub attachments: Vec<PathBuf>,

    /// Blind-copy addresses; delivered but never written into a header
    pub bcc: Vec<String>,

    /// The rich HTML body, if any
    pub html_body: Option<String>,

    /// Paths of media files referenced from the HTML via `cid:` identifiers
    pub inline_media: Vec<PathBuf>,

    /// Carbon-copy addresses; rendered as a comma-joined `Cc` header
    pub cc: Vec<String>,
}

impl MessageTask {
    /// Creates a plain task addressed to a single recipient.
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Sets the plain-text body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the rich HTML body.
    pub fn html_body(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }

    /// Adds one inline media path.
    pub fn inline_media(mut self, path: impl Into<PathBuf>) -> Self {
        self.inline_media.push(path.into());
        self
    }

    /// Adds one file attachment path.
    pub fn attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }

    /// Replaces the carbon-copy list.
    pub fn cc(mut self, cc: Vec<String>) -> Self {
        self.cc = cc;
        self
    }

    /// Replaces the blind-copy list.
    pub fn bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = bcc;
        self
    }
}
