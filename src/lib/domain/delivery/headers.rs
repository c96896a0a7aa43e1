//! Custom message headers
//!
//! The bulk-mail courtesy trio stamped on every outgoing message, plus the
//! two part-level headers inline media needs (`lettre`'s attachment helper
//! covers regular attachments, but inline parts carry both a Content-ID and
//! a filename on their `inline` disposition).

use lettre::message::header::{Header, HeaderName, HeaderValue};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `Precedence` header; always `bulk` for this bot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Precedence(String);

impl Precedence {
    /// Marks the message as bulk mail.
    pub fn bulk() -> Self {
        Self("bulk".into())
    }
}

impl Header for Precedence {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Precedence")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(Self(s.into()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// `X-Auto-Response-Suppress` header, telling autoresponders to stay quiet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoResponseSuppress(String);

impl AutoResponseSuppress {
    /// Suppresses every category of automatic response.
    pub fn all() -> Self {
        Self("All".into())
    }
}

impl Header for AutoResponseSuppress {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("X-Auto-Response-Suppress")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(Self(s.into()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// `Auto-Submitted` header (RFC 3834).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoSubmitted(String);

impl AutoSubmitted {
    /// Marks the message as generated by an automatic process.
    pub fn auto_generated() -> Self {
        Self("auto-generated".into())
    }
}

impl Header for AutoSubmitted {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Auto-Submitted")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(Self(s.into()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// `Content-ID` header for an inline part, angle-bracketed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineContentId(String);

impl InlineContentId {
    /// Tags a part with the identifier the markup references via `cid:`.
    pub fn new(content_id: &str) -> Self {
        Self(format!("<{content_id}>"))
    }
}

impl Header for InlineContentId {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Content-ID")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(Self(s.into()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}

/// `Content-Disposition: inline` with an explicit filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineDisposition(String);

impl InlineDisposition {
    /// Inline rendering, filed under the given name.
    pub fn new(file_name: &str) -> Self {
        Self(format!("inline; filename=\"{file_name}\""))
    }
}

impl Header for InlineDisposition {
    fn name() -> HeaderName {
        HeaderName::new_from_ascii_str("Content-Disposition")
    }

    fn parse(s: &str) -> Result<Self, BoxError> {
        Ok(Self(s.into()))
    }

    fn display(&self) -> HeaderValue {
        HeaderValue::new(Self::name(), self.0.clone())
    }
}
