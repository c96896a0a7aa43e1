//! Celebration card and digest markup

use anyhow::Result;
use askama::Template;

/// One person's birthday card.
///
/// Renders as a self-contained fragment so the same markup can serve as the
/// body of the personal wish and as one entry in the team digest.
#[derive(Debug, Template)]
#[template(path = "emails/birthday_card.html")]
pub struct BirthdayCardTemplate {
    /// The celebrant's display name
    pub name: String,

    /// The wish shown on the card
    pub message: String,

    /// Content identifier of the embedded portrait, when one is available
    pub photo_cid: Option<String>,
}

impl BirthdayCardTemplate {
    /// Creates a new `BirthdayCardTemplate`.
    pub fn new(name: &str, message: &str, photo_cid: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            photo_cid,
        }
    }

    /// Renders the plain text version of the card.
    pub fn render_plain(&self) -> Result<String> {
        Ok(format!("Happy Birthday {name}!", name = self.name))
    }
}

/// The team-wide digest wrapping every card sent today.
#[derive(Debug, Template)]
#[template(path = "emails/team_digest.html")]
pub struct TeamDigestTemplate {
    /// Pre-rendered card markup, one entry per celebrant
    pub cards: Vec<String>,
}

impl TeamDigestTemplate {
    /// Creates a new `TeamDigestTemplate`.
    pub fn new(cards: Vec<String>) -> Self {
        Self { cards }
    }

    /// Renders the plain text version of the digest.
    pub fn render_plain(&self) -> Result<String> {
        Ok("Today's Birthday Celebrations!".to_string())
    }
}
