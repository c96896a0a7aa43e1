//! Notification audiences

/// Who a notification is addressed to.
#[derive(Debug, PartialEq, Eq)]
pub enum Audience {
    /// The celebrant themselves
    Celebrant {
        /// The celebrant's display name
        name: String,
    },

    /// Everyone on the roster
    Team,
}

impl Audience {
    /// Gets the subject line for this audience.
    pub fn subject(&self) -> String {
        match self {
            Self::Celebrant { name } => format!("Happy Birthday, {name}! 🎂"),
            Self::Team => "Celebrating Birthdays Today!".to_string(),
        }
    }
}
