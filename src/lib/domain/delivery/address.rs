//! Bare-address extraction from possibly-decorated recipient strings

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ADDRESS_REGEX: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// The bare form of an email address, with display-name decoration and
/// surrounding whitespace stripped off.
///
/// Extraction is deliberately lenient: envelope construction must accept
/// whatever a caller queued and decide deliverability later, so this type
/// never fails to parse. [`EmailAddress::is_plausible`] answers whether the
/// bare form looks routable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress {
    address: String,
}

impl EmailAddress {
    /// Extracts the bare address from a raw string such as
    /// `Ada Lovelace <ada@example.com>`, `<ada@example.com>` or
    /// `ada@example.com`.
    pub fn extract(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let (Some(open), Some(close)) = (trimmed.rfind('<'), trimmed.rfind('>')) {
            if open < close {
                return Self {
                    address: trimmed[open + 1..close].trim().to_string(),
                };
            }
        }

        Self {
            address: trimmed.to_string(),
        }
    }

    /// The bare address form, without display-name decoration.
    pub fn bare(&self) -> &str {
        &self.address
    }

    /// True when nothing remained after stripping decoration and whitespace.
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }

    /// True when the bare form matches the local@domain.tld shape.
    pub fn is_plausible(&self) -> bool {
        ADDRESS_REGEX.is_match(&self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bare_address() {
        let address = EmailAddress::extract("ada@example.com");

        assert_eq!(address.bare(), "ada@example.com");
    }

    #[test]
    fn test_extract_decorated_address() {
        let address = EmailAddress::extract("Ada Lovelace <ada@example.com>");

        assert_eq!(address.bare(), "ada@example.com");
    }

    #[test]
    fn test_extract_quoted_display_name() {
        let address = EmailAddress::extract("\"Lovelace, Ada\" <ada@example.com>");

        assert_eq!(address.bare(), "ada@example.com");
    }

    #[test]
    fn test_extract_angle_only_address() {
        let address = EmailAddress::extract("<ada@example.com>");

        assert_eq!(address.bare(), "ada@example.com");
    }

    #[test]
    fn test_extract_trims_whitespace() {
        let address = EmailAddress::extract("  ada@example.com  ");

        assert_eq!(address.bare(), "ada@example.com");
    }

    #[test]
    fn test_decoration_around_nothing_is_empty() {
        let address = EmailAddress::extract("Ada Lovelace <>");

        assert!(address.is_empty());
    }

    #[test]
    fn test_plausibility() {
        assert!(EmailAddress::extract("ada@example.com").is_plausible());
        assert!(!EmailAddress::extract("ada").is_plausible());
        assert!(!EmailAddress::extract("ada@example").is_plausible());
        assert!(!EmailAddress::extract("").is_plausible());
    }
}
