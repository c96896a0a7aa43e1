//! Transport-level recipient resolution
//!
//! What the session delivers to is not what the headers display: blind-copy
//! addresses are delivered but never written into a header, and an address
//! listed under both CC and BCC must receive exactly one copy.

use lettre::address::{Address, Envelope};
use tracing::warn;

use super::address::EmailAddress;
use super::errors::EnvelopeError;

/// The ordered, deduplicated set of bare addresses one message is sent to.
///
/// Built from the header recipient, then the CC list, then the BCC list;
/// first-seen order is kept, duplicates (by bare form, whitespace-trimmed,
/// case-sensitive) are suppressed, and anything that trims to empty after
/// stripping display-name decoration is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRecipients(Vec<EmailAddress>);

impl TransportRecipients {
    /// Resolves the delivery set for one task.
    pub fn resolve(header_recipient: &str, cc: &[String], bcc: &[String]) -> Self {
        let mut seen: Vec<EmailAddress> = Vec::new();

        let raw_order = std::iter::once(header_recipient)
            .chain(cc.iter().map(String::as_str))
            .chain(bcc.iter().map(String::as_str));

        for raw in raw_order {
            let address = EmailAddress::extract(raw);

            if address.is_empty() {
                continue;
            }

            if !seen.iter().any(|known| known.bare() == address.bare()) {
                seen.push(address);
            }
        }

        Self(seen)
    }

    /// Number of addresses the transport will deliver to.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing survived resolution.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the resolved addresses in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &EmailAddress> {
        self.0.iter()
    }

    /// Converts the set into an SMTP envelope with the given reverse path.
    ///
    /// Entries that do not look routable, or that fail strict address
    /// parsing, are dropped with a warning; the conversion only errors when
    /// the sender is unroutable or nothing deliverable survives.
    pub fn to_envelope(&self, sender: &str) -> Result<Envelope, EnvelopeError> {
        let reverse_path =
            sender
                .parse::<Address>()
                .map_err(|source| EnvelopeError::InvalidSender {
                    address: sender.to_string(),
                    source,
                })?;

        let mut forward_paths = Vec::with_capacity(self.0.len());

        for recipient in &self.0 {
            if !recipient.is_plausible() {
                warn!(recipient = recipient.bare(), "dropping implausible envelope recipient");
                continue;
            }

            match recipient.bare().parse::<Address>() {
                Ok(address) => forward_paths.push(address),
                Err(error) => {
                    warn!(recipient = recipient.bare(), %error, "dropping unroutable envelope recipient");
                }
            }
        }

        Envelope::new(Some(reverse_path), forward_paths).map_err(EnvelopeError::NoRecipients)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn bare_list(recipients: &TransportRecipients) -> Vec<&str> {
        recipients.iter().map(|a| a.bare()).collect()
    }

    #[test]
    fn test_resolve_suppresses_cc_bcc_overlap() {
        let recipients = TransportRecipients::resolve(
            "a@x.com",
            &["b@x.com".into()],
            &["a@x.com".into(), "b@x.com".into()],
        );

        assert_eq!(bare_list(&recipients), vec!["a@x.com", "b@x.com"]);
        assert_eq!(recipients.len(), 2);
    }

    #[test]
    fn test_resolve_keeps_first_seen_order() {
        let recipients = TransportRecipients::resolve(
            "to@x.com",
            &["cc1@x.com".into(), "cc2@x.com".into()],
            &["bcc@x.com".into()],
        );

        assert_eq!(
            bare_list(&recipients),
            vec!["to@x.com", "cc1@x.com", "cc2@x.com", "bcc@x.com"]
        );
    }

    #[test]
    fn test_resolve_dedupes_across_decoration() {
        let recipients =
            TransportRecipients::resolve("Ada Lovelace <a@x.com>", &[" a@x.com ".into()], &[]);

        assert_eq!(bare_list(&recipients), vec!["a@x.com"]);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let recipients = TransportRecipients::resolve("A@x.com", &["a@x.com".into()], &[]);

        assert_eq!(recipients.len(), 2);
    }

    #[test]
    fn test_resolve_drops_empty_addresses() {
        let recipients = TransportRecipients::resolve(
            "Ada <>",
            &["".into(), "b@x.com".into()],
            &["   ".into()],
        );

        assert_eq!(bare_list(&recipients), vec!["b@x.com"]);
    }

    #[test]
    fn test_to_envelope_drops_unroutable_entries() -> TestResult {
        let recipients =
            TransportRecipients::resolve("a@x.com", &["not-an-address".into()], &["b@x.com".into()]);

        let envelope = recipients.to_envelope("bot@x.com")?;

        assert_eq!(envelope.to().len(), 2);

        Ok(())
    }

    #[test]
    fn test_to_envelope_requires_a_dotted_domain() -> TestResult {
        let recipients = TransportRecipients::resolve(
            "a@x.com",
            &["ada@localhost".into(), "b@x.com".into()],
            &[],
        );

        let envelope = recipients.to_envelope("bot@x.com")?;

        let delivered: Vec<String> = envelope.to().iter().map(|a| a.to_string()).collect();
        assert_eq!(delivered, ["a@x.com", "b@x.com"]);

        Ok(())
    }

    #[test]
    fn test_to_envelope_with_nothing_deliverable_is_an_error() {
        let recipients = TransportRecipients::resolve("not-an-address", &[], &[]);

        let result = recipients.to_envelope("bot@x.com");

        assert!(matches!(result, Err(EnvelopeError::NoRecipients(_))));
    }

    #[test]
    fn test_to_envelope_with_bad_sender_is_an_error() {
        let recipients = TransportRecipients::resolve("a@x.com", &[], &[]);

        let result = recipients.to_envelope("not-an-address");

        assert!(matches!(result, Err(EnvelopeError::InvalidSender { .. })));
    }
}
