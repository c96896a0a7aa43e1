//! Single-session batch dispatch

use tracing::{error, info};

use super::composer::MessageComposer;
use super::envelope::TransportRecipients;
use super::errors::{DispatchError, TaskError};
use super::outcome::{BatchOutcome, DeliveryRecord, DeliveryStatus};
use super::session::{MailSession, MailTransport};
use super::task::MessageTask;

/// Dispatches an ordered task queue over one SMTP session.
#[derive(Debug)]
pub struct BatchDispatcher<T: MailTransport> {
    transport: T,
    composer: MessageComposer,
}

impl<T: MailTransport> BatchDispatcher<T> {
    /// Creates a dispatcher for the given transport and sender identity.
    pub fn new(transport: T, composer: MessageComposer) -> Self {
        Self {
            transport,
            composer,
        }
    }

    /// The identity every dispatched message is sent from.
    pub fn sender(&self) -> &super::composer::SenderIdentity {
        self.composer.sender()
    }

    /// Sends every task over one session, strictly in input order.
    ///
    /// Per-task failures are absorbed into the [`BatchOutcome`]; only
    /// configuration and session-establishment failures escape, both before
    /// any transmission is attempted. The session is released on every exit
    /// path. An empty queue is vacuously successful and opens no session.
    pub fn dispatch_all(&self, tasks: &[MessageTask]) -> Result<BatchOutcome, DispatchError> {
        self.transport.preflight()?;

        let mut outcome = BatchOutcome::new();

        if tasks.is_empty() {
            return Ok(outcome);
        }

        let mut session = self.transport.open_session().map_err(|error| {
            error!(%error, "smtp session could not be established");
            DispatchError::Session(error)
        })?;

        for task in tasks {
            let status = match self.attempt(session.as_mut(), task) {
                Ok(extra_recipients) => {
                    info!(
                        recipient = task.to.as_str(),
                        extra_recipients, "message accepted"
                    );
                    DeliveryStatus::Sent { extra_recipients }
                }
                Err(task_error) => {
                    let reason = task_error.describe();
                    error!(
                        recipient = task.to.as_str(),
                        reason = reason.as_str(),
                        "message not delivered"
                    );
                    DeliveryStatus::Failed { reason }
                }
            };

            let record = DeliveryRecord {
                recipient: task.to.clone(),
                subject: task.subject.clone(),
                status,
            };

            println!("   {}", record.console_line());
            outcome.push(record);
        }

        Ok(outcome)
    }

    fn attempt(&self, session: &mut dyn MailSession, task: &MessageTask) -> Result<usize, TaskError> {
        let message = self.composer.compose(task)?;
        let recipients = TransportRecipients::resolve(&task.to, &task.cc, &task.bcc);
        let envelope = recipients.to_envelope(self.composer.sender().address())?;

        session.transmit(&envelope, &message.formatted())?;

        Ok(recipients.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use mockall::Sequence;
    use testresult::TestResult;

    use super::super::composer::SenderIdentity;
    use super::super::errors::{ConfigurationError, SessionError, TransmitError};
    use super::super::session::{MockMailSession, MockMailTransport};
    use super::*;

    fn dispatcher(transport: MockMailTransport) -> BatchDispatcher<MockMailTransport> {
        BatchDispatcher::new(
            transport,
            MessageComposer::new(SenderIdentity::new("Birthday Bot", "bot@example.com")),
        )
    }

    fn task(to: &str) -> MessageTask {
        MessageTask::new(to, "Happy Birthday!").body("plain")
    }

    fn transport_opening(session: MockMailSession) -> MockMailTransport {
        let mut transport = MockMailTransport::new();
        transport.expect_preflight().times(1).returning(|| Ok(()));
        transport.expect_open_session().times(1).return_once(move || {
            let session: Box<dyn MailSession> = Box::new(session);
            Ok(session)
        });
        transport
    }

    #[test]
    fn test_every_task_attempted_once_in_input_order() -> TestResult {
        let mut session = MockMailSession::new();
        let mut order = Sequence::new();

        for expected in ["a@x.com", "b@x.com", "c@x.com"] {
            session
                .expect_transmit()
                .times(1)
                .in_sequence(&mut order)
                .withf(move |envelope, _| envelope.to()[0].to_string() == expected)
                .returning(|_, _| Ok(()));
        }

        let outcome = dispatcher(transport_opening(session))
            .dispatch_all(&[task("a@x.com"), task("b@x.com"), task("c@x.com")])?;

        assert!(outcome.all_sent());
        assert_eq!(outcome.sent_count(), 3);

        Ok(())
    }

    #[test]
    fn test_one_failure_does_not_abort_remaining_tasks() -> TestResult {
        let mut session = MockMailSession::new();
        session
            .expect_transmit()
            .times(3)
            .returning(|envelope, _| {
                if envelope.to()[0].to_string() == "b@x.com" {
                    Err(TransmitError::Refused(anyhow!("550 mailbox unavailable")))
                } else {
                    Ok(())
                }
            });

        let outcome = dispatcher(transport_opening(session))
            .dispatch_all(&[task("a@x.com"), task("b@x.com"), task("c@x.com")])?;

        assert!(!outcome.all_sent());
        assert_eq!(outcome.sent_count(), 2);
        assert_eq!(outcome.failed_count(), 1);

        let lines: Vec<String> = outcome.records().iter().map(|r| r.console_line()).collect();
        assert!(lines[0].starts_with("[OK] "));
        assert!(lines[1].starts_with("[FAIL] b@x.com: send failed"));
        assert!(lines[2].starts_with("[OK] "));

        Ok(())
    }

    #[test]
    fn test_session_failure_yields_zero_attempts() {
        let mut transport = MockMailTransport::new();
        transport.expect_preflight().times(1).returning(|| Ok(()));
        transport
            .expect_open_session()
            .times(1)
            .returning(|| Err(SessionError::Probe));

        let queue: Vec<MessageTask> = (0..5).map(|i| task(&format!("p{i}@x.com"))).collect();

        let result = dispatcher(transport).dispatch_all(&queue);

        assert!(matches!(result, Err(DispatchError::Session(_))));
    }

    #[test]
    fn test_missing_credential_aborts_before_connecting() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_preflight()
            .times(1)
            .returning(|| Err(ConfigurationError::MissingCredential));
        transport.expect_open_session().never();

        let result = dispatcher(transport).dispatch_all(&[task("a@x.com")]);

        assert!(matches!(result, Err(DispatchError::Configuration(_))));
    }

    #[test]
    fn test_empty_queue_succeeds_without_a_session() -> TestResult {
        let mut transport = MockMailTransport::new();
        transport.expect_preflight().times(1).returning(|| Ok(()));
        transport.expect_open_session().never();

        let outcome = dispatcher(transport).dispatch_all(&[])?;

        assert!(outcome.all_sent());
        assert!(outcome.records().is_empty());

        Ok(())
    }

    #[test]
    fn test_unbuildable_task_fails_without_touching_the_wire() -> TestResult {
        let session = MockMailSession::new();

        let outcome =
            dispatcher(transport_opening(session)).dispatch_all(&[task("not an address")])?;

        assert!(!outcome.all_sent());
        assert_eq!(outcome.failed_count(), 1);
        assert!(outcome.records()[0]
            .console_line()
            .starts_with("[FAIL] not an address: build failed"));

        Ok(())
    }

    #[test]
    fn test_blind_copies_ride_in_the_envelope_only() -> TestResult {
        let mut session = MockMailSession::new();
        session
            .expect_transmit()
            .times(1)
            .withf(|envelope, message| {
                let delivered: Vec<String> =
                    envelope.to().iter().map(|a| a.to_string()).collect();
                let headers = String::from_utf8_lossy(message);

                delivered == ["ada@example.com", "hidden@example.com"]
                    && !headers.contains("hidden@example.com")
            })
            .returning(|_, _| Ok(()));

        let queued = task("ada@example.com").bcc(vec!["hidden@example.com".into()]);

        let outcome = dispatcher(transport_opening(session)).dispatch_all(&[queued])?;

        assert_eq!(outcome.sent_count(), 1);
        assert_eq!(
            outcome.records()[0].console_line(),
            "[OK] Happy Birthday!... -> ada@example.com (+1 CC/BCC)"
        );

        Ok(())
    }
}
