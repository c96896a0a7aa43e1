//! Daily-run orchestration

use std::path::PathBuf;

use askama::Template;
use chrono::NaiveDate;
use tracing::{error, info};

use crate::domain::delivery::{BatchDispatcher, BatchOutcome, MailTransport};
use crate::domain::greetings::{BirthdayCardTemplate, Greeter, WishHistory, WishSource};
use crate::domain::roster::{Person, RosterStore};

use super::errors::CelebrationError;
use super::plan::{plan_queue, BroadcastPolicy, Celebrant};

/// What one daily run amounted to.
#[derive(Debug)]
pub struct RunReport {
    /// How many people celebrated today.
    pub celebrant_count: usize,

    /// The dispatch outcome; `None` when nothing was queued.
    pub outcome: Option<BatchOutcome>,
}

impl RunReport {
    /// True when every queued message was accepted, vacuously so when
    /// nothing was queued.
    pub fn succeeded(&self) -> bool {
        self.outcome.as_ref().map_or(true, BatchOutcome::all_sent)
    }
}

/// The whole daily workflow: load the roster, filter celebrants, pick a
/// wish and render a card per celebrant, plan the queue, dispatch it over
/// one session, and report.
#[derive(Debug)]
pub struct DailyRun<S, W, H, T>
where
    S: RosterStore,
    W: WishSource,
    H: WishHistory,
    T: MailTransport,
{
    store: S,
    greeter: Greeter<W, H>,
    dispatcher: BatchDispatcher<T>,
    media_dir: PathBuf,
    policy: BroadcastPolicy,
}

impl<S, W, H, T> DailyRun<S, W, H, T>
where
    S: RosterStore,
    W: WishSource,
    H: WishHistory,
    T: MailTransport,
{
    /// Creates the daily-run service. Portrait files named on the roster
    /// are looked up under `media_dir`.
    pub fn new(
        store: S,
        greeter: Greeter<W, H>,
        dispatcher: BatchDispatcher<T>,
        media_dir: impl Into<PathBuf>,
        policy: BroadcastPolicy,
    ) -> Self {
        Self {
            store,
            greeter,
            dispatcher,
            media_dir: media_dir.into(),
            policy,
        }
    }

    /// Runs the check for `today`, narrating progress on stdout.
    ///
    /// A day without celebrants queues nothing and opens no session. Only
    /// roster, rendering, configuration, and session failures escape;
    /// per-message failures stay inside the report's outcome records.
    pub fn run(&self, today: NaiveDate) -> Result<RunReport, CelebrationError> {
        println!("--- Birthday Bot: Daily Execution ---");

        let roster = self.store.load_all()?;
        let celebrating: Vec<&Person> = roster
            .iter()
            .filter(|person| person.celebrates_on(today))
            .collect();

        if celebrating.is_empty() {
            println!("[Status] No birthdays found for today. Exiting.");
            info!(%today, "no birthdays today");

            return Ok(RunReport {
                celebrant_count: 0,
                outcome: None,
            });
        }

        println!("[Status] Found {} birthday(s) today.", celebrating.len());

        let mut celebrants = Vec::with_capacity(celebrating.len());

        for person in &celebrating {
            celebrants.push(self.celebrant(person)?);
            println!(" > Queued personal wish for: {}", person.name);
        }

        let tasks = plan_queue(&celebrants, &roster, self.dispatcher.sender(), self.policy)?;

        if tasks.len() > celebrants.len() {
            let broadcast = &tasks[tasks.len() - 1];
            info!(
                cc_recipients = broadcast.cc.len(),
                "team notification queued"
            );
            println!(
                " > Queued one team announcement with {} CC recipients.",
                broadcast.cc.len()
            );
        }

        println!(
            "\n[Delivery] Opening secure SMTP connection for {} messages...",
            tasks.len()
        );

        let outcome = self.dispatcher.dispatch_all(&tasks)?;

        if outcome.all_sent() {
            println!("[Success] All notifications dispatched successfully.");
            info!(sent = outcome.sent_count(), "batch dispatched");
        } else {
            println!("[Error] Some or all emails failed to send. Check logs.");
            error!(
                sent = outcome.sent_count(),
                failed = outcome.failed_count(),
                "batch incomplete"
            );
        }

        Ok(RunReport {
            celebrant_count: celebrants.len(),
            outcome: Some(outcome),
        })
    }

    fn celebrant(&self, person: &Person) -> Result<Celebrant, CelebrationError> {
        let wish = self.greeter.greeting_for(person);
        let photo_cid = person.photo_file().map(str::to_string);
        let card = BirthdayCardTemplate::new(&person.name, &wish, photo_cid);

        Ok(Celebrant {
            name: person.name.clone(),
            email: person.email.clone(),
            card_html: card.render()?,
            plain_greeting: card.render_plain().map_err(CelebrationError::PlainText)?,
            photo: person.photo_file().map(|file| self.media_dir.join(file)),
        })
    }
}
