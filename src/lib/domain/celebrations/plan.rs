//! Task-queue assembly
//!
//! Turns today's celebrants into the ordered queue the dispatcher consumes:
//! one personal card per celebrant, then at most one team broadcast. The
//! broadcast goes To the sender with the rest of the roster on CC, so the
//! celebrants (who are on the roster) receive it as visible recipients.

use std::path::PathBuf;

use askama::Template;

use crate::domain::delivery::{MessageTask, SenderIdentity};
use crate::domain::greetings::{Audience, TeamDigestTemplate};
use crate::domain::roster::Person;

use super::errors::CelebrationError;

/// Whether and how the shared team announcement is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BroadcastPolicy {
    /// One announcement, To the sender, CC everyone else on the roster.
    #[default]
    SenderAsPrimary,

    /// Personal cards only.
    Disabled,
}

/// One person celebrating today, with their card already rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Celebrant {
    /// Display name
    pub name: String,

    /// Mail address, as recorded on the roster
    pub email: String,

    /// Rendered card markup; reused verbatim inside the team digest
    pub card_html: String,

    /// Plain-text greeting carried as the card's text alternative
    pub plain_greeting: String,

    /// Portrait path to embed inline, when one is on file
    pub photo: Option<PathBuf>,
}

/// Assembles the full dispatch queue: personal tasks in celebrant order,
/// then the team broadcast when the policy allows one.
pub fn plan_queue(
    celebrants: &[Celebrant],
    roster: &[Person],
    sender: &SenderIdentity,
    policy: BroadcastPolicy,
) -> Result<Vec<MessageTask>, CelebrationError> {
    let mut tasks: Vec<MessageTask> = celebrants.iter().map(personal_task).collect();

    if policy == BroadcastPolicy::SenderAsPrimary {
        if let Some(broadcast) = team_broadcast(celebrants, roster, sender)? {
            tasks.push(broadcast);
        }
    }

    Ok(tasks)
}

/// The private wish sent to one celebrant. No CC, no BCC.
pub fn personal_task(celebrant: &Celebrant) -> MessageTask {
    let audience = Audience::Celebrant {
        name: celebrant.name.clone(),
    };

    let mut task = MessageTask::new(celebrant.email.clone(), audience.subject())
        .body(celebrant.plain_greeting.clone())
        .html_body(celebrant.card_html.clone());

    if let Some(photo) = &celebrant.photo {
        task = task.inline_media(photo.clone());
    }

    task
}

/// The shared announcement: digest of every card, To the sender, CC each
/// distinct roster address except the sender. `None` when the roster yields
/// no addresses at all.
pub fn team_broadcast(
    celebrants: &[Celebrant],
    roster: &[Person],
    sender: &SenderIdentity,
) -> Result<Option<MessageTask>, CelebrationError> {
    let team = team_addresses(roster);
    if team.is_empty() {
        return Ok(None);
    }

    let cc: Vec<String> = team
        .into_iter()
        .filter(|address| !address.eq_ignore_ascii_case(sender.address()))
        .collect();

    let digest = TeamDigestTemplate::new(
        celebrants
            .iter()
            .map(|celebrant| celebrant.card_html.clone())
            .collect(),
    );

    let html = digest.render()?;
    let plain = digest.render_plain().map_err(CelebrationError::PlainText)?;

    let mut task = MessageTask::new(sender.address(), Audience::Team.subject())
        .body(plain)
        .html_body(html)
        .cc(cc);

    for photo in celebrant_photos(celebrants) {
        task = task.inline_media(photo);
    }

    Ok(Some(task))
}

/// Distinct roster addresses, whitespace-trimmed, first-seen order.
fn team_addresses(roster: &[Person]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for person in roster {
        let address = person.email.trim();

        if !address.is_empty() && !seen.iter().any(|known| known == address) {
            seen.push(address.to_string());
        }
    }

    seen
}

/// Distinct celebrant portrait paths, first-seen order.
fn celebrant_photos(celebrants: &[Celebrant]) -> Vec<PathBuf> {
    let mut seen: Vec<PathBuf> = Vec::new();

    for photo in celebrants.iter().filter_map(|c| c.photo.clone()) {
        if !seen.contains(&photo) {
            seen.push(photo);
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use testresult::TestResult;

    use super::*;

    fn sender() -> SenderIdentity {
        SenderIdentity::new("Birthday Bot", "bot@example.com")
    }

    fn celebrant(name: &str, email: &str, photo: Option<&str>) -> Celebrant {
        Celebrant {
            name: name.into(),
            email: email.into(),
            card_html: format!("<div>card for {name}</div>"),
            plain_greeting: format!("Happy Birthday {name}!"),
            photo: photo.map(PathBuf::from),
        }
    }

    fn person(email: &str) -> Person {
        Person {
            name: "Someone".into(),
            email: email.into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone: String::new(),
            skills: String::new(),
            designation: String::new(),
            achievements: String::new(),
            about: String::new(),
            hobbies: String::new(),
            photo: None,
        }
    }

    #[test]
    fn test_personal_task_is_private_and_carries_the_card() {
        let task = personal_task(&celebrant("Ada", "ada@example.com", Some("photos/ada.png")));

        assert_eq!(task.to, "ada@example.com");
        assert_eq!(task.subject, "Happy Birthday, Ada! 🎂");
        assert_eq!(task.body.as_deref(), Some("Happy Birthday Ada!"));
        assert_eq!(task.html_body.as_deref(), Some("<div>card for Ada</div>"));
        assert_eq!(task.inline_media, vec![PathBuf::from("photos/ada.png")]);
        assert!(task.cc.is_empty());
        assert!(task.bcc.is_empty());
    }

    #[test]
    fn test_personal_task_without_portrait_embeds_nothing() {
        let task = personal_task(&celebrant("Ada", "ada@example.com", None));

        assert!(task.inline_media.is_empty());
    }

    #[test]
    fn test_broadcast_goes_to_sender_with_roster_on_cc() -> TestResult {
        let roster = vec![
            person("ada@example.com"),
            person("grace@example.com"),
            person("bot@example.com"),
        ];
        let celebrants = vec![celebrant("Ada", "ada@example.com", None)];

        let task = team_broadcast(&celebrants, &roster, &sender())?.unwrap();

        assert_eq!(task.to, "bot@example.com");
        assert_eq!(task.subject, "Celebrating Birthdays Today!");
        assert_eq!(task.body.as_deref(), Some("Today's Birthday Celebrations!"));
        assert_eq!(task.cc, vec!["ada@example.com", "grace@example.com"]);
        assert!(task.bcc.is_empty());

        Ok(())
    }

    #[test]
    fn test_broadcast_excludes_sender_case_insensitively() -> TestResult {
        let roster = vec![person("BOT@example.com"), person("ada@example.com")];

        let task = team_broadcast(&[], &roster, &sender())?.unwrap();

        assert_eq!(task.cc, vec!["ada@example.com"]);

        Ok(())
    }

    #[test]
    fn test_broadcast_dedupes_roster_addresses_first_seen() -> TestResult {
        let roster = vec![
            person(" ada@example.com "),
            person("grace@example.com"),
            person("ada@example.com"),
        ];

        let task = team_broadcast(&[], &roster, &sender())?.unwrap();

        assert_eq!(task.cc, vec!["ada@example.com", "grace@example.com"]);

        Ok(())
    }

    #[test]
    fn test_broadcast_digest_concatenates_cards_in_order() -> TestResult {
        let celebrants = vec![
            celebrant("Ada", "ada@example.com", None),
            celebrant("Grace", "grace@example.com", None),
        ];
        let roster = vec![person("ada@example.com")];

        let task = team_broadcast(&celebrants, &roster, &sender())?.unwrap();
        let html = task.html_body.unwrap();

        let ada = html.find("card for Ada").unwrap();
        let grace = html.find("card for Grace").unwrap();
        assert!(ada < grace);

        Ok(())
    }

    #[test]
    fn test_broadcast_embeds_each_portrait_once() -> TestResult {
        let celebrants = vec![
            celebrant("Ada", "ada@example.com", Some("photos/shared.png")),
            celebrant("Grace", "grace@example.com", Some("photos/shared.png")),
            celebrant("Edsger", "edsger@example.com", Some("photos/edsger.png")),
        ];
        let roster = vec![person("ada@example.com")];

        let task = team_broadcast(&celebrants, &roster, &sender())?.unwrap();

        assert_eq!(
            task.inline_media,
            vec![
                PathBuf::from("photos/shared.png"),
                PathBuf::from("photos/edsger.png")
            ]
        );

        Ok(())
    }

    #[test]
    fn test_no_roster_addresses_means_no_broadcast() -> TestResult {
        let roster = vec![person(""), person("   ")];

        let task = team_broadcast(&[], &roster, &sender())?;

        assert!(task.is_none());

        Ok(())
    }

    #[test]
    fn test_queue_orders_personal_tasks_before_the_broadcast() -> TestResult {
        let roster = vec![person("ada@example.com"), person("grace@example.com")];
        let celebrants = vec![
            celebrant("Ada", "ada@example.com", None),
            celebrant("Grace", "grace@example.com", None),
        ];

        let tasks = plan_queue(&celebrants, &roster, &sender(), BroadcastPolicy::SenderAsPrimary)?;

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].to, "ada@example.com");
        assert_eq!(tasks[1].to, "grace@example.com");
        assert_eq!(tasks[2].to, "bot@example.com");

        Ok(())
    }

    #[test]
    fn test_disabled_policy_plans_personal_tasks_only() -> TestResult {
        let roster = vec![person("ada@example.com"), person("grace@example.com")];
        let celebrants = vec![celebrant("Ada", "ada@example.com", None)];

        let tasks = plan_queue(&celebrants, &roster, &sender(), BroadcastPolicy::Disabled)?;

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].to, "ada@example.com");

        Ok(())
    }
}
