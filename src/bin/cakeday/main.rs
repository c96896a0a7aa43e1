#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Daily birthday notification bot

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use cakeday::domain::celebrations::{BroadcastPolicy, DailyRun};
use cakeday::domain::delivery::{BatchDispatcher, MessageComposer};
use cakeday::domain::greetings::{Greeter, GreetingError};
use cakeday::domain::roster::{Person, RosterStore};
use cakeday::infrastructure::email::{SmtpConfig, SmtpMailer};
use cakeday::infrastructure::greetings::JsonWishHistory;
use cakeday::infrastructure::roster::CsvRoster;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(name = "cakeday", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The SMTP configuration
    #[clap(flatten)]
    smtp: SmtpConfig,

    /// The roster file
    #[clap(long, env = "ROSTER_FILE", default_value = "data/roster.csv")]
    roster: PathBuf,

    /// Directory holding portrait photos
    #[clap(long, env = "MEDIA_DIR", default_value = "assets/photos")]
    media_dir: PathBuf,

    /// Ledger of wishes already sent
    #[clap(long, env = "WISH_HISTORY_FILE", default_value = "used_wishes.json")]
    wish_history: PathBuf,

    /// Directory the append-only log file is written to
    #[clap(long, env = "LOG_DIR", default_value = ".")]
    log_dir: PathBuf,

    /// Send personal cards only, skipping the shared team announcement
    #[clap(long)]
    no_team_broadcast: bool,

    /// Run the check for this date instead of today (YYYY-MM-DD)
    #[clap(long)]
    date: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Register a person on the roster
    Add {
        /// Full display name
        #[clap(long)]
        name: String,

        /// Mail address
        #[clap(long)]
        email: String,

        /// Date of birth (YYYY-MM-DD)
        #[clap(long)]
        dob: NaiveDate,

        /// Phone number
        #[clap(long, default_value = "")]
        phone: String,

        /// Job title
        #[clap(long, default_value = "")]
        designation: String,

        /// Comma-separated skills
        #[clap(long, default_value = "")]
        skills: String,

        /// Comma-separated hobbies
        #[clap(long, default_value = "")]
        hobbies: String,

        /// Notable achievements
        #[clap(long, default_value = "")]
        achievements: String,

        /// Short personal blurb
        #[clap(long, default_value = "")]
        about: String,

        /// Portrait photo to copy into the media directory
        #[clap(long)]
        photo: Option<PathBuf>,
    },
}

#[mutants::skip]
fn main() -> Result<()> {
    // Environment may come from the shell rather than a .env file.
    let _ = dotenvy::dotenv();

    let mut args = Args::parse();

    setup_logging(&args.log_dir);

    match args.command.take() {
        Some(Commands::Add {
            name,
            email,
            dob,
            phone,
            designation,
            skills,
            hobbies,
            achievements,
            about,
            photo,
        }) => {
            let photo = match photo {
                Some(source) => Some(import_photo(&args.media_dir, &name, &source)?),
                None => None,
            };

            let person = Person {
                name,
                email,
                date_of_birth: dob,
                phone,
                skills,
                designation,
                achievements,
                about,
                hobbies,
                photo,
            };

            cmd_add(&args.roster, &person)
        }
        None => cmd_daily(args),
    }
}

/// Set up tracing with stderr output and an append-only log file.
fn setup_logging(log_dir: &Path) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if std::fs::create_dir_all(log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(log_dir, "cakeday.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Run the daily check and exit 1 when any message failed.
fn cmd_daily(args: Args) -> Result<()> {
    let mailer = SmtpMailer::new(args.smtp);
    let composer = MessageComposer::new(mailer.sender_identity());
    let dispatcher = BatchDispatcher::new(mailer, composer);

    // No external wish service is shipped; any function over a person can
    // be plugged in here, so every wish comes from the stock pool for now.
    let greeter = Greeter::<fn(&Person) -> Result<String, GreetingError>, _>::new(
        None,
        JsonWishHistory::new(&args.wish_history),
    );

    let policy = if args.no_team_broadcast {
        BroadcastPolicy::Disabled
    } else {
        BroadcastPolicy::SenderAsPrimary
    };

    let run = DailyRun::new(
        CsvRoster::new(&args.roster),
        greeter,
        dispatcher,
        &args.media_dir,
        policy,
    );

    let today = args.date.unwrap_or_else(|| Local::now().date_naive());

    match run.run(today) {
        Ok(report) if report.succeeded() => Ok(()),
        Ok(_) => std::process::exit(1),
        Err(error) => {
            tracing::error!("daily run aborted: {error:#}");
            println!("[Critical Error] {error}");
            std::process::exit(1);
        }
    }
}

/// Append a person to the roster.
fn cmd_add(roster: &Path, person: &Person) -> Result<()> {
    CsvRoster::new(roster)
        .append(person)
        .with_context(|| format!("could not register {}", person.name))?;

    println!("[Success] {} registered on the roster.", person.name);

    Ok(())
}

/// Copy a portrait into the media directory under a name derived from the
/// person, returning the stored file name.
fn import_photo(media_dir: &Path, name: &str, source: &Path) -> Result<String> {
    let extension = source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let file_name = format!("{}{extension}", name.replace(' ', "_").to_lowercase());

    std::fs::create_dir_all(media_dir)
        .with_context(|| format!("could not create {}", media_dir.display()))?;
    std::fs::copy(source, media_dir.join(&file_name))
        .with_context(|| format!("could not import {}", source.display()))?;

    Ok(file_name)
}
