//! CSV-backed roster store
//!
//! One row per person under a fixed header line. The file is created with
//! its headers on first use; new people are appended without rewriting the
//! rows already there.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use tracing::info;

use crate::domain::roster::{Person, RosterError, RosterStore};

const HEADERS: [&str; 10] = [
    "Name",
    "email",
    "dob",
    "phoneno",
    "skills",
    "designation",
    "achievements",
    "about",
    "hobbies",
    "image0",
];

/// Roster persisted as a CSV file.
#[derive(Clone, Debug)]
pub struct CsvRoster {
    path: PathBuf,
}

impl CsvRoster {
    /// Creates a store backed by the file at `path`. Nothing is touched
    /// until the first load or append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_file(&self) -> Result<(), RosterError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RosterError::Unwritable {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let file = File::create(&self.path).map_err(|source| RosterError::Unwritable {
            path: self.path.clone(),
            source,
        })?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(HEADERS)?;
        writer.flush().map_err(|source| RosterError::Unwritable {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), "created new roster file");

        Ok(())
    }
}

impl RosterStore for CsvRoster {
    fn load_all(&self) -> Result<Vec<Person>, RosterError> {
        self.ensure_file()?;

        let file = File::open(&self.path).map_err(|source| RosterError::Unreadable {
            path: self.path.clone(),
            source,
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut people = Vec::new();

        for record in reader.deserialize() {
            people.push(record?);
        }

        Ok(people)
    }

    fn append(&self, person: &Person) -> Result<(), RosterError> {
        self.ensure_file()?;

        let file = OpenOptions::new().append(true).open(&self.path).map_err(|source| {
            RosterError::Unwritable {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(person)?;
        writer.flush().map_err(|source| RosterError::Unwritable {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}
