//! A person on the team roster

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One roster entry.
///
/// Field names mirror the roster file's column headers, which predate this
/// program; the serde renames keep existing files loadable.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Person {
    /// Full display name
    #[serde(rename = "Name")]
    pub name: String,

    /// Mail address, as recorded
    pub email: String,

    /// Date of birth
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,

    /// Phone number, free-form
    #[serde(rename = "phoneno", default)]
    pub phone: String,

    /// Comma-separated skills
    #[serde(default)]
    pub skills: String,

    /// Job title
    #[serde(default)]
    pub designation: String,

    /// Notable achievements, free-form
    #[serde(default)]
    pub achievements: String,

    /// Short personal blurb
    #[serde(default)]
    pub about: String,

    /// Comma-separated hobbies
    #[serde(default)]
    pub hobbies: String,

    /// File name of the portrait photo, relative to the media directory
    #[serde(rename = "image0", default)]
    pub photo: Option<String>,
}

impl Person {
    /// Whether this person's celebration falls on `today`.
    ///
    /// A February 29 birthday is observed on February 29 in leap years and on
    /// February 28 otherwise, so leapling entries are honored exactly once
    /// every year.
    pub fn celebrates_on(&self, today: NaiveDate) -> bool {
        let born = self.date_of_birth;

        if born.month() == 2 && born.day() == 29 {
            let observed_day = if NaiveDate::from_ymd_opt(today.year(), 2, 29).is_some() {
                29
            } else {
                28
            };
            return today.month() == 2 && today.day() == observed_day;
        }

        today.month() == born.month() && today.day() == born.day()
    }

    /// The portrait file name, if one is usefully recorded.
    ///
    /// Whitespace-only entries count as absent.
    pub fn photo_file(&self) -> Option<&str> {
        self.photo
            .as_deref()
            .map(str::trim)
            .filter(|file| !file.is_empty())
    }
}
