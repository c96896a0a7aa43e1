//! Roster infrastructure

pub mod csv;

pub use csv::CsvRoster;
