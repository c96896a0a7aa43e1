//! Email infrastructure

pub mod smtp;

pub use smtp::{SmtpConfig, SmtpMailer};
