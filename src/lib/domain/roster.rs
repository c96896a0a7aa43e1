//! Team roster: people, their celebration dates, and the store seam

pub mod errors;
pub mod person;
pub mod store;

pub use errors::RosterError;
pub use person::Person;
pub use store::RosterStore;
