//! Persistence seam for the roster

#[cfg(test)]
use mockall::mock;

use super::errors::RosterError;
use super::person::Person;

/// Backing store for the team roster.
pub trait RosterStore {
    /// Loads every person on the roster, in file order.
    fn load_all(&self) -> Result<Vec<Person>, RosterError>;

    /// Appends one person to the roster.
    fn append(&self, person: &Person) -> Result<(), RosterError>;
}

#[cfg(test)]
mock! {
    pub RosterStore {}

    impl RosterStore for RosterStore {
        fn load_all(&self) -> Result<Vec<Person>, RosterError>;
        fn append(&self, person: &Person) -> Result<(), RosterError>;
    }
}
