//! Infrastructure layer

pub mod email;
pub mod greetings;
pub mod roster;
