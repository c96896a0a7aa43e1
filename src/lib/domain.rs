//! Domain layer

pub mod celebrations;
pub mod delivery;
pub mod greetings;
pub mod roster;
