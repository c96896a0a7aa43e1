//! The daily run: find celebrants, plan the queue, dispatch

pub mod errors;
pub mod plan;
pub mod service;

pub use errors::CelebrationError;
pub use plan::{plan_queue, BroadcastPolicy, Celebrant};
pub use service::{DailyRun, RunReport};
