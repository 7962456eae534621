//! Core services.
//!
//! Services orchestrate ports and domain logic. They hold no transport or
//! presentation code.

pub mod notifier;
pub mod scheduler;

pub use notifier::{
    CheckOutcome, NotifierDeps, NotifierStatus, UpdateNotifier, UpdateOutcome,
};
pub use scheduler::{PollScheduler, SchedulerHandle, Visibility, VisibilitySignal};
