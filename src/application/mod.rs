//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers hold a user's lock only while that user's session is read or
//! written.

pub mod handlers;
mod reply_dispatcher;
mod user_locks;

pub use handlers::{
    // Intake
    CancelFormCommand, CancelFormError, CancelFormHandler, CancelFormResult,
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult,
    IntakeContext, IntakeSettings, Reply, SweepReport,
    StartFormCommand, StartFormError, StartFormHandler, StartFormResult,
    SubmitFieldCommand, SubmitFieldError, SubmitFieldHandler, SubmitOutcome,
    // Loan
    CalculateEmiHandler, CalculateEmiQuery,
    CheckEligibilityCommand, CheckEligibilityError, CheckEligibilityHandler, CheckEligibilityResult,
};
pub use reply_dispatcher::{DispatchReport, ReplyDispatcher};
pub use user_locks::UserLocks;
