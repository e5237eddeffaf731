//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! - `intake` - the guided dialogue (start, submit, cancel, chat routing)
//! - `loan` - stateless eligibility and the EMI calculator

pub mod intake;
pub mod loan;

pub use intake::{
    CancelFormCommand, CancelFormError, CancelFormHandler, CancelFormResult, HandleMessageCommand,
    HandleMessageError, HandleMessageHandler, HandleMessageResult, IntakeContext, IntakeSettings,
    Reply, StartFormCommand, StartFormError, StartFormHandler, StartFormResult,
    SubmitFieldCommand, SubmitFieldError, SubmitFieldHandler, SubmitOutcome, SweepReport,
};
pub use loan::{
    CalculateEmiHandler, CalculateEmiQuery, CheckEligibilityCommand, CheckEligibilityError,
    CheckEligibilityHandler, CheckEligibilityResult,
};
