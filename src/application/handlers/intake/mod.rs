//! Intake handlers - the guided dialogue.
//!
//! One handler per user action; `handle_message` routes raw chat text
//! onto the others.

mod cancel_form;
mod context;
mod handle_message;
mod start_form;
mod submit_field;

pub use cancel_form::{CancelFormCommand, CancelFormError, CancelFormHandler, CancelFormResult};
pub use context::{IntakeContext, IntakeSettings, SweepReport};
pub use handle_message::{
    HandleMessageCommand, HandleMessageError, HandleMessageHandler, HandleMessageResult, Reply,
};
pub use start_form::{StartFormCommand, StartFormError, StartFormHandler, StartFormResult};
pub use submit_field::{SubmitFieldCommand, SubmitFieldError, SubmitFieldHandler, SubmitOutcome};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::{IntakeContext, IntakeSettings};
    use crate::adapters::storage::{InMemoryPreferenceStore, InMemorySessionStore};
    use crate::application::UserLocks;

    /// Loan answers of an applicant the fallback model approves.
    pub const SCENARIO_A: [&str; 11] = [
        "Graduate", "No", "1", "1200000", "3000000", "10", "780", "5000000", "2000000", "1800000",
        "2000000",
    ];

    pub fn context() -> IntakeContext {
        IntakeContext::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryPreferenceStore::new()),
            UserLocks::new(),
            IntakeSettings::default(),
        )
    }
}
