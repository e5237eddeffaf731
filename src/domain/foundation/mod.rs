//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the locale enum, error types and
//! the state machine trait used across the intake and decision modules.

mod errors;
mod ids;
mod locale;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SessionId, UserId};
pub use locale::Locale;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
