//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, locale, errors)
//! - `intake` - Guided forms: field rules, dialogue state machine, sessions
//! - `decision` - Loan eligibility pipeline and financial terms
//! - `fraud` - Rule-based risk assessment of reported schemes
//! - `messages` - Localized prompts and result rendering

pub mod decision;
pub mod foundation;
pub mod fraud;
pub mod intake;
pub mod messages;
