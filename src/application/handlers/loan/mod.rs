//! Loan handlers - decisions and calculators outside the dialogue.

mod calculate_emi;
mod check_eligibility;

pub use calculate_emi::{CalculateEmiHandler, CalculateEmiQuery};
pub use check_eligibility::{
    CheckEligibilityCommand, CheckEligibilityError, CheckEligibilityHandler, CheckEligibilityResult,
};
