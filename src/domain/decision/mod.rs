//! Decision module - loan eligibility and terms.
//!
//! - `tenure` - years/months reconciliation
//! - `features` - model feature vector, ordered by the model's own columns
//! - `finance` - interest tier, recommended amount, EMI
//! - `pipeline` - orchestration against the classifier port

mod errors;
mod features;
mod finance;
mod pipeline;
mod result;
mod tenure;

pub use errors::DecisionError;
pub use features::{DecisionRequest, FeatureName};
pub use finance::{
    monthly_emi, recommended_amount, round2, EmiBreakdown, InterestTier, INCOME_MULTIPLIER,
};
pub use pipeline::DecisionPipeline;
pub use result::DecisionResult;
pub use tenure::{ReconciledTenure, MODEL_TENURE_MAX_YEARS, MODEL_TENURE_MIN_YEARS};
