//! Fraud module - risk assessment of reported loan schemes.

mod assessment;
mod schemes;

pub use assessment::{
    FraudAssessment, FraudSignal, RiskLevel, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD,
};
pub use schemes::{find_mentioned_scheme, GovernmentScheme, SCHEMES, SCHEMES_DISCLAIMER};
