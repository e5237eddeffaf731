//! HTTP DTOs for the loan endpoints.
//!
//! Field names follow the public loan API (`income_annum`, `cibil_score`,
//! ...). `loan_term` is in years, like the dialogue's tenure question.

use serde::{Deserialize, Serialize};

use crate::application::CheckEligibilityResult;
use crate::domain::decision::{round2, DecisionResult, EmiBreakdown, InterestTier};
use crate::domain::foundation::ValidationError;
use crate::domain::fraud::GovernmentScheme;
use crate::domain::intake::{classify_education, classify_yes_no, LoanIntake};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A complete loan application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoanApplicationRequest {
    pub no_of_dependents: i64,
    /// "Graduate" or "Not Graduate"
    pub education: String,
    /// "Yes" or "No"
    pub self_employed: String,
    pub income_annum: f64,
    pub loan_amount: f64,
    /// Years, 1 to 30
    pub loan_term: i64,
    pub cibil_score: i64,
    #[serde(default)]
    pub residential_assets_value: f64,
    #[serde(default)]
    pub commercial_assets_value: f64,
    #[serde(default)]
    pub luxury_assets_value: f64,
    #[serde(default)]
    pub bank_asset_value: f64,
}

impl TryFrom<LoanApplicationRequest> for LoanIntake {
    type Error = ValidationError;

    /// Converts types only; field rules are applied by the decision pipeline.
    fn try_from(req: LoanApplicationRequest) -> Result<Self, Self::Error> {
        Ok(LoanIntake {
            dependents: non_negative("no_of_dependents", req.no_of_dependents)?,
            education: classify_education(&req.education),
            self_employed: classify_yes_no(&req.self_employed),
            annual_income: req.income_annum,
            loan_amount: req.loan_amount,
            tenure_years: non_negative("loan_term", req.loan_term)?,
            credit_score: non_negative("cibil_score", req.cibil_score)?,
            residential_assets: req.residential_assets_value,
            commercial_assets: req.commercial_assets_value,
            luxury_assets: req.luxury_assets_value,
            bank_assets: req.bank_asset_value,
        })
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::Negative {
        field: field.to_string(),
        actual: value as f64,
    })
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct EmiQuery {
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A decision, rounded for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionResponse {
    pub eligible: bool,
    pub confidence: f64,
    pub recommended_amount: f64,
    pub emi: f64,
    pub interest_rate: f64,
    pub interest_tier: InterestTier,
    pub tenure_months: u32,
}

impl From<&DecisionResult> for DecisionResponse {
    fn from(result: &DecisionResult) -> Self {
        Self {
            eligible: result.eligible,
            confidence: round2(result.confidence),
            recommended_amount: round2(result.recommended_amount),
            emi: round2(result.emi),
            interest_rate: result.interest_rate_percent,
            interest_tier: result.interest_tier,
            tenure_months: result.tenure_months,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilityResponse {
    #[serde(flatten)]
    pub decision: DecisionResponse,
    pub message_english: String,
    pub message_hindi: String,
}

impl From<CheckEligibilityResult> for EligibilityResponse {
    fn from(result: CheckEligibilityResult) -> Self {
        Self {
            decision: DecisionResponse::from(&result.result),
            message_english: result.message_en,
            message_hindi: result.message_hi,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmiResponse {
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub tenure_months: u32,
    pub monthly_emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub principal_percentage: f64,
    pub interest_percentage: f64,
}

impl From<EmiBreakdown> for EmiResponse {
    fn from(b: EmiBreakdown) -> Self {
        Self {
            loan_amount: round2(b.loan_amount),
            interest_rate: b.interest_rate_percent,
            tenure_months: b.tenure_months,
            monthly_emi: round2(b.monthly_emi),
            total_payment: round2(b.total_payment),
            total_interest: round2(b.total_interest),
            principal_percentage: round2(b.principal_percentage),
            interest_percentage: round2(b.interest_percentage),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanHealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub backend: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemeResponse {
    #[serde(flatten)]
    pub scheme: GovernmentScheme,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemesResponse {
    pub schemes: Vec<SchemeResponse>,
    pub count: usize,
    pub disclaimer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentsRequired {
    pub identity_proof: &'static [&'static str],
    pub address_proof: &'static [&'static str],
    pub income_proof: &'static [&'static str],
    pub business_documents: &'static [&'static str],
    pub property_documents: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityCriteria {
    pub age: &'static str,
    pub minimum_income: &'static str,
    pub minimum_cibil: &'static str,
    pub employment: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementsResponse {
    pub documents_required: DocumentsRequired,
    pub eligibility_criteria: EligibilityCriteria,
    pub tips: &'static [&'static str],
}

impl RequirementsResponse {
    /// Checklist most Indian lenders ask for.
    pub fn standard() -> Self {
        Self {
            documents_required: DocumentsRequired {
                identity_proof: &["Aadhaar Card", "PAN Card", "Voter ID", "Passport"],
                address_proof: &[
                    "Aadhaar Card",
                    "Utility bills (electricity/water)",
                    "Ration card",
                    "Rent agreement",
                ],
                income_proof: &[
                    "Salary slips (last 3 months)",
                    "Bank statements (last 6 months)",
                    "Income Tax Returns",
                    "Form 16",
                ],
                business_documents: &[
                    "Business registration certificate",
                    "GST registration",
                    "Business bank statements",
                    "Profit & Loss statement",
                ],
                property_documents: &[
                    "Property papers (if applying for secured loan)",
                    "Sale deed",
                    "Encumbrance certificate",
                ],
            },
            eligibility_criteria: EligibilityCriteria {
                age: "21-65 years",
                minimum_income: "₹15,000 per month (varies by bank)",
                minimum_cibil: "650+ (700+ preferred)",
                employment: "Salaried/Self-employed/Business owner",
            },
            tips: &[
                "Maintain good credit score (750+)",
                "Keep debt-to-income ratio below 40%",
                "Ensure all documents are up-to-date",
                "Compare interest rates from multiple banks",
                "Read all terms and conditions carefully",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::Education;

    fn request() -> LoanApplicationRequest {
        serde_json::from_value(serde_json::json!({
            "no_of_dependents": 2,
            "education": "Not Graduate",
            "self_employed": "Yes",
            "income_annum": 600000,
            "loan_amount": 400000,
            "loan_term": 20,
            "cibil_score": 800
        }))
        .unwrap()
    }

    #[test]
    fn request_maps_onto_intake_with_default_assets() {
        let intake = LoanIntake::try_from(request()).unwrap();

        assert_eq!(intake.education, Education::NotGraduate);
        assert!(intake.self_employed);
        assert_eq!(intake.tenure_years, 20);
        assert_eq!(intake.total_assets(), 0.0);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let mut req = request();
        req.no_of_dependents = -1;
        assert!(matches!(
            LoanIntake::try_from(req),
            Err(ValidationError::Negative { .. })
        ));
    }
}
