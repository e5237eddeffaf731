//! Feature assembly for the eligibility model.
//!
//! The model is addressed by column name. A [`DecisionRequest`] is laid out
//! in whatever order the model declares, so a model retrained with shuffled
//! columns keeps working without code changes.

use serde::Serialize;
use std::fmt;

use super::errors::DecisionError;
use super::tenure::ReconciledTenure;
use crate::domain::intake::LoanIntake;

/// The eleven model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeatureName {
    Dependents,
    Education,
    SelfEmployed,
    AnnualIncome,
    LoanAmount,
    LoanTermYears,
    CreditScore,
    ResidentialAssets,
    CommercialAssets,
    LuxuryAssets,
    BankAssets,
}

impl FeatureName {
    /// All features in canonical order.
    pub const CANONICAL: [FeatureName; 11] = [
        FeatureName::Dependents,
        FeatureName::Education,
        FeatureName::SelfEmployed,
        FeatureName::AnnualIncome,
        FeatureName::LoanAmount,
        FeatureName::LoanTermYears,
        FeatureName::CreditScore,
        FeatureName::ResidentialAssets,
        FeatureName::CommercialAssets,
        FeatureName::LuxuryAssets,
        FeatureName::BankAssets,
    ];

    /// Column name the model was trained with.
    pub fn column(&self) -> &'static str {
        match self {
            FeatureName::Dependents => "no_of_dependents",
            FeatureName::Education => "education",
            FeatureName::SelfEmployed => "self_employed",
            FeatureName::AnnualIncome => "income_annum",
            FeatureName::LoanAmount => "loan_amount",
            FeatureName::LoanTermYears => "loan_term",
            FeatureName::CreditScore => "cibil_score",
            FeatureName::ResidentialAssets => "residential_assets_value",
            FeatureName::CommercialAssets => "commercial_assets_value",
            FeatureName::LuxuryAssets => "luxury_assets_value",
            FeatureName::BankAssets => "bank_asset_value",
        }
    }

    /// Resolves a model column name. Surrounding whitespace is ignored.
    pub fn from_column(column: &str) -> Option<Self> {
        let column = column.trim();
        Self::CANONICAL.iter().copied().find(|f| f.column() == column)
    }

    /// The value of this feature for one applicant.
    fn extract(&self, intake: &LoanIntake, tenure: &ReconciledTenure) -> f64 {
        match self {
            FeatureName::Dependents => f64::from(intake.dependents),
            FeatureName::Education => intake.education.as_feature(),
            FeatureName::SelfEmployed => {
                if intake.self_employed {
                    1.0
                } else {
                    0.0
                }
            }
            FeatureName::AnnualIncome => intake.annual_income,
            FeatureName::LoanAmount => intake.loan_amount,
            FeatureName::LoanTermYears => f64::from(tenure.model_tenure_years),
            FeatureName::CreditScore => f64::from(intake.credit_score),
            FeatureName::ResidentialAssets => intake.residential_assets,
            FeatureName::CommercialAssets => intake.commercial_assets,
            FeatureName::LuxuryAssets => intake.luxury_assets,
            FeatureName::BankAssets => intake.bank_assets,
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Ordered feature vector for one applicant. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRequest {
    names: Vec<FeatureName>,
    values: Vec<f64>,
}

impl DecisionRequest {
    /// Lays out the features of `intake` in `model_order`.
    ///
    /// `model_order` must name each of the eleven features exactly once.
    pub fn assemble(
        intake: &LoanIntake,
        tenure: &ReconciledTenure,
        model_order: &[String],
    ) -> Result<Self, DecisionError> {
        if model_order.len() != FeatureName::CANONICAL.len() {
            return Err(DecisionError::FeatureOrder(format!(
                "model declares {} features, expected {}",
                model_order.len(),
                FeatureName::CANONICAL.len()
            )));
        }

        let mut names = Vec::with_capacity(model_order.len());
        for column in model_order {
            let name = FeatureName::from_column(column).ok_or_else(|| {
                DecisionError::FeatureOrder(format!("unknown model column '{}'", column))
            })?;
            if names.contains(&name) {
                return Err(DecisionError::FeatureOrder(format!(
                    "model column '{}' declared twice",
                    column
                )));
            }
            names.push(name);
        }

        let values = names.iter().map(|name| name.extract(intake, tenure)).collect();
        Ok(Self { names, values })
    }

    /// Lays out the features in canonical order.
    pub fn canonical(intake: &LoanIntake, tenure: &ReconciledTenure) -> Self {
        let names = FeatureName::CANONICAL.to_vec();
        let values = names.iter().map(|name| name.extract(intake, tenure)).collect();
        Self { names, values }
    }

    pub fn names(&self) -> &[FeatureName] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of one named feature.
    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|index| self.values[index])
    }

    /// Column names in vector order.
    pub fn columns(&self) -> Vec<&'static str> {
        self.names.iter().map(FeatureName::column).collect()
    }
}
