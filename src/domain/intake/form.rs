//! Form catalogue: which questions each form asks, and in what order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::field::{FieldId, FieldKind, FieldSpec};
use crate::domain::foundation::ValidationError;

/// Longest free-text answer accepted by the fraud and onboarding forms.
pub const MAX_TEXT_LEN: usize = 1000;

/// Loan form, in the order the questions are asked.
///
/// Question order is a conversation concern; the classifier's feature order
/// is resolved separately by name.
static LOAN_FIELDS: [FieldSpec; 11] = [
    FieldSpec::new(FieldId::Education, FieldKind::Education),
    FieldSpec::new(FieldId::SelfEmployed, FieldKind::YesNo),
    FieldSpec::new(FieldId::Dependents, FieldKind::Integer { min: 0, max: None }),
    FieldSpec::new(FieldId::AnnualIncome, FieldKind::Amount { allow_zero: false }),
    FieldSpec::new(FieldId::LoanAmount, FieldKind::Amount { allow_zero: false }),
    FieldSpec::new(
        FieldId::TenureYears,
        FieldKind::Integer {
            min: 1,
            max: Some(30),
        },
    ),
    FieldSpec::new(
        FieldId::CreditScore,
        FieldKind::Integer {
            min: 300,
            max: Some(900),
        },
    ),
    FieldSpec::new(FieldId::ResidentialAssets, FieldKind::Amount { allow_zero: true }),
    FieldSpec::new(FieldId::CommercialAssets, FieldKind::Amount { allow_zero: true }),
    FieldSpec::new(FieldId::LuxuryAssets, FieldKind::Amount { allow_zero: true }),
    FieldSpec::new(FieldId::BankAssets, FieldKind::Amount { allow_zero: true }),
];

static FRAUD_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new(FieldId::SchemeName, FieldKind::Text { max_len: MAX_TEXT_LEN }),
    FieldSpec::new(FieldId::SchemeDescription, FieldKind::Text { max_len: MAX_TEXT_LEN }),
    FieldSpec::new(FieldId::SchemeSource, FieldKind::Text { max_len: MAX_TEXT_LEN }),
];

static ONBOARDING_FIELDS: [FieldSpec; 2] = [
    FieldSpec::new(FieldId::Language, FieldKind::Language),
    FieldSpec::new(FieldId::Location, FieldKind::Text { max_len: MAX_TEXT_LEN }),
];

/// The guided forms a user can fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Loan,
    Fraud,
    Onboarding,
}

impl FormKind {
    /// Returns all form kinds.
    pub fn all() -> &'static [FormKind] {
        &[FormKind::Loan, FormKind::Fraud, FormKind::Onboarding]
    }

    /// Ordered field specs for this form.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            FormKind::Loan => &LOAN_FIELDS,
            FormKind::Fraud => &FRAUD_FIELDS,
            FormKind::Onboarding => &ONBOARDING_FIELDS,
        }
    }

    /// First question of the form.
    pub fn first_field(&self) -> FieldId {
        // Every form has at least one field.
        self.fields()[0].id
    }

    /// Spec for a field of this form, if the field belongs to it.
    pub fn spec(&self, field: FieldId) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.id == field)
    }

    /// 0-based position of a field within this form.
    pub fn position(&self, field: FieldId) -> Option<usize> {
        self.fields().iter().position(|spec| spec.id == field)
    }

    /// The question following `field`, or `None` if `field` is the last one.
    pub fn next_field(&self, field: FieldId) -> Option<FieldId> {
        let index = self.position(field)?;
        self.fields().get(index + 1).map(|spec| spec.id)
    }

    pub fn is_last(&self, field: FieldId) -> bool {
        self.position(field) == Some(self.fields().len() - 1)
    }

    pub fn field_count(&self) -> usize {
        self.fields().len()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Loan => "loan",
            FormKind::Fraud => "fraud",
            FormKind::Onboarding => "onboarding",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "loan" => Ok(FormKind::Loan),
            "fraud" => Ok(FormKind::Fraud),
            "onboarding" | "language" => Ok(FormKind::Onboarding),
            other => Err(ValidationError::UnknownOption {
                field: "form".to_string(),
                raw: other.to_string(),
            }),
        }
    }
}
