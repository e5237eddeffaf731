//! Field specifications and the per-field validator.
//!
//! Every step of every form is described by a static [`FieldSpec`]. The
//! spec's [`FieldSpec::validate`] is a pure function from raw user text to a
//! typed [`FieldValue`] or a [`ValidationError`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::categories::{classify_education, classify_yes_no, Education};
use crate::domain::foundation::{Locale, ValidationError};

/// Identifies one question across all forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    // Loan form
    Education,
    SelfEmployed,
    Dependents,
    AnnualIncome,
    LoanAmount,
    TenureYears,
    CreditScore,
    ResidentialAssets,
    CommercialAssets,
    LuxuryAssets,
    BankAssets,

    // Fraud form
    SchemeName,
    SchemeDescription,
    SchemeSource,

    // Onboarding form
    Language,
    Location,
}

impl FieldId {
    /// Stable snake_case name, used in logs and error payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Education => "education",
            FieldId::SelfEmployed => "self_employed",
            FieldId::Dependents => "dependents",
            FieldId::AnnualIncome => "annual_income",
            FieldId::LoanAmount => "loan_amount",
            FieldId::TenureYears => "tenure_years",
            FieldId::CreditScore => "credit_score",
            FieldId::ResidentialAssets => "residential_assets",
            FieldId::CommercialAssets => "commercial_assets",
            FieldId::LuxuryAssets => "luxury_assets",
            FieldId::BankAssets => "bank_assets",
            FieldId::SchemeName => "scheme_name",
            FieldId::SchemeDescription => "scheme_description",
            FieldId::SchemeSource => "scheme_source",
            FieldId::Language => "language",
            FieldId::Location => "location",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value type and constraints of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Whole number within `[min, max]`; `max = None` means unbounded above.
    Integer { min: i64, max: Option<i64> },
    /// Rupee amount; must be `> 0` unless `allow_zero`.
    Amount { allow_zero: bool },
    /// Graduate / Not Graduate.
    Education,
    /// Yes / No.
    YesNo,
    /// One of the supported locales.
    Language,
    /// Non-empty free text up to `max_len` characters.
    Text { max_len: usize },
}

/// A typed, validated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Integer(i64),
    Amount(f64),
    Education(Education),
    Flag(bool),
    Locale(Locale),
    Text(String),
}

impl FieldValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<f64> {
        match self {
            FieldValue::Amount(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_education(&self) -> Option<Education> {
        match self {
            FieldValue::Education(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_locale(&self) -> Option<Locale> {
        match self {
            FieldValue::Locale(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

/// Static description of one step of a form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub kind: FieldKind,
}

/// Ceiling for whole-number answers without an explicit maximum; every
/// such answer is stored as a `u32`.
pub const MAX_WHOLE_ANSWER: i64 = u32::MAX as i64;

impl FieldSpec {
    pub const fn new(id: FieldId, kind: FieldKind) -> Self {
        Self { id, kind }
    }

    /// Parses and checks one raw answer.
    pub fn validate(&self, raw: &str) -> Result<FieldValue, ValidationError> {
        let field = self.id.as_str();
        let trimmed = raw.trim();

        match self.kind {
            FieldKind::Integer { .. } => {
                let value = parse_integer(field, trimmed)?;
                self.check_integer(value).map(FieldValue::Integer)
            }
            FieldKind::Amount { .. } => {
                let value = parse_amount(field, trimmed)?;
                self.check_amount(value).map(FieldValue::Amount)
            }
            FieldKind::Education => {
                require_non_empty(field, trimmed)?;
                Ok(FieldValue::Education(classify_education(trimmed)))
            }
            FieldKind::YesNo => {
                require_non_empty(field, trimmed)?;
                Ok(FieldValue::Flag(classify_yes_no(trimmed)))
            }
            FieldKind::Language => Locale::from_answer(trimmed).map(FieldValue::Locale),
            FieldKind::Text { max_len } => {
                require_non_empty(field, trimmed)?;
                let length = trimmed.chars().count();
                if length > max_len {
                    return Err(ValidationError::TooLong {
                        field: field.to_string(),
                        length,
                        limit: max_len,
                    });
                }
                Ok(FieldValue::Text(trimmed.to_string()))
            }
        }
    }

    /// Bounds check for an already-parsed whole number.
    pub fn check_integer(&self, value: i64) -> Result<i64, ValidationError> {
        let field = self.id.as_str();
        let FieldKind::Integer { min, max } = self.kind else {
            return Err(ValidationError::invalid_format(field, "not a whole-number field"));
        };
        match max {
            Some(max) if value < min || value > max => {
                Err(ValidationError::out_of_range(field, min, max, value))
            }
            None if value < min => Err(ValidationError::Negative {
                field: field.to_string(),
                actual: value as f64,
            }),
            None if value > MAX_WHOLE_ANSWER => Err(ValidationError::out_of_range(
                field,
                min,
                MAX_WHOLE_ANSWER,
                value,
            )),
            _ => Ok(value),
        }
    }

    /// Sign check for an already-parsed rupee amount.
    pub fn check_amount(&self, value: f64) -> Result<f64, ValidationError> {
        let field = self.id.as_str();
        let FieldKind::Amount { allow_zero } = self.kind else {
            return Err(ValidationError::invalid_format(field, "not an amount field"));
        };
        if !value.is_finite() {
            return Err(ValidationError::not_a_number(field, value.to_string()));
        }
        if value < 0.0 {
            return Err(ValidationError::Negative {
                field: field.to_string(),
                actual: value,
            });
        }
        if value == 0.0 && !allow_zero {
            return Err(ValidationError::NotPositive {
                field: field.to_string(),
                actual: value,
            });
        }
        Ok(value)
    }
}

/// Strips grouping characters and the rupee sign before numeric parsing.
///
/// Accepts both Western (`1,200,000`) and Indian (`12,00,000`) grouping.
pub fn normalize_number(raw: &str) -> String {
    let mut text = raw.trim();
    for prefix in ["₹", "rs.", "rs", "Rs.", "Rs", "INR"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest;
            break;
        }
    }
    text.chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect()
}

fn require_non_empty(field: &str, raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(())
    }
}

/// Parses a whole number.
///
/// Integral values beyond `i64` saturate so the bounds check reports them
/// as out of range rather than as fractions.
fn parse_integer(field: &str, raw: &str) -> Result<i64, ValidationError> {
    require_non_empty(field, raw)?;
    let normalized = normalize_number(raw);
    if let Ok(value) = normalized.parse::<i64>() {
        return Ok(value);
    }
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value >= i64::MAX as f64 => {
            Ok(i64::MAX)
        }
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value <= i64::MIN as f64 => {
            Ok(i64::MIN)
        }
        Ok(value) if value.is_finite() => Err(ValidationError::NotAWholeNumber {
            field: field.to_string(),
            raw: raw.to_string(),
        }),
        _ => Err(ValidationError::not_a_number(field, raw)),
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<f64, ValidationError> {
    require_non_empty(field, raw)?;
    match normalize_number(raw).parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::not_a_number(field, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDIT: FieldSpec = FieldSpec::new(
        FieldId::CreditScore,
        FieldKind::Integer {
            min: 300,
            max: Some(900),
        },
    );
    const DEPENDENTS: FieldSpec =
        FieldSpec::new(FieldId::Dependents, FieldKind::Integer { min: 0, max: None });
    const INCOME: FieldSpec =
        FieldSpec::new(FieldId::AnnualIncome, FieldKind::Amount { allow_zero: false });
    const ASSETS: FieldSpec =
        FieldSpec::new(FieldId::BankAssets, FieldKind::Amount { allow_zero: true });
    const SCHEME: FieldSpec = FieldSpec::new(FieldId::SchemeName, FieldKind::Text { max_len: 10 });

    #[test]
    fn normalize_strips_separators_and_currency() {
        assert_eq!(normalize_number("1,200,000"), "1200000");
        assert_eq!(normalize_number("12,00,000"), "1200000");
        assert_eq!(normalize_number("₹ 5,00,000"), "500000");
        assert_eq!(normalize_number("Rs. 7 000"), "7000");
        assert_eq!(normalize_number("1_000"), "1000");
    }

    #[test]
    fn integer_within_bounds_is_accepted() {
        assert_eq!(CREDIT.validate("300").unwrap(), FieldValue::Integer(300));
        assert_eq!(CREDIT.validate(" 900 ").unwrap(), FieldValue::Integer(900));
    }

    #[test]
    fn integer_outside_bounds_is_rejected() {
        assert_eq!(
            CREDIT.validate("299"),
            Err(ValidationError::out_of_range("credit_score", 300, 900, 299))
        );
        assert_eq!(
            CREDIT.validate("901"),
            Err(ValidationError::out_of_range("credit_score", 300, 900, 901))
        );
    }

    #[test]
    fn integer_rejects_garbage_and_fractions() {
        assert_eq!(
            DEPENDENTS.validate("abc"),
            Err(ValidationError::not_a_number("dependents", "abc"))
        );
        assert!(matches!(
            DEPENDENTS.validate("2.5"),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
    }

    #[test]
    fn unbounded_integer_rejects_negative() {
        assert!(matches!(
            DEPENDENTS.validate("-1"),
            Err(ValidationError::Negative { .. })
        ));
        assert_eq!(DEPENDENTS.validate("0").unwrap(), FieldValue::Integer(0));
    }

    #[test]
    fn integer_overflow_is_out_of_range() {
        assert!(matches!(
            CREDIT.validate("99999999999999999999"),
            Err(ValidationError::OutOfRange { min: 300, max: 900, .. })
        ));
        assert!(matches!(
            CREDIT.validate("-99999999999999999999"),
            Err(ValidationError::OutOfRange { min: 300, max: 900, .. })
        ));
        assert!(matches!(
            DEPENDENTS.validate("99,999,999,999,999,999,999"),
            Err(ValidationError::OutOfRange { max: MAX_WHOLE_ANSWER, .. })
        ));
        assert!(matches!(
            DEPENDENTS.validate("-99999999999999999999"),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn unbounded_integer_is_capped_at_stored_width() {
        assert_eq!(
            DEPENDENTS.validate("4294967295").unwrap(),
            FieldValue::Integer(MAX_WHOLE_ANSWER)
        );
        assert!(matches!(
            DEPENDENTS.validate("4294967296"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn amount_requires_positive_unless_zero_allowed() {
        assert!(matches!(
            INCOME.validate("0"),
            Err(ValidationError::NotPositive { .. })
        ));
        assert_eq!(ASSETS.validate("0").unwrap(), FieldValue::Amount(0.0));
        assert_eq!(
            INCOME.validate("12,00,000").unwrap(),
            FieldValue::Amount(1_200_000.0)
        );
    }

    #[test]
    fn amount_rejects_negative_and_non_finite() {
        assert!(matches!(
            ASSETS.validate("-5"),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            ASSETS.validate("inf"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            ASSETS.validate("NaN"),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn empty_input_is_empty_field() {
        assert_eq!(
            INCOME.validate("   "),
            Err(ValidationError::empty_field("annual_income"))
        );
    }

    #[test]
    fn text_is_trimmed_and_bounded() {
        assert_eq!(
            SCHEME.validate("  MUDRA  ").unwrap(),
            FieldValue::Text("MUDRA".to_string())
        );
        assert!(matches!(
            SCHEME.validate("a very long scheme name"),
            Err(ValidationError::TooLong { limit: 10, .. })
        ));
    }

    #[test]
    fn language_field_uses_locale_matching() {
        let spec = FieldSpec::new(FieldId::Language, FieldKind::Language);
        assert_eq!(spec.validate("Tamil").unwrap(), FieldValue::Locale(Locale::Ta));
        assert!(spec.validate("French").is_err());
    }

    #[test]
    fn categorical_fields_never_produce_a_third_class() {
        let education = FieldSpec::new(FieldId::Education, FieldKind::Education);
        let flag = FieldSpec::new(FieldId::SelfEmployed, FieldKind::YesNo);
        for input in ["whatever", "Graduate", "Not Graduate", "42"] {
            assert!(matches!(
                education.validate(input).unwrap(),
                FieldValue::Education(_)
            ));
            assert!(matches!(flag.validate(input).unwrap(), FieldValue::Flag(_)));
        }
    }
}
