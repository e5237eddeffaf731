//! The loan form's payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::categories::Education;
use super::errors::IntakeError;
use super::field::{FieldId, FieldValue};
use super::form::FormKind;
use crate::domain::foundation::ValidationError;

/// Everything the loan form collects, typed.
///
/// `tenure_years` is the tenure as the user entered it. Conversion to
/// months and to the model's year range happens in the decision module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanIntake {
    pub dependents: u32,
    pub education: Education,
    pub self_employed: bool,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub tenure_years: u32,
    pub credit_score: u32,
    pub residential_assets: f64,
    pub commercial_assets: f64,
    pub luxury_assets: f64,
    pub bank_assets: f64,
}

impl LoanIntake {
    /// Builds the payload from a completed loan dialogue.
    pub fn from_answers(answers: &HashMap<FieldId, FieldValue>) -> Result<Self, IntakeError> {
        let intake = Self {
            dependents: whole(answers, FieldId::Dependents)?,
            education: answer(answers, FieldId::Education)?
                .as_education()
                .ok_or(IntakeError::WrongAnswerType(FieldId::Education))?,
            self_employed: answer(answers, FieldId::SelfEmployed)?
                .as_flag()
                .ok_or(IntakeError::WrongAnswerType(FieldId::SelfEmployed))?,
            annual_income: amount(answers, FieldId::AnnualIncome)?,
            loan_amount: amount(answers, FieldId::LoanAmount)?,
            tenure_years: whole(answers, FieldId::TenureYears)?,
            credit_score: whole(answers, FieldId::CreditScore)?,
            residential_assets: amount(answers, FieldId::ResidentialAssets)?,
            commercial_assets: amount(answers, FieldId::CommercialAssets)?,
            luxury_assets: amount(answers, FieldId::LuxuryAssets)?,
            bank_assets: amount(answers, FieldId::BankAssets)?,
        };
        intake.validate()?;
        Ok(intake)
    }

    /// Applies the loan form's field rules to a payload that did not come
    /// through the dialogue (e.g. the stateless eligibility endpoint).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let form = FormKind::Loan;
        let check_whole = |field: FieldId, value: u32| -> Result<(), ValidationError> {
            match form.spec(field) {
                Some(spec) => spec.check_integer(i64::from(value)).map(|_| ()),
                None => Err(ValidationError::invalid_format(field.as_str(), "unknown loan field")),
            }
        };
        let check_amount = |field: FieldId, value: f64| -> Result<(), ValidationError> {
            match form.spec(field) {
                Some(spec) => spec.check_amount(value).map(|_| ()),
                None => Err(ValidationError::invalid_format(field.as_str(), "unknown loan field")),
            }
        };

        check_whole(FieldId::Dependents, self.dependents)?;
        check_amount(FieldId::AnnualIncome, self.annual_income)?;
        check_amount(FieldId::LoanAmount, self.loan_amount)?;
        check_whole(FieldId::TenureYears, self.tenure_years)?;
        check_whole(FieldId::CreditScore, self.credit_score)?;
        check_amount(FieldId::ResidentialAssets, self.residential_assets)?;
        check_amount(FieldId::CommercialAssets, self.commercial_assets)?;
        check_amount(FieldId::LuxuryAssets, self.luxury_assets)?;
        check_amount(FieldId::BankAssets, self.bank_assets)?;
        Ok(())
    }

    pub fn total_assets(&self) -> f64 {
        self.residential_assets + self.commercial_assets + self.luxury_assets + self.bank_assets
    }
}

fn answer(answers: &HashMap<FieldId, FieldValue>, field: FieldId) -> Result<&FieldValue, IntakeError> {
    answers.get(&field).ok_or(IntakeError::MissingAnswer(field))
}

fn amount(answers: &HashMap<FieldId, FieldValue>, field: FieldId) -> Result<f64, IntakeError> {
    answer(answers, field)?
        .as_amount()
        .ok_or(IntakeError::WrongAnswerType(field))
}

fn whole(answers: &HashMap<FieldId, FieldValue>, field: FieldId) -> Result<u32, IntakeError> {
    let value = answer(answers, field)?
        .as_integer()
        .ok_or(IntakeError::WrongAnswerType(field))?;
    u32::try_from(value).map_err(|_| IntakeError::WrongAnswerType(field))
}


#[cfg(test)]
mod tests {
    use super::fixtures::approvable;
    use super::*;

    fn answers_for(intake: &LoanIntake) -> HashMap<FieldId, FieldValue> {
        HashMap::from([
            (FieldId::Dependents, FieldValue::Integer(intake.dependents as i64)),
            (FieldId::Education, FieldValue::Education(intake.education)),
            (FieldId::SelfEmployed, FieldValue::Flag(intake.self_employed)),
            (FieldId::AnnualIncome, FieldValue::Amount(intake.annual_income)),
            (FieldId::LoanAmount, FieldValue::Amount(intake.loan_amount)),
            (FieldId::TenureYears, FieldValue::Integer(intake.tenure_years as i64)),
            (FieldId::CreditScore, FieldValue::Integer(intake.credit_score as i64)),
            (FieldId::ResidentialAssets, FieldValue::Amount(intake.residential_assets)),
            (FieldId::CommercialAssets, FieldValue::Amount(intake.commercial_assets)),
            (FieldId::LuxuryAssets, FieldValue::Amount(intake.luxury_assets)),
            (FieldId::BankAssets, FieldValue::Amount(intake.bank_assets)),
        ])
    }

    #[test]
    fn builds_from_complete_answers() {
        let expected = approvable();
        let intake = LoanIntake::from_answers(&answers_for(&expected)).unwrap();
        assert_eq!(intake, expected);
        assert_eq!(intake.total_assets(), 10_800_000.0);
    }

    #[test]
    fn missing_answer_is_reported() {
        let mut answers = answers_for(&approvable());
        answers.remove(&FieldId::CreditScore);
        assert_eq!(
            LoanIntake::from_answers(&answers),
            Err(IntakeError::MissingAnswer(FieldId::CreditScore))
        );
    }

    #[test]
    fn mistyped_answer_is_reported() {
        let mut answers = answers_for(&approvable());
        answers.insert(FieldId::Education, FieldValue::Flag(true));
        assert_eq!(
            LoanIntake::from_answers(&answers),
            Err(IntakeError::WrongAnswerType(FieldId::Education))
        );
    }

    #[test]
    fn validate_applies_dialogue_bounds() {
        let mut intake = approvable();
        intake.tenure_years = 31;
        assert_eq!(
            intake.validate(),
            Err(ValidationError::out_of_range("tenure_years", 1, 30, 31))
        );

        let mut intake = approvable();
        intake.credit_score = 299;
        assert!(intake.validate().is_err());

        let mut intake = approvable();
        intake.loan_amount = 0.0;
        assert!(matches!(
            intake.validate(),
            Err(ValidationError::NotPositive { .. })
        ));

        let mut intake = approvable();
        intake.bank_assets = 0.0;
        assert!(intake.validate().is_ok());
    }
}
