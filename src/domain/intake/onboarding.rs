//! The onboarding form's payload.

use std::collections::HashMap;

use super::errors::IntakeError;
use super::field::{FieldId, FieldValue};
use crate::domain::foundation::Locale;

/// Language and location chosen during onboarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingAnswers {
    pub locale: Locale,
    pub location: String,
}

impl OnboardingAnswers {
    pub fn from_answers(answers: &HashMap<FieldId, FieldValue>) -> Result<Self, IntakeError> {
        let locale = answers
            .get(&FieldId::Language)
            .ok_or(IntakeError::MissingAnswer(FieldId::Language))?
            .as_locale()
            .ok_or(IntakeError::WrongAnswerType(FieldId::Language))?;
        let location = answers
            .get(&FieldId::Location)
            .ok_or(IntakeError::MissingAnswer(FieldId::Location))?
            .as_text()
            .ok_or(IntakeError::WrongAnswerType(FieldId::Location))?
            .to_string();
        Ok(Self { locale, location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_answers() {
        let answers = HashMap::from([
            (FieldId::Language, FieldValue::Locale(Locale::Pa)),
            (FieldId::Location, FieldValue::Text("Ludhiana".into())),
        ]);
        let onboarding = OnboardingAnswers::from_answers(&answers).unwrap();
        assert_eq!(onboarding.locale, Locale::Pa);
        assert_eq!(onboarding.location, "Ludhiana");
    }

    #[test]
    fn missing_location_is_reported() {
        let answers = HashMap::from([(FieldId::Language, FieldValue::Locale(Locale::En))]);
        assert_eq!(
            OnboardingAnswers::from_answers(&answers),
            Err(IntakeError::MissingAnswer(FieldId::Location))
        );
    }
}
