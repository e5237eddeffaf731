//! The fraud form's payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::IntakeError;
use super::field::{FieldId, FieldValue};

/// A user's description of a loan offer they want checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudReport {
    pub scheme_name: String,
    pub description: String,
    /// Where the user heard about the offer (WhatsApp, agent, website...).
    pub source: String,
}

impl FraudReport {
    pub fn from_answers(answers: &HashMap<FieldId, FieldValue>) -> Result<Self, IntakeError> {
        Ok(Self {
            scheme_name: text(answers, FieldId::SchemeName)?,
            description: text(answers, FieldId::SchemeDescription)?,
            source: text(answers, FieldId::SchemeSource)?,
        })
    }
}

fn text(answers: &HashMap<FieldId, FieldValue>, field: FieldId) -> Result<String, IntakeError> {
    answers
        .get(&field)
        .ok_or(IntakeError::MissingAnswer(field))?
        .as_text()
        .map(str::to_string)
        .ok_or(IntakeError::WrongAnswerType(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_text_answers() {
        let answers = HashMap::from([
            (FieldId::SchemeName, FieldValue::Text("PM Loan Yojana".into())),
            (FieldId::SchemeDescription, FieldValue::Text("Pay 2000 fee".into())),
            (FieldId::SchemeSource, FieldValue::Text("WhatsApp".into())),
        ]);
        let report = FraudReport::from_answers(&answers).unwrap();
        assert_eq!(report.scheme_name, "PM Loan Yojana");
        assert_eq!(report.source, "WhatsApp");
    }

    #[test]
    fn missing_source_is_reported() {
        let answers = HashMap::from([
            (FieldId::SchemeName, FieldValue::Text("X".into())),
            (FieldId::SchemeDescription, FieldValue::Text("Y".into())),
        ]);
        assert_eq!(
            FraudReport::from_answers(&answers),
            Err(IntakeError::MissingAnswer(FieldId::SchemeSource))
        );
    }
}
