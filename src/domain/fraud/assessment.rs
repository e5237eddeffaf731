//! Rule-based fraud risk assessment for reported loan schemes.

use serde::Serialize;
use std::fmt;

use super::schemes::{find_mentioned_scheme, GovernmentScheme};
use crate::domain::intake::FraudReport;

/// Score at or above which a report is high risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.6;
/// Score at or above which a report is medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.3;

/// A red flag found in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudSignal {
    /// Fee demanded before the loan is paid out.
    AdvanceFee,
    GuaranteedApproval,
    /// No documents or credit check required.
    NoVerification,
    Urgency,
    /// Reached the user through a channel banks do not use.
    UnofficialChannel,
    UnrealisticInterest,
    /// Asks for OTP, PIN, password or similar.
    CredentialRequest,
}

impl FraudSignal {
    pub const ALL: [FraudSignal; 7] = [
        FraudSignal::AdvanceFee,
        FraudSignal::GuaranteedApproval,
        FraudSignal::NoVerification,
        FraudSignal::Urgency,
        FraudSignal::UnofficialChannel,
        FraudSignal::UnrealisticInterest,
        FraudSignal::CredentialRequest,
    ];

    pub fn weight(&self) -> f64 {
        match self {
            FraudSignal::AdvanceFee => 0.35,
            FraudSignal::GuaranteedApproval => 0.3,
            FraudSignal::NoVerification => 0.25,
            FraudSignal::Urgency => 0.15,
            FraudSignal::UnofficialChannel => 0.2,
            FraudSignal::UnrealisticInterest => 0.3,
            FraudSignal::CredentialRequest => 0.5,
        }
    }

    /// Lowercase phrases that raise this signal. ASCII phrases must stand
    /// as whole words; others match as substrings.
    fn phrases(&self) -> &'static [&'static str] {
        match self {
            FraudSignal::AdvanceFee => &[
                "advance fee",
                "processing fee",
                "registration fee",
                "upfront",
                "pay first",
                "deposit first",
                "एडवांस",
                "प्रोसेसिंग फीस",
                "पहले पैसे",
                "शुल्क जमा",
            ],
            FraudSignal::GuaranteedApproval => &[
                "guaranteed",
                "guarantee",
                "100% approval",
                "sure approval",
                "instant approval",
                "गारंटी",
                "पक्का लोन",
            ],
            FraudSignal::NoVerification => &[
                "no documents",
                "no document",
                "without documents",
                "no cibil",
                "no credit check",
                "no paperwork",
                "बिना दस्तावेज",
                "बिना कागज",
                "सिबिल नहीं",
            ],
            FraudSignal::Urgency => &[
                "today only",
                "limited time",
                "last chance",
                "urgent",
                "hurry",
                "immediately",
                "आज ही",
                "जल्दी करें",
                "सीमित समय",
            ],
            FraudSignal::UnofficialChannel => &[
                "whatsapp",
                "telegram",
                "agent",
                "phone call",
                "unknown number",
                "sms",
                "facebook",
                "व्हाट्सएप",
                "एजेंट",
                "फोन कॉल",
            ],
            FraudSignal::UnrealisticInterest => &[
                "0%",
                "zero interest",
                "interest free",
                "interest-free",
                "no interest",
                "ब्याज मुक्त",
                "बिना ब्याज",
            ],
            FraudSignal::CredentialRequest => &[
                "otp",
                "pin",
                "password",
                "cvv",
                "atm card number",
                "ओटीपी",
                "पासवर्ड",
            ],
        }
    }

    fn is_raised_by(&self, lowered: &str) -> bool {
        self.phrases().iter().any(|p| contains_phrase(lowered, p))
    }
}

impl fmt::Display for FraudSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FraudSignal::AdvanceFee => "advance_fee",
            FraudSignal::GuaranteedApproval => "guaranteed_approval",
            FraudSignal::NoVerification => "no_verification",
            FraudSignal::Urgency => "urgency",
            FraudSignal::UnofficialChannel => "unofficial_channel",
            FraudSignal::UnrealisticInterest => "unrealistic_interest",
            FraudSignal::CredentialRequest => "credential_request",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Result of assessing one [`FraudReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudAssessment {
    pub risk_level: RiskLevel,
    /// Sum of signal weights, capped at 1.
    pub score: f64,
    pub signals: Vec<FraudSignal>,
    /// Catalogued scheme the report names, if any.
    pub known_scheme: Option<GovernmentScheme>,
}

impl FraudAssessment {
    pub fn assess(report: &FraudReport) -> Self {
        let text = format!(
            "{} {} {}",
            report.scheme_name, report.description, report.source
        )
        .to_lowercase();

        let signals: Vec<FraudSignal> = FraudSignal::ALL
            .into_iter()
            .filter(|s| s.is_raised_by(&text))
            .collect();
        let score = signals.iter().map(FraudSignal::weight).sum::<f64>().min(1.0);

        Self {
            risk_level: RiskLevel::from_score(score),
            score,
            signals,
            known_scheme: find_mentioned_scheme(&text).cloned(),
        }
    }

    pub fn has_signal(&self, signal: FraudSignal) -> bool {
        self.signals.contains(&signal)
    }
}

/// Substring match; ASCII phrases additionally need word boundaries so
/// "pin" does not fire on "shopping" and "0%" not on "10%".
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if !phrase.is_ascii() {
        return haystack.contains(phrase);
    }
    haystack.match_indices(phrase).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + phrase.len()..].chars().next();
        let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric());
        !is_word(before) && !(phrase.ends_with(|c: char| c.is_alphanumeric()) && is_word(after))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, description: &str, source: &str) -> FraudReport {
        FraudReport {
            scheme_name: name.to_string(),
            description: description.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn classic_advance_fee_scam_is_high_risk() {
        let assessment = FraudAssessment::assess(&report(
            "Golden Loan Yojana",
            "Guaranteed loan of 5 lakh, pay processing fee of 2000 today only",
            "WhatsApp",
        ));

        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(assessment.has_signal(FraudSignal::AdvanceFee));
        assert!(assessment.has_signal(FraudSignal::GuaranteedApproval));
        assert!(assessment.has_signal(FraudSignal::Urgency));
        assert!(assessment.has_signal(FraudSignal::UnofficialChannel));
        assert!(assessment.score > 0.99 && assessment.score <= 1.0);
        assert!(assessment.known_scheme.is_none());
    }

    #[test]
    fn plain_bank_branch_referral_is_low_risk() {
        let assessment = FraudAssessment::assess(&report(
            "Kisan Credit Card",
            "Crop loan at 7% through the bank",
            "Bank branch",
        ));

        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.signals.is_empty());
        assert_eq!(
            assessment.known_scheme.map(|s| s.website),
            Some("https://pmkisan.gov.in")
        );
    }

    #[test]
    fn known_scheme_via_unofficial_channel_still_flags_channel() {
        let assessment = FraudAssessment::assess(&report(
            "PM MUDRA",
            "Loan for my shop",
            "Agent on phone call",
        ));

        assert!(assessment.has_signal(FraudSignal::UnofficialChannel));
        assert!(assessment.known_scheme.is_some());
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn hindi_phrases_raise_signals() {
        let assessment = FraudAssessment::assess(&report(
            "लोन योजना",
            "बिना दस्तावेज लोन, ओटीपी बताइए",
            "व्हाट्सएप",
        ));

        assert!(assessment.has_signal(FraudSignal::NoVerification));
        assert!(assessment.has_signal(FraudSignal::CredentialRequest));
        assert!(assessment.has_signal(FraudSignal::UnofficialChannel));
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn short_phrases_need_word_boundaries() {
        assert!(!contains_phrase("went shopping", "pin"));
        assert!(contains_phrase("share your pin now", "pin"));
        assert!(!contains_phrase("rate is 10% yearly", "0%"));
        assert!(contains_phrase("loan at 0% interest", "0%"));
    }

    #[test]
    fn thresholds_split_levels() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::High);
    }
}
