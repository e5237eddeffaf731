//! Verified government loan schemes.
//!
//! Served as a public catalogue and used by the fraud assessor to recognise
//! when a report names a genuine scheme.

use once_cell::sync::Lazy;
use serde::Serialize;

/// Shown alongside the catalogue.
pub const SCHEMES_DISCLAIMER: &str =
    "ये सभी सरकारी योजनाएं हैं। कृपया आधिकारिक वेबसाइट पर जाकर सत्यापित करें।";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GovernmentScheme {
    pub name: &'static str,
    pub name_english: &'static str,
    /// Upper bound in rupees.
    pub max_amount: u64,
    pub purpose: &'static str,
    pub interest_rate: &'static str,
    pub features: &'static [&'static str],
    pub website: &'static str,
    #[serde(skip)]
    keywords: &'static [&'static str],
}

impl GovernmentScheme {
    /// True if `lowered` (already lowercase) names this scheme.
    fn is_named_in(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

pub static SCHEMES: Lazy<Vec<GovernmentScheme>> = Lazy::new(|| {
    vec![
        GovernmentScheme {
            name: "प्रधानमंत्री मुद्रा योजना (PM MUDRA)",
            name_english: "Pradhan Mantri MUDRA Yojana",
            max_amount: 1_000_000,
            purpose: "Business/Micro Enterprises",
            interest_rate: "8-12%",
            features: &[
                "No collateral required for loans up to ₹10 lakh",
                "Three categories: Shishu (up to ₹50,000), Kishore (₹50,000-₹5 lakh), Tarun (₹5-₹10 lakh)",
            ],
            website: "https://www.mudra.org.in",
            keywords: &["mudra", "मुद्रा"],
        },
        GovernmentScheme {
            name: "किसान क्रेडिट कार्ड (KCC)",
            name_english: "Kisan Credit Card",
            max_amount: 300_000,
            purpose: "Agriculture/Farming",
            interest_rate: "4-7% (subsidized)",
            features: &[
                "Interest subvention of 2%",
                "Additional 3% incentive for timely repayment",
                "Effective rate: 4% per annum",
            ],
            website: "https://pmkisan.gov.in",
            keywords: &["kisan credit", "kcc", "किसान क्रेडिट"],
        },
        GovernmentScheme {
            name: "Stand Up India",
            name_english: "Stand Up India",
            max_amount: 10_000_000,
            purpose: "SC/ST/Women entrepreneurs",
            interest_rate: "Base rate + margin (typically 9-12%)",
            features: &[
                "For setting up greenfield enterprises",
                "Manufacturing, services, or trading sector",
                "Repayment period: 7 years with moratorium",
            ],
            website: "https://www.standupmitra.in",
            keywords: &["stand up india", "standup india", "स्टैंड अप इंडिया"],
        },
        GovernmentScheme {
            name: "PM-KISAN योजना",
            name_english: "PM-KISAN Scheme",
            max_amount: 6_000,
            purpose: "Direct income support to farmers",
            interest_rate: "N/A (Direct Benefit Transfer)",
            features: &[
                "₹6,000 per year in 3 installments",
                "Direct to bank account",
                "For all landholding farmers",
            ],
            website: "https://pmkisan.gov.in",
            keywords: &["pm-kisan", "pm kisan", "pmkisan", "पीएम किसान", "पीएम-किसान"],
        },
        GovernmentScheme {
            name: "प्रधानमंत्री आवास योजना (PMAY)",
            name_english: "Pradhan Mantri Awas Yojana",
            max_amount: 1_200_000,
            purpose: "Home loan subsidy",
            interest_rate: "Interest subsidy up to 2.67 lakh",
            features: &[
                "For EWS, LIG, and MIG categories",
                "Credit-linked subsidy on home loans",
                "Repayment period: up to 20 years",
            ],
            website: "https://pmaymis.gov.in",
            keywords: &["pmay", "awas yojana", "आवास योजना"],
        },
    ]
});

/// First catalogued scheme named anywhere in `text`.
pub fn find_mentioned_scheme(text: &str) -> Option<&'static GovernmentScheme> {
    let lowered = text.to_lowercase();
    SCHEMES.iter().find(|s| s.is_named_in(&lowered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_lists_five_schemes() {
        assert_eq!(SCHEMES.len(), 5);
        assert!(SCHEMES.iter().all(|s| s.website.starts_with("https://")));
    }

    #[test]
    fn schemes_are_recognised_in_either_script() {
        assert_eq!(
            find_mentioned_scheme("Got a call about MUDRA loan").map(|s| s.name_english),
            Some("Pradhan Mantri MUDRA Yojana")
        );
        assert_eq!(
            find_mentioned_scheme("प्रधानमंत्री आवास योजना में घर").map(|s| s.max_amount),
            Some(1_200_000)
        );
        assert_eq!(
            find_mentioned_scheme("pm kisan installment").map(|s| s.name_english),
            Some("PM-KISAN Scheme")
        );
    }

    #[test]
    fn unknown_scheme_is_not_matched() {
        assert!(find_mentioned_scheme("Golden Rural Wealth Plan").is_none());
    }
}
