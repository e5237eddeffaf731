//! Message composer - renders decision and fraud results as reply text.
//!
//! Pure templating. Numbers arrive computed; the composer only formats
//! them for the reader's locale.

use super::catalog::Table;
use super::format::{format_percent, format_rupees, format_rupees_paise};
use crate::domain::decision::DecisionResult;
use crate::domain::foundation::Locale;
use crate::domain::fraud::{FraudAssessment, FraudSignal, RiskLevel};

/// Renders pipeline results for a locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageComposer;

impl MessageComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn decision(&self, result: &DecisionResult, locale: Locale) -> String {
        match (result.eligible, Table::for_locale(locale)) {
            (true, Table::En) => format!(
                "✅ Congratulations! You are eligible\n\n\
                 💰 Approved: {}\n\
                 📅 EMI: {}/month\n\
                 📊 Rate: {}%\n\
                 ⏱ Tenure: {} months\n\
                 🎯 Confidence: {}%\n\n\
                 💡 Next steps:\n\
                 1. Visit your nearest bank branch\n\
                 2. Bring the required documents",
                format_rupees(result.recommended_amount),
                format_rupees_paise(result.emi),
                format_percent(result.interest_rate_percent),
                result.tenure_months,
                result.confidence_percent(),
            ),
            (true, Table::Hi) => format!(
                "✅ बधाई हो! आप लोन के लिए पात्र हैं\n\n\
                 💰 अनुमोदित राशि: {}\n\
                 📅 मासिक EMI: {}\n\
                 📊 ब्याज दर: {}% प्रति वर्ष\n\
                 ⏱ अवधि: {} महीने\n\
                 🎯 विश्वास: {}%\n\n\
                 💡 अगले कदम:\n\
                 1. नज़दीकी बैंक शाखा में जाएं\n\
                 2. आवश्यक दस्तावेज़ ले जाएं",
                format_rupees(result.recommended_amount),
                format_rupees_paise(result.emi),
                format_percent(result.interest_rate_percent),
                result.tenure_months,
                result.confidence_percent(),
            ),
            (false, Table::En) => "❌ Not currently eligible\n\n\
                 📌 Suggestions:\n\
                 • Improve CIBIL to 700+\n\
                 • Increase collateral\n\
                 • Request a smaller amount"
                .to_string(),
            (false, Table::Hi) => "❌ आप वर्तमान में लोन के लिए पात्र नहीं हैं\n\n\
                 📌 सुझाव:\n\
                 • अपना CIBIL स्कोर 700+ तक बढ़ाएं\n\
                 • संपत्ति का मूल्य बढ़ाएं\n\
                 • छोटी राशि का लोन लें"
                .to_string(),
        }
    }

    pub fn fraud(&self, assessment: &FraudAssessment, locale: Locale) -> String {
        let table = Table::for_locale(locale);
        let mut text = String::from(risk_heading(assessment.risk_level, table));

        text.push_str(&match table {
            Table::En => format!("\n\nRisk score: {}%", score_percent(assessment.score)),
            Table::Hi => format!("\n\nजोखिम स्कोर: {}%", score_percent(assessment.score)),
        });

        if !assessment.signals.is_empty() {
            text.push_str(match table {
                Table::En => "\n\nWarning signs:",
                Table::Hi => "\n\nचेतावनी के संकेत:",
            });
            for signal in &assessment.signals {
                text.push_str("\n• ");
                text.push_str(signal_label(*signal, table));
            }
        }

        if let Some(scheme) = &assessment.known_scheme {
            text.push_str(&match table {
                Table::En => format!(
                    "\n\nℹ️ {} is a real government scheme. Apply only through {} or a bank branch.",
                    scheme.name_english, scheme.website
                ),
                Table::Hi => format!(
                    "\n\nℹ️ {} एक असली सरकारी योजना है। केवल {} या बैंक शाखा से ही आवेदन करें।",
                    scheme.name, scheme.website
                ),
            });
        }

        text.push_str(match table {
            Table::En => {
                "\n\n🛡 Never pay fees in advance or share your OTP/PIN. Banks do not ask for them."
            }
            Table::Hi => {
                "\n\n🛡 कभी भी पहले शुल्क न दें और अपना OTP/PIN साझा न करें। बैंक इन्हें नहीं मांगते।"
            }
        });
        text
    }
}

fn score_percent(score: f64) -> u32 {
    (score * 100.0).round().clamp(0.0, 100.0) as u32
}

fn risk_heading(level: RiskLevel, table: Table) -> &'static str {
    match (level, table) {
        (RiskLevel::High, Table::En) => "🚨 HIGH RISK - This looks like a fraud!",
        (RiskLevel::High, Table::Hi) => "🚨 उच्च जोखिम - यह धोखाधड़ी लगती है!",
        (RiskLevel::Medium, Table::En) => "⚠️ MEDIUM RISK - Be careful",
        (RiskLevel::Medium, Table::Hi) => "⚠️ मध्यम जोखिम - सावधान रहें",
        (RiskLevel::Low, Table::En) => "✅ LOW RISK - No major warning signs found",
        (RiskLevel::Low, Table::Hi) => "✅ कम जोखिम - कोई बड़ा चेतावनी संकेत नहीं मिला",
    }
}

fn signal_label(signal: FraudSignal, table: Table) -> &'static str {
    match (signal, table) {
        (FraudSignal::AdvanceFee, Table::En) => "Asks for money before giving the loan",
        (FraudSignal::AdvanceFee, Table::Hi) => "लोन से पहले पैसे मांगे जा रहे हैं",
        (FraudSignal::GuaranteedApproval, Table::En) => "Promises guaranteed approval",
        (FraudSignal::GuaranteedApproval, Table::Hi) => "पक्की मंजूरी का वादा",
        (FraudSignal::NoVerification, Table::En) => "No documents or credit check needed",
        (FraudSignal::NoVerification, Table::Hi) => "बिना दस्तावेज या CIBIL जांच के",
        (FraudSignal::Urgency, Table::En) => "Pressure to act quickly",
        (FraudSignal::Urgency, Table::Hi) => "जल्दबाजी का दबाव",
        (FraudSignal::UnofficialChannel, Table::En) => {
            "Offered through WhatsApp, phone or an agent"
        }
        (FraudSignal::UnofficialChannel, Table::Hi) => "व्हाट्सएप, फोन या एजेंट के जरिए प्रस्ताव",
        (FraudSignal::UnrealisticInterest, Table::En) => "Unrealistically low interest",
        (FraudSignal::UnrealisticInterest, Table::Hi) => "अविश्वसनीय रूप से कम ब्याज",
        (FraudSignal::CredentialRequest, Table::En) => "Asks for OTP, PIN or password",
        (FraudSignal::CredentialRequest, Table::Hi) => "OTP, PIN या पासवर्ड मांगा जा रहा है",
    }
}
