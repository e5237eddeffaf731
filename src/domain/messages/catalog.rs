//! Locale tables for the dialogue: prompts, acknowledgements and notices.
//!
//! English and Hindi have native tables. Other locales get English text,
//! which the reply dispatcher passes through the translator.
//!
//! Every prompt is a pure function of `(field, locale)`, so a rejected answer
//! re-sends exactly the question that was asked before.

use super::format::format_rupees;
use crate::domain::foundation::{Locale, ValidationError};
use crate::domain::intake::{Education, FieldId, FieldValue, FormKind, OnboardingAnswers};

/// Language a table is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    En,
    Hi,
}

impl Table {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Hi => Table::Hi,
            _ => Table::En,
        }
    }
}

/// The question for one field.
pub fn field_prompt(field: FieldId, locale: Locale) -> String {
    let text = match (field, Table::for_locale(locale)) {
        (FieldId::Education, Table::En) => "1️⃣ Education?\nType: Graduate or Not Graduate",
        (FieldId::Education, Table::Hi) => "1️⃣ शिक्षा?\nटाइप करें: Graduate या Not Graduate",
        (FieldId::SelfEmployed, Table::En) => "2️⃣ Self Employed?\nType: Yes or No",
        (FieldId::SelfEmployed, Table::Hi) => "2️⃣ खुद का व्यवसाय?\nटाइप करें: Yes या No",
        (FieldId::Dependents, Table::En) => {
            "3️⃣ Number of Dependents?\nHow many people depend on you?\nType: 0, 1, 2, 3, 4..."
        }
        (FieldId::Dependents, Table::Hi) => {
            "3️⃣ आश्रित?\nकितने लोग आप पर निर्भर हैं?\nटाइप करें: 0, 1, 2, 3, 4..."
        }
        (FieldId::AnnualIncome, Table::En) => "4️⃣ Annual Income (in ₹)?\nExample: 600000",
        (FieldId::AnnualIncome, Table::Hi) => "4️⃣ वार्षिक आय (₹ में)?\nउदाहरण: 600000",
        (FieldId::LoanAmount, Table::En) => "5️⃣ Loan Amount Needed (in ₹)?\nExample: 4000000",
        (FieldId::LoanAmount, Table::Hi) => "5️⃣ कितना लोन चाहिए (₹ में)?\nउदाहरण: 4000000",
        (FieldId::TenureYears, Table::En) => "6️⃣ Loan Term (in years)?\nExample: 5, 10, 15, 20",
        (FieldId::TenureYears, Table::Hi) => "6️⃣ लोन अवधि (सालों में)?\nउदाहरण: 5, 10, 15, 20",
        (FieldId::CreditScore, Table::En) => "7️⃣ CIBIL/Credit Score?\n300-900, if unknown type 650",
        (FieldId::CreditScore, Table::Hi) => {
            "7️⃣ CIBIL/क्रेडिट स्कोर?\n300-900, नहीं पता तो 650 टाइप करें"
        }
        (FieldId::ResidentialAssets, Table::En) => {
            "8️⃣ Residential Assets Value (in ₹)?\nHome/Plot value, 0 if none\nExample: 2000000"
        }
        (FieldId::ResidentialAssets, Table::Hi) => {
            "8️⃣ आवासीय संपत्ति का मूल्य (₹)?\nघर/प्लॉट, नहीं है तो 0\nउदाहरण: 2000000"
        }
        (FieldId::CommercialAssets, Table::En) => {
            "9️⃣ Commercial Assets Value (in ₹)?\nShop/Office, 0 if none\nExample: 500000"
        }
        (FieldId::CommercialAssets, Table::Hi) => {
            "9️⃣ व्यावसायिक संपत्ति (₹)?\nदुकान/ऑफिस, नहीं है तो 0\nउदाहरण: 500000"
        }
        (FieldId::LuxuryAssets, Table::En) => {
            "🔟 Luxury Assets Value (in ₹)?\nCar/Bike/Jewelry, 0 if none\nExample: 300000"
        }
        (FieldId::LuxuryAssets, Table::Hi) => {
            "🔟 लक्जरी संपत्ति (₹)?\nकार/बाइक/ज्वेलरी, नहीं है तो 0\nउदाहरण: 300000"
        }
        (FieldId::BankAssets, Table::En) => {
            "1️⃣1️⃣ Bank Assets Value (in ₹)?\nSavings/FD/Deposits, 0 if none\nExample: 100000"
        }
        (FieldId::BankAssets, Table::Hi) => {
            "1️⃣1️⃣ बैंक में जमा (₹)?\nSavings/FD/Deposits, नहीं है तो 0\nउदाहरण: 100000"
        }
        (FieldId::SchemeName, Table::En) => "1️⃣ Scheme Name?\nType the name of the loan/scheme",
        (FieldId::SchemeName, Table::Hi) => "1️⃣ योजना का नाम?\nयोजना का नाम टाइप करें",
        (FieldId::SchemeDescription, Table::En) => "2️⃣ Description?\nWhat promises are being made?",
        (FieldId::SchemeDescription, Table::Hi) => "2️⃣ विवरण?\nक्या वादे किए जा रहे हैं?",
        (FieldId::SchemeSource, Table::En) => {
            "3️⃣ Source?\nWhere did you hear about this?\nExample: WhatsApp, Website, Agent"
        }
        (FieldId::SchemeSource, Table::Hi) => {
            "3️⃣ स्रोत?\nआपको कहां से पता चला?\nउदाहरण: WhatsApp, Website, Agent"
        }
        (FieldId::Language, _) => {
            return format!("🌍 Choose your language / अपनी भाषा चुनें:\n{}", language_options())
        }
        (FieldId::Location, Table::En) => {
            "Now enter your city/district:\nExample: Jaipur, Delhi, Lucknow"
        }
        (FieldId::Location, Table::Hi) => "अब अपना शहर/जिला बताएं:\nउदाहरण: जयपुर, दिल्ली, लखनऊ",
    };
    text.to_string()
}

fn language_options() -> String {
    Locale::ALL
        .iter()
        .map(|l| match l {
            Locale::En => l.english_name().to_string(),
            _ => format!("{} / {}", l.native_name(), l.english_name()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Heading shown when a form starts, before its first question.
pub fn form_intro(form: FormKind, locale: Locale) -> &'static str {
    match (form, Table::for_locale(locale)) {
        (FormKind::Loan, Table::En) => {
            "🏦 Loan Eligibility Check\n\nI will ask you 11 questions to check your loan eligibility."
        }
        (FormKind::Loan, Table::Hi) => {
            "🏦 लोन पात्रता जांच\n\nमैं 11 सवाल पूछूंगा आपकी लोन पात्रता जांचने के लिए"
        }
        (FormKind::Fraud, Table::En) => {
            "🔍 Fraud Detection Service\n\nI will help you check if a loan scheme is genuine or fake."
        }
        (FormKind::Fraud, Table::Hi) => {
            "🔍 धोखाधड़ी जांच सेवा\n\nमैं जांच करूंगा कि लोन योजना असली है या नकली"
        }
        (FormKind::Onboarding, Table::En) => "🌍 Language & Location Setup",
        (FormKind::Onboarding, Table::Hi) => "🌍 भाषा और जगह सेटिंग",
    }
}

pub fn cancel_hint(locale: Locale) -> &'static str {
    match Table::for_locale(locale) {
        Table::En => "/cancel to stop",
        Table::Hi => "/cancel रद्द करने के लिए",
    }
}

/// Opening message of a form: heading, first question, cancel hint.
pub fn form_start(form: FormKind, locale: Locale) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        form_intro(form, locale),
        field_prompt(form.first_field(), locale),
        cancel_hint(locale)
    )
}

/// Echo of an accepted answer.
pub fn acknowledgement(field: FieldId, value: &FieldValue, locale: Locale) -> String {
    let table = Table::for_locale(locale);
    let shown = display_value(value, table);
    match (field, table) {
        (FieldId::Education, Table::En) => format!("✅ Education: {}", shown),
        (FieldId::Education, Table::Hi) => format!("✅ शिक्षा: {}", shown),
        (FieldId::SelfEmployed, Table::En) => format!("✅ Self Employed: {}", shown),
        (FieldId::SelfEmployed, Table::Hi) => format!("✅ रोजगार: {}", shown),
        (FieldId::Dependents, Table::En) => format!("✅ Dependents: {}", shown),
        (FieldId::Dependents, Table::Hi) => format!("✅ आश्रित: {}", shown),
        (FieldId::AnnualIncome, Table::En) => format!("✅ Annual Income: {}", shown),
        (FieldId::AnnualIncome, Table::Hi) => format!("✅ वार्षिक आय: {}", shown),
        (FieldId::LoanAmount, Table::En) => format!("✅ Loan Amount: {}", shown),
        (FieldId::LoanAmount, Table::Hi) => format!("✅ लोन राशि: {}", shown),
        (FieldId::TenureYears, Table::En) => format!("✅ Loan Term: {} years", shown),
        (FieldId::TenureYears, Table::Hi) => format!("✅ अवधि: {} साल", shown),
        (FieldId::CreditScore, Table::En) => format!("✅ CIBIL Score: {}", shown),
        (FieldId::CreditScore, Table::Hi) => format!("✅ CIBIL स्कोर: {}", shown),
        (FieldId::ResidentialAssets, Table::En) => format!("✅ Residential Assets: {}", shown),
        (FieldId::ResidentialAssets, Table::Hi) => format!("✅ आवासीय संपत्ति: {}", shown),
        (FieldId::CommercialAssets, Table::En) => format!("✅ Commercial Assets: {}", shown),
        (FieldId::CommercialAssets, Table::Hi) => format!("✅ व्यावसायिक संपत्ति: {}", shown),
        (FieldId::LuxuryAssets, Table::En) => format!("✅ Luxury Assets: {}", shown),
        (FieldId::LuxuryAssets, Table::Hi) => format!("✅ लक्जरी संपत्ति: {}", shown),
        (FieldId::BankAssets, Table::En) => format!("✅ Bank Assets: {}", shown),
        (FieldId::BankAssets, Table::Hi) => format!("✅ बैंक जमा: {}", shown),
        (FieldId::SchemeName, Table::En) => format!("✅ Scheme: {}", shown),
        (FieldId::SchemeName, Table::Hi) => format!("✅ योजना: {}", shown),
        (FieldId::SchemeDescription, Table::En) => "✅ Description saved".to_string(),
        (FieldId::SchemeDescription, Table::Hi) => "✅ विवरण सहेजा गया".to_string(),
        (FieldId::SchemeSource, Table::En) => format!("✅ Source: {}", shown),
        (FieldId::SchemeSource, Table::Hi) => format!("✅ स्रोत: {}", shown),
        (FieldId::Language, Table::En) => format!("✅ Language selected: {}", shown),
        (FieldId::Language, Table::Hi) => format!("✅ भाषा चुनी गई: {}", shown),
        (FieldId::Location, Table::En) => format!("✅ Location: {}", shown),
        (FieldId::Location, Table::Hi) => format!("✅ जगह: {}", shown),
    }
}

fn display_value(value: &FieldValue, table: Table) -> String {
    match value {
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Amount(amount) => format_rupees(*amount),
        FieldValue::Education(Education::Graduate) => "Graduate".to_string(),
        FieldValue::Education(Education::NotGraduate) => "Not Graduate".to_string(),
        FieldValue::Flag(flag) => match (flag, table) {
            (true, Table::En) => "Yes".to_string(),
            (false, Table::En) => "No".to_string(),
            (true, Table::Hi) => "हाँ".to_string(),
            (false, Table::Hi) => "नहीं".to_string(),
        },
        FieldValue::Locale(locale) => locale.english_name().to_string(),
        FieldValue::Text(text) => text.clone(),
    }
}

/// Why an answer was refused, in words a user can act on.
pub fn validation_error(error: &ValidationError, locale: Locale) -> String {
    let table = Table::for_locale(locale);
    match (error, table) {
        (ValidationError::EmptyField { .. }, Table::En) => "❌ Please type an answer".to_string(),
        (ValidationError::EmptyField { .. }, Table::Hi) => {
            "❌ कृपया जवाब टाइप करें".to_string()
        }
        (ValidationError::NotANumber { .. }, Table::En) => {
            "❌ Please enter a valid number".to_string()
        }
        (ValidationError::NotANumber { .. }, Table::Hi) => {
            "❌ कृपया सही संख्या दर्ज करें".to_string()
        }
        (ValidationError::NotAWholeNumber { .. }, Table::En) => {
            "❌ Please enter a whole number".to_string()
        }
        (ValidationError::NotAWholeNumber { .. }, Table::Hi) => {
            "❌ कृपया पूर्ण संख्या दर्ज करें".to_string()
        }
        (ValidationError::OutOfRange { min, max, .. }, Table::En) => {
            format!("❌ Please enter a number between {} and {}", min, max)
        }
        (ValidationError::OutOfRange { min, max, .. }, Table::Hi) => {
            format!("❌ कृपया {} से {} के बीच संख्या दर्ज करें", min, max)
        }
        (ValidationError::NotPositive { .. }, Table::En) => {
            "❌ Amount must be greater than 0".to_string()
        }
        (ValidationError::NotPositive { .. }, Table::Hi) => {
            "❌ राशि 0 से अधिक होनी चाहिए".to_string()
        }
        (ValidationError::Negative { .. }, Table::En) => {
            "❌ Value cannot be negative".to_string()
        }
        (ValidationError::Negative { .. }, Table::Hi) => {
            "❌ मान ऋणात्मक नहीं हो सकता".to_string()
        }
        (ValidationError::UnknownOption { .. }, Table::En) => {
            "❌ Please choose one of the options".to_string()
        }
        (ValidationError::UnknownOption { .. }, Table::Hi) => {
            "❌ कृपया दिए गए विकल्पों में से चुनें".to_string()
        }
        (ValidationError::TooLong { limit, .. }, Table::En) => {
            format!("❌ Please keep it under {} characters", limit)
        }
        (ValidationError::TooLong { limit, .. }, Table::Hi) => {
            format!("❌ कृपया {} अक्षरों से कम लिखें", limit)
        }
        (ValidationError::InvalidFormat { .. }, Table::En) => {
            "❌ That answer is not valid here".to_string()
        }
        (ValidationError::InvalidFormat { .. }, Table::Hi) => {
            "❌ यह जवाब यहाँ मान्य नहीं है".to_string()
        }
    }
}

/// Refusal followed by the unchanged question.
pub fn reprompt(error: &ValidationError, field: FieldId, locale: Locale) -> String {
    format!(
        "{}\n\n{}",
        validation_error(error, locale),
        field_prompt(field, locale)
    )
}

/// Acknowledgement followed by the next question.
pub fn advance(answered: FieldId, value: &FieldValue, next: FieldId, locale: Locale) -> String {
    format!(
        "{}\n\n{}",
        acknowledgement(answered, value, locale),
        field_prompt(next, locale)
    )
}

pub fn welcome(locale: Locale) -> &'static str {
    match Table::for_locale(locale) {
        Table::En => {
            "👋 Hello!\n\nI am Gramin Sahayak Bot 🏦\n\nMain Services:\n🏦 /loan – Check loan eligibility\n⚠️ /fraud – Detect fraud schemes\n🌍 /language – Choose language\n\n/cancel – Stop the current form"
        }
        Table::Hi => {
            "🙏 नमस्ते!\n\nमैं ग्रामीण सहायक हूँ 🏦\n\nमुख्य सेवाएं:\n🏦 /loan – लोन पात्रता जांच\n⚠️ /fraud – धोखाधड़ी जांच\n🌍 /language – भाषा चुनें\n\n/cancel – चालू फॉर्म रद्द करें"
        }
    }
}

pub fn cancelled(locale: Locale) -> &'static str {
    match Table::for_locale(locale) {
        Table::En => "❌ Cancelled. Type /start to see available commands",
        Table::Hi => "❌ रद्द किया गया। /start टाइप करें कमांड देखने के लिए",
    }
}

pub fn nothing_to_cancel(locale: Locale) -> &'static str {
    match Table::for_locale(locale) {
        Table::En => "Nothing to cancel. Type /start to see available commands",
        Table::Hi => "रद्द करने को कुछ नहीं है। /start टाइप करें कमांड देखने के लिए",
    }
}

pub fn session_expired(locale: Locale) -> &'static str {
    match Table::for_locale(locale) {
        Table::En => "⌛ Your session expired due to inactivity. Please start again.",
        Table::Hi => "⌛ निष्क्रियता के कारण आपका सत्र समाप्त हो गया। कृपया फिर से शुरू करें।",
    }
}

pub fn processing(form: FormKind, locale: Locale) -> &'static str {
    match (form, Table::for_locale(locale)) {
        (FormKind::Fraud, Table::En) => "🔍 Checking for fraud signals...",
        (FormKind::Fraud, Table::Hi) => "🔍 धोखाधड़ी के संकेत जांच रहे हैं...",
        (_, Table::En) => "⏳ Checking your eligibility...",
        (_, Table::Hi) => "⏳ जांच हो रही है...",
    }
}

pub fn decision_failed(locale: Locale) -> &'static str {
    match Table::for_locale(locale) {
        Table::En => "❌ Error checking eligibility. Please try again with /loan",
        Table::Hi => "❌ जांच में समस्या हुई। कृपया /loan से फिर प्रयास करें",
    }
}

pub fn setup_complete(answers: &OnboardingAnswers, locale: Locale) -> String {
    let language = answers.locale.english_name();
    match Table::for_locale(locale) {
        Table::En => format!(
            "✅ Setup Complete!\n\nLanguage: {}\nLocation: {}\n\nYou will now receive daily voice advice every morning! 📢",
            language, answers.location
        ),
        Table::Hi => format!(
            "✅ सेटिंग पूरी हुई!\n\nभाषा: {}\nजगह: {}\n\nअब आपको रोज़ सुबह आवाज़ में सलाह मिलेगी! 📢",
            language, answers.location
        ),
    }
}
