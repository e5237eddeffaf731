//! Two-bucket classifiers for free-text categorical answers.
//!
//! Messaging users type whatever is at hand, so these matchers are lenient.
//! Each one maps every possible input onto exactly one of two buckets and
//! documents its default bucket; no third category can leak through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Education category as the eligibility model encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    Graduate,
    NotGraduate,
}

impl Education {
    /// Model encoding: 1 for graduates, 0 otherwise.
    pub fn as_feature(&self) -> f64 {
        match self {
            Education::Graduate => 1.0,
            Education::NotGraduate => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Education::Graduate => "Graduate",
            Education::NotGraduate => "Not Graduate",
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

const GRADUATE_MARKERS: &[&str] = &["graduate", "स्नातक"];
const NEGATION_MARKERS: &[&str] = &["not", "non", "no", "un", "under", "नहीं", "गैर"];

/// Buckets a free-text education answer.
///
/// Text mentioning "graduate" is `Graduate` unless the mention is negated
/// ("Not Graduate", "non-graduate", "undergraduate"). Default bucket:
/// `NotGraduate`.
pub fn classify_education(raw: &str) -> Education {
    let text = raw.trim().to_lowercase();

    let Some((index, marker)) = GRADUATE_MARKERS
        .iter()
        .find_map(|marker| text.find(marker).map(|index| (index, *marker)))
    else {
        return Education::NotGraduate;
    };

    let before = text[..index].trim_end_matches(|c: char| c.is_whitespace() || c == '-' || c == '_');
    let negated_before = NEGATION_MARKERS.iter().any(|neg| {
        before.ends_with(neg) || before.ends_with(&format!("{} a", neg))
    });
    let negated_after = text[index + marker.len()..].contains("नहीं");

    if negated_before || negated_after {
        Education::NotGraduate
    } else {
        Education::Graduate
    }
}

/// Buckets a free-text yes/no answer.
///
/// Anything containing "yes" (or a bare "y", or Hindi "haan") is `true`.
/// Default bucket: `false`.
pub fn classify_yes_no(raw: &str) -> bool {
    let text = raw.trim().to_lowercase();
    text.contains("yes")
        || text == "y"
        || text.contains("haan")
        || text.contains("हाँ")
        || text.contains("हां")
}
