//! The structured answer contract: the fixed-shape object every query ends
//! in, no matter how little data came back. Downstream validation relies on
//! every field being present and type-correct, so the type derives `Default`
//! (the minimal valid empty answer) and serializes all fields always.

use serde::{Deserialize, Serialize};

/// Hard caps on the list-shaped answer fields.
pub const MAX_KEY_NUMBERS: usize = 8;
pub const MAX_FIGURES: usize = 4;
pub const MAX_FOLLOWUPS: usize = 5;

/// One rendered figure attached to an answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    /// Canonical variable the figure shows.
    #[serde(default)]
    pub variable: String,
    /// Short human caption.
    #[serde(default)]
    pub caption: String,
    /// Base64-encoded PNG payload.
    #[serde(default)]
    pub image: String,
}

/// The terminal artifact of a query: title, prose, key numbers, figures,
/// method, citations, limitations and follow-up suggestions.
///
/// Every field defaults to empty so a partial model output merges cleanly
/// against the contract, and `StructuredAnswer::default()` is the safe
/// fallback when nothing usable came back at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub key_numbers: Vec<String>,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(default)]
    pub suggested_followups: Vec<String>,
}

impl StructuredAnswer {
    /// Truncates the list fields to their contract caps. Applied to every
    /// answer before it leaves this crate, whichever strategy built it.
    pub fn clamp(mut self) -> Self {
        self.key_numbers.truncate(MAX_KEY_NUMBERS);
        self.figures.truncate(MAX_FIGURES);
        self.suggested_followups.truncate(MAX_FOLLOWUPS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_serializes_every_field() {
        let json = serde_json::to_value(StructuredAnswer::default()).unwrap();
        let obj = json.as_object().unwrap();
        for key in [
            "title",
            "answer",
            "key_numbers",
            "figures",
            "method",
            "citations",
            "limitations",
            "suggested_followups",
        ] {
            assert!(obj.contains_key(key), "missing field {key}");
        }
    }

    #[test]
    fn partial_json_merges_against_defaults() {
        let a: StructuredAnswer = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(a.title, "x");
        assert_eq!(a.answer, "");
        assert!(a.key_numbers.is_empty());
        assert!(a.suggested_followups.is_empty());
    }

    #[test]
    fn clamp_enforces_contract_caps() {
        let a = StructuredAnswer {
            key_numbers: (0..20).map(|i| i.to_string()).collect(),
            figures: vec![Figure::default(); 9],
            suggested_followups: (0..9).map(|i| i.to_string()).collect(),
            ..StructuredAnswer::default()
        }
        .clamp();
        assert_eq!(a.key_numbers.len(), MAX_KEY_NUMBERS);
        assert_eq!(a.figures.len(), MAX_FIGURES);
        assert_eq!(a.suggested_followups.len(), MAX_FOLLOWUPS);
    }
}
