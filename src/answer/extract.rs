//! Recovers a [`StructuredAnswer`] from raw generation-backend output.
//!
//! Backends are not contractually guaranteed to emit pure JSON: they wrap
//! objects in commentary, code fences, or partial echoes. Extraction tries a
//! direct parse, then the first balanced brace-delimited substring, and
//! finally substitutes the minimal valid empty answer so the schema contract
//! holds on every path.

use crate::answer::cleanup::clean_model_reply;
use crate::types::answer::StructuredAnswer;

/// Finds the first balanced `{...}` substring, tracking strings and escapes
/// so braces inside JSON strings do not unbalance the scan.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn finish(mut answer: StructuredAnswer) -> StructuredAnswer {
    answer.answer = clean_model_reply(&answer.answer);
    answer.clamp()
}

/// Parses backend output into a structured answer, falling back to the
/// minimal valid empty answer when no JSON object can be recovered.
///
/// Keys missing from a recovered object merge against the field defaults, so
/// a partial `{"title": "..."}` still satisfies the full contract.
///
/// # Examples
///
/// ```
/// use meteowriter::extract_structured_answer;
///
/// let a = extract_structured_answer("blah {\"title\":\"x\"} blah");
/// assert_eq!(a.title, "x");
/// assert!(a.key_numbers.is_empty());
///
/// let empty = extract_structured_answer("no json here");
/// assert_eq!(empty.title, "");
/// ```
pub fn extract_structured_answer(raw: &str) -> StructuredAnswer {
    let trimmed = raw.trim();
    if let Ok(answer) = serde_json::from_str::<StructuredAnswer>(trimmed) {
        return finish(answer);
    }
    if let Some(candidate) = first_json_object(trimmed) {
        if let Ok(answer) = serde_json::from_str::<StructuredAnswer>(candidate) {
            return finish(answer);
        }
    }
    log::warn!(
        "generation output carried no parsable answer object ({} chars); using empty answer",
        trimmed.len()
    );
    StructuredAnswer::default()
}
