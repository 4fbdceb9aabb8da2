//! Best-effort scrubbing of generation-backend replies before they reach a
//! user-facing field. Backends echo prompt scaffolding, append hashtags, or
//! tack on disclaimers; none of that belongs in an answer. Cleanup is pure
//! text surgery and never fails — when nothing matches, the input comes back
//! unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

// Static regexes, compiled once at first use.

/// Markers the prompt plants so the reply can be located inside an echo.
static ANSWER_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:assistant\s*\(answer only\)\s*:|answer only\s*:)").expect("valid regex")
});

/// Commentary about the exchange itself, echoed back by the backend.
static ECHOED_COMMENTARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:user asked|assistant'?s? response).*").expect("valid regex"));

/// Inline disclaimer boilerplate, removed to end of line.
static DISCLAIMER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:please note|disclaimer|knowledge cutoff)\b.*").expect("valid regex")
});

/// Whole meta lines (sources, notes, leftover context headers).
static META_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:note|disclaimer|source|context)\b\s*:?.*$").expect("valid regex")
});

/// Hashtag runs; backends love closing with `#weather #forecast`.
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[\w-]+").expect("valid regex"));

static EXCESS_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Returns the reply with prompt echoes, meta commentary, hashtags and
/// disclaimer boilerplate removed.
///
/// When the backend echoed the whole exchange, only the text after the last
/// "answer only:" marker survives. Every step is a no-op on text it does not
/// recognize, so clean input passes through verbatim.
pub fn clean_model_reply(raw: &str) -> String {
    let mut text = raw.trim().to_string();
    if text.is_empty() {
        return text;
    }

    if let Some(m) = ANSWER_MARKER.find_iter(&text).last() {
        text = text[m.end()..].to_string();
    }
    text = ECHOED_COMMENTARY.replace_all(&text, "").into_owned();
    text = DISCLAIMER.replace_all(&text, "").into_owned();
    text = META_LINE.replace_all(&text, "").into_owned();
    text = HASHTAG.replace_all(&text, "").into_owned();
    text = EXCESS_BLANK_LINES.replace_all(&text, "\n\n").into_owned();
    text.trim().to_string()
}
