//! The narrow text-generation interface. Model hosting, decoding and
//! transport all live outside this crate; the assembler only needs a way to
//! turn a prompt into raw text, and a recoverable error when that fails.

use thiserror::Error;

/// Error surfaced by a generation backend.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The backend could not be reached or refused the request.
    #[error("generation backend unavailable")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The backend answered with nothing usable.
    #[error("generation backend returned empty output")]
    EmptyOutput,
}

impl GenerateError {
    /// Wraps any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GenerateError::Backend(Box::new(err))
    }
}

/// Turns a prompt into raw model output.
///
/// Implementations are expected to be deterministic-ish (low temperature)
/// and may return arbitrary text; the extractor downstream tolerates
/// commentary around the JSON body.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
