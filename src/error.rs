use crate::answer::generate::GenerateError;
use crate::export::error::ExportError;
use crate::types::time_mode::ParseTimeModeError;
use thiserror::Error;

/// Top-level error for fallible meteowriter operations.
///
/// Summarization and answer assembly are infallible by contract; only the
/// edges that touch a sink or a generation backend can fail.
#[derive(Debug, Error)]
pub enum MeteoWriterError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    TimeMode(#[from] ParseTimeModeError),
}
