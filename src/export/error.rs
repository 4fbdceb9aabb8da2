use thiserror::Error;

/// Errors from dataset-record serialization and sink writes.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize dataset record")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write dataset record to sink")]
    Io(#[from] std::io::Error),
}
