use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
