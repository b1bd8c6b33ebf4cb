/// Failures from the journal's I/O edges: the trade store and configuration.
/// The derivation and aggregation engines are total and never produce these.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("worker task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for JournalError {
    fn from(e: tokio::task::JoinError) -> Self {
        JournalError::Task(e.to_string())
    }
}

pub type JournalResult<T> = Result<T, JournalError>;
