use thiserror::Error;

/// Errors raised while serializing or saving an evaluation report
#[derive(Debug, Error)]
pub enum ResultError {
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write report to '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
