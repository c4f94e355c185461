use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Storage backend returned an error: {0}")]
    Backend(String),

    #[error("Invalid storage endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}
