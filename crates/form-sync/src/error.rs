use form_sync_path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("MISSING_NAME")]
    MissingName,
    #[error("INVALID_PATH: {0}")]
    InvalidPath(#[from] PathError),
    #[error("DECODE: {0}")]
    Decode(#[from] serde_json::Error),
}
