use thiserror::Error;

#[derive(Debug, Error)]
pub enum KarteError {
    #[error("unknown section code: {0}")]
    UnknownSection(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KarteError>;
