use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonsError {
    #[error("Duplicate key detected: {0}")]
    DuplicateKey(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Failed to serialize attribute: {0}")]
    Serialization(#[from] serde_json::Error),
}
