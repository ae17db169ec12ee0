use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("failed to request to the exercise service")]
    Transport(#[from] reqwest::Error),
    #[error("failed to deserialize JSON data")]
    Deserialize(#[from] serde_json::Error),
    #[error("invalid url given")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to parse {0}")]
    Parse(String),
    #[error("failed to decode escaped text: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("unknown language code `{0}`")]
    UnknownLanguage(String),
}
