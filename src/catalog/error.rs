use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TLE directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid tle format: expected 2 or 3 non-empty lines")]
    InvalidFormat,
    #[error("invalid TLE in {source_name}: {message}")]
    InvalidTle {
        source_name: String,
        message: String,
    },
}
