use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("dictionary service '{0}' not found")]
    UnknownService(String),

    #[error("failed to construct dictionary service: {0}")]
    Construction(#[from] DictionaryError),
}
