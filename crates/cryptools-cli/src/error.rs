use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Codec(#[from] cryptools_codec::Error),

    #[error("{0}")]
    Crypto(#[from] cryptools_crypto::Error),

    #[error("{0}")]
    Key(#[from] cryptools_key::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type CliResult<T> = Result<T, CliError>;
