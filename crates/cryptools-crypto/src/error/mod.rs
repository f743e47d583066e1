use thiserror::Error;

/// Crypto error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("Signature error: {0}")]
    Signature(#[from] p256::ecdsa::Error),

    #[error("Invalid key length: {0} bytes")]
    InvalidKeyLength(usize),

    #[error("Invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// PSS salt length above the RFC 8017 ceiling for this key/hash pair
    #[error("Salt length {requested} exceeds maximum {maximum} for this key")]
    SaltTooLong { requested: usize, maximum: usize },

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Random source error: {0}")]
    Random(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
