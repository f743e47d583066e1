use thiserror::Error;

/// Key module error type
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed JWK, PEM, or DER input
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Recognized format carrying an algorithm this toolkit does not handle
    #[error("Unsupported key algorithm: {0}")]
    UnsupportedKeyAlgorithm(String),

    /// DER structure matched but its algorithm OID is not recognized
    #[error("Unknown algorithm ID \"{0}\"")]
    UnknownAlgorithmId(String),

    /// Key name collision on insert
    #[error("A key by the name of \"{0}\" already exists")]
    DuplicateName(String),

    /// Key name absent on lookup or delete
    #[error("A key by the name of \"{0}\" does not exist")]
    NotFound(String),

    /// Requested operation unsupported for the selected key type
    #[error("Operation {operation} is not implemented for {algorithm}")]
    OperationNotImplemented {
        operation: &'static str,
        algorithm: String,
    },

    /// Key exists but its usages exclude the requested operation
    #[error("Key \"{name}\" does not allow the {usage} operation")]
    UsageNotPermitted { usage: &'static str, name: String },

    #[error("Codec error: {0}")]
    Codec(#[from] cryptools_codec::Error),

    #[error("Crypto error: {0}")]
    Crypto(#[from] cryptools_crypto::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
