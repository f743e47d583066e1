use thiserror::Error;

use crate::encoding::Encoding;

/// Codec error type
#[derive(Error, Debug)]
pub enum Error {
    /// The encoding has no rule for the requested direction
    #[error("Encoding {0:?} is not supported for this operation")]
    UnsupportedEncoding(Encoding),

    /// A character fell outside the encoding's alphabet
    #[error("Invalid digit {digit:?} for {encoding:?}")]
    InvalidDigit { encoding: Encoding, digit: char },

    /// Input length is not a multiple of the encoding's group width
    #[error("Input length {length} is not a multiple of {width} for {encoding:?}")]
    InvalidLength {
        encoding: Encoding,
        length: usize,
        width: usize,
    },

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Other error
    #[error("Codec error: {0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
