//! Binary-to-text codecs and heuristic encoding detection
//!
//! This crate provides bidirectional conversion between raw byte buffers and
//! textual representations (binary, octal, hexadecimal, Base64, bcrypt
//! Base64, UTF-8, and a handful of decode-only forms), plus a heuristic
//! classifier that guesses which encoding a given string represents.

pub mod detect;
pub mod encode;
pub mod encoding;
pub mod error;
pub mod result;

pub use detect::guess_encoding;
pub use encode::{decode, encode};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use result::{ResultItem, ResultValue};
