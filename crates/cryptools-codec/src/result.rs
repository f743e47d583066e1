//! Operation result display units
//!
//! Every operation in the toolkit produces one or more [`ResultItem`]s: a
//! labeled value, an optional preferred display encoding, and optional
//! file-download metadata. Items are immutable once built; the presentation
//! layer decides how to render or persist them.

use crate::{
    encode::encode,
    encoding::Encoding,
    error::Result,
};

/// The payload of a result: raw bytes or already-textual output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultValue {
    Bytes(Vec<u8>),
    Text(String),
}

/// A single labeled operation result
#[derive(Clone, Debug)]
pub struct ResultItem {
    pub label: String,
    pub value: ResultValue,
    /// Preferred encoding when rendering byte values
    pub default_encoding: Option<Encoding>,
    /// Suggested download file name
    pub filename: Option<String>,
    /// Suggested download file extension
    pub extension: Option<String>,
}

impl ResultItem {
    /// Byte-valued result with a preferred display encoding
    pub fn bytes(label: impl Into<String>, value: Vec<u8>, encoding: Encoding) -> Self {
        Self {
            label: label.into(),
            value: ResultValue::Bytes(value),
            default_encoding: Some(encoding),
            filename: None,
            extension: None,
        }
    }

    /// Textual result displayed verbatim
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: ResultValue::Text(value.into()),
            default_encoding: None,
            filename: None,
            extension: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Render the value as display text, honoring the preferred encoding
    /// (falling back to Base64 for bytes without one)
    pub fn render(&self) -> Result<String> {
        match &self.value {
            ResultValue::Text(text) => Ok(text.clone()),
            ResultValue::Bytes(bytes) => {
                let encoding = self.default_encoding.unwrap_or(Encoding::Base64);
                match encoding {
                    e if e.is_transformable() => encode(bytes, e),
                    // Display-only tags fall back to Base64
                    _ => encode(bytes, Encoding::Base64),
                }
            }
        }
    }
}
