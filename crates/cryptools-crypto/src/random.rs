//! Secure randomness

use uuid::Uuid;

use crate::error::{Error, Result};

/// Generate `len` bytes from the operating system's secure random source
pub fn bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    getrandom::fill(&mut buf).map_err(|e| Error::Random(e.to_string()))?;
    Ok(buf)
}

/// Generate a random version-4 UUID
pub fn uuid_v4() -> Uuid {
    Uuid::new_v4()
}
