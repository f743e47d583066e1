//! Password hashing with bcrypt

use crate::error::Result;

/// Default bcrypt cost factor
pub const DEFAULT_COST: u32 = 12;

/// Hash a password with bcrypt
///
/// # Arguments
/// * `password` - Password to hash
/// * `cost` - Work factor between 4 and 31
///
/// # Returns
/// Modular Crypt Format hash string (`$2b$...`)
pub fn hash(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against a bcrypt hash
pub fn verify(password: &str, hashed: &str) -> Result<bool> {
    Ok(bcrypt::verify(password, hashed)?)
}
