//! HMAC signing and verification

use hmac::{digest::KeyInit, Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::{
    digest::HashAlgorithm,
    error::{Error, Result},
};

/// Compute an HMAC tag over a message
///
/// # Arguments
/// * `key` - Secret key of any length
/// * `message` - Data to authenticate
/// * `hash` - Underlying hash function
pub fn sign(key: &[u8], message: &[u8], hash: HashAlgorithm) -> Result<Vec<u8>> {
    match hash {
        HashAlgorithm::Sha1 => mac::<Hmac<Sha1>>(key, message),
        HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(key, message),
        HashAlgorithm::Sha384 => mac::<Hmac<Sha384>>(key, message),
        HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(key, message),
    }
}

/// Verify an HMAC tag in constant time
pub fn verify(key: &[u8], message: &[u8], tag: &[u8], hash: HashAlgorithm) -> Result<bool> {
    let ok = match hash {
        HashAlgorithm::Sha1 => check::<Hmac<Sha1>>(key, message, tag)?,
        HashAlgorithm::Sha256 => check::<Hmac<Sha256>>(key, message, tag)?,
        HashAlgorithm::Sha384 => check::<Hmac<Sha384>>(key, message, tag)?,
        HashAlgorithm::Sha512 => check::<Hmac<Sha512>>(key, message, tag)?,
    };
    Ok(ok)
}

fn mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        <M as Mac>::new_from_slice(key).map_err(|_| Error::InvalidKeyLength(key.len()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn check<M: Mac + KeyInit>(key: &[u8], message: &[u8], tag: &[u8]) -> Result<bool> {
    let mut mac =
        <M as Mac>::new_from_slice(key).map_err(|_| Error::InvalidKeyLength(key.len()))?;
    mac.update(message);
    Ok(mac.verify_slice(tag).is_ok())
}
