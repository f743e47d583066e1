pub mod bcrypt;
pub mod decrypt;
pub mod delete;
pub mod digest;
pub mod encrypt;
pub mod export;
pub mod generate;
pub mod import;
pub mod list;
pub mod pbkdf2;
pub mod random;
pub mod sign;
pub mod srp;
pub mod verify;

use std::fs;
use std::path::{Path, PathBuf};

use cryptools_codec::{encode, Encoding, ResultItem, ResultValue};
use cryptools_crypto::{digest::HashAlgorithm, EcCurve};
use cryptools_key::{FileKeyStore, KeyAlgorithm, KeyRing};

use crate::error::{CliError, CliResult};

/// Open the key ring backed by the store file
pub fn open_ring(store: &Path) -> CliResult<KeyRing> {
    Ok(KeyRing::open(Box::new(FileKeyStore::new(store)))?)
}

/// Message bytes from an inline string or a file
pub fn read_message(text: Option<String>, file: Option<PathBuf>) -> CliResult<Vec<u8>> {
    match (text, file) {
        (Some(text), _) => Ok(text.into_bytes()),
        (None, Some(path)) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            Ok(fs::read(path)?)
        }
        (None, None) => Err(CliError::InvalidInput(
            "provide either --text or --file".to_string(),
        )),
    }
}

pub fn parse_hash(name: &str) -> CliResult<HashAlgorithm> {
    match name.to_lowercase().as_str() {
        "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
        "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
        "sha384" | "sha-384" => Ok(HashAlgorithm::Sha384),
        "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
        _ => Err(CliError::InvalidInput(format!(
            "unknown hash algorithm \"{name}\", expected sha1, sha256, sha384 or sha512"
        ))),
    }
}

pub fn parse_curve(name: &str) -> CliResult<EcCurve> {
    match name.to_lowercase().as_str() {
        "p256" | "p-256" => Ok(EcCurve::P256),
        "p384" | "p-384" => Ok(EcCurve::P384),
        "p521" | "p-521" => Ok(EcCurve::P521),
        _ => Err(CliError::InvalidInput(format!(
            "unknown curve \"{name}\", expected p256, p384 or p521"
        ))),
    }
}

/// Parse an algorithm name plus its parameters into a [`KeyAlgorithm`]
pub fn parse_algorithm(
    name: &str,
    length: u32,
    hash: &str,
    curve: &str,
) -> CliResult<KeyAlgorithm> {
    match name.to_lowercase().as_str() {
        "aes-cbc" => Ok(KeyAlgorithm::AesCbc { length }),
        "aes-ctr" => Ok(KeyAlgorithm::AesCtr { length }),
        "aes-gcm" => Ok(KeyAlgorithm::AesGcm { length }),
        "hmac" => Ok(KeyAlgorithm::Hmac {
            hash: parse_hash(hash)?,
        }),
        "rsa-oaep" => Ok(KeyAlgorithm::Rsa {
            variant: cryptools_key::RsaVariant::Oaep,
            hash: parse_hash(hash)?,
        }),
        "rsa-pkcs1" => Ok(KeyAlgorithm::Rsa {
            variant: cryptools_key::RsaVariant::Pkcs1V15,
            hash: parse_hash(hash)?,
        }),
        "rsa-pss" => Ok(KeyAlgorithm::Rsa {
            variant: cryptools_key::RsaVariant::Pss,
            hash: parse_hash(hash)?,
        }),
        "ecdsa" => Ok(KeyAlgorithm::Ecdsa {
            curve: parse_curve(curve)?,
        }),
        _ => Err(CliError::InvalidInput(format!(
            "unknown algorithm \"{name}\""
        ))),
    }
}

/// Print result items as "label: value" lines, falling back to Base64 when
/// the preferred rendering fails (e.g. non-UTF-8 plaintext)
pub fn print_items(items: &[ResultItem]) -> CliResult<()> {
    for item in items {
        let rendered = match item.render() {
            Ok(text) => text,
            Err(_) => match &item.value {
                ResultValue::Bytes(bytes) => encode(bytes, Encoding::Base64)?,
                ResultValue::Text(text) => text.clone(),
            },
        };
        if rendered.contains('\n') {
            println!("{}:\n{rendered}", item.label);
        } else {
            println!("{}: {rendered}", item.label);
        }
    }
    Ok(())
}
