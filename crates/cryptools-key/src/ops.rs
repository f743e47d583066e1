//! Cryptographic operations over key records
//!
//! Each operation checks the record's usages, dispatches on its algorithm,
//! and returns labeled [`ResultItem`]s. AES encryption draws a fresh IV or
//! counter block and returns it alongside the ciphertext; decryption takes
//! the same value back from the caller.

use cryptools_codec::{Encoding, ResultItem};
use cryptools_crypto::{
    asymmetric::{ecdsa, rsa},
    mac, random,
    symmetric::{self, AesParams, CbcParams, CtrParams, GcmParams},
    Ecdsa, Rsa,
};

use crate::{
    algorithm::{KeyAlgorithm, KeyUsage, RsaVariant},
    error::{Error, Result},
    keyring::KeyRecord,
    material::KeyMaterial,
};

const GCM_IV_LEN: usize = 12;
const BLOCK_LEN: usize = 16;

/// Encrypt under a key record
///
/// AES modes return the ciphertext plus the generated IV or counter block;
/// RSA-OAEP returns the ciphertext alone.
pub fn encrypt(record: &KeyRecord, plaintext: &[u8]) -> Result<Vec<ResultItem>> {
    require_usage(record, KeyUsage::Encrypt, "encrypt")?;

    match record.algorithm {
        KeyAlgorithm::AesGcm { .. } => {
            let iv = random::bytes(GCM_IV_LEN)?;
            let params = AesParams::Gcm(GcmParams { iv: &iv, aad: &[] });
            let ciphertext = symmetric::encrypt(secret_bytes(record)?, &params, plaintext)?;
            Ok(vec![
                ResultItem::bytes("Encrypted Data", ciphertext, Encoding::Base64),
                ResultItem::bytes("Initialization Vector", iv, Encoding::Hexadecimal),
            ])
        }
        KeyAlgorithm::AesCbc { .. } => {
            let iv = random::bytes(BLOCK_LEN)?;
            let params = AesParams::Cbc(CbcParams { iv: &iv });
            let ciphertext = symmetric::encrypt(secret_bytes(record)?, &params, plaintext)?;
            Ok(vec![
                ResultItem::bytes("Encrypted Data", ciphertext, Encoding::Base64),
                ResultItem::bytes("Initialization Vector", iv, Encoding::Hexadecimal),
            ])
        }
        KeyAlgorithm::AesCtr { .. } => {
            let counter = random::bytes(BLOCK_LEN)?;
            let params = AesParams::Ctr(CtrParams { counter: &counter });
            let ciphertext = symmetric::encrypt(secret_bytes(record)?, &params, plaintext)?;
            Ok(vec![
                ResultItem::bytes("Encrypted Data", ciphertext, Encoding::Base64),
                ResultItem::bytes("Counter Block", counter, Encoding::Hexadecimal),
            ])
        }
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Oaep,
            hash,
        } => {
            let public_key = rsa_public(record)?;
            let ciphertext = rsa::encrypt_oaep(&public_key, plaintext, hash)?;
            Ok(vec![ResultItem::bytes(
                "Encrypted Data",
                ciphertext,
                Encoding::Base64,
            )])
        }
        ref other => Err(not_implemented("encryption", other)),
    }
}

/// Decrypt under a key record; `iv` is the IV or counter block returned by
/// encryption, unused for RSA-OAEP
pub fn decrypt(record: &KeyRecord, ciphertext: &[u8], iv: Option<&[u8]>) -> Result<Vec<ResultItem>> {
    require_usage(record, KeyUsage::Decrypt, "decrypt")?;

    let plaintext = match record.algorithm {
        KeyAlgorithm::AesGcm { .. } => {
            let iv = required_iv(iv, "an initialization vector")?;
            let params = AesParams::Gcm(GcmParams { iv, aad: &[] });
            symmetric::decrypt(secret_bytes(record)?, &params, ciphertext)?
        }
        KeyAlgorithm::AesCbc { .. } => {
            let iv = required_iv(iv, "an initialization vector")?;
            let params = AesParams::Cbc(CbcParams { iv });
            symmetric::decrypt(secret_bytes(record)?, &params, ciphertext)?
        }
        KeyAlgorithm::AesCtr { .. } => {
            let counter = required_iv(iv, "a counter block")?;
            let params = AesParams::Ctr(CtrParams { counter });
            symmetric::decrypt(secret_bytes(record)?, &params, ciphertext)?
        }
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Oaep,
            hash,
        } => Rsa::from_pkcs8_der(pkcs8_der(record)?)?.decrypt_oaep(ciphertext, hash)?,
        ref other => return Err(not_implemented("decryption", other)),
    };

    Ok(vec![ResultItem::bytes(
        "Decrypted Data",
        plaintext,
        Encoding::Utf8,
    )])
}

/// Sign a message under a key record
///
/// For RSA-PSS the salt length is explicit: `None` means "digest-sized",
/// and the length used is reported as its own result item.
pub fn sign(
    record: &KeyRecord,
    message: &[u8],
    salt_length: Option<usize>,
) -> Result<Vec<ResultItem>> {
    require_usage(record, KeyUsage::Sign, "sign")?;

    match record.algorithm {
        KeyAlgorithm::Hmac { hash } => {
            let tag = mac::sign(secret_bytes(record)?, message, hash)?;
            Ok(vec![ResultItem::bytes("Signature", tag, Encoding::Base64)])
        }
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Pkcs1V15,
            hash,
        } => {
            let signature =
                Rsa::from_pkcs8_der(pkcs8_der(record)?)?.sign_pkcs1v15(message, hash)?;
            Ok(vec![ResultItem::bytes(
                "Signature",
                signature,
                Encoding::Base64,
            )])
        }
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Pss,
            hash,
        } => {
            let salt_len = salt_length.unwrap_or(hash.output_len());
            let signature =
                Rsa::from_pkcs8_der(pkcs8_der(record)?)?.sign_pss(message, hash, Some(salt_len))?;
            Ok(vec![
                ResultItem::bytes("Signature", signature, Encoding::Base64),
                ResultItem::text("Salt Length", salt_len.to_string()),
            ])
        }
        KeyAlgorithm::Ecdsa { .. } => {
            let signature = Ecdsa::from_pkcs8_der(pkcs8_der(record)?)?.sign(message)?;
            Ok(vec![ResultItem::bytes(
                "Signature",
                signature,
                Encoding::Base64,
            )])
        }
        ref other => Err(not_implemented("signing", other)),
    }
}

/// Verify a signature under a key record
pub fn verify(
    record: &KeyRecord,
    message: &[u8],
    signature: &[u8],
    salt_length: Option<usize>,
) -> Result<Vec<ResultItem>> {
    require_usage(record, KeyUsage::Verify, "verify")?;

    let valid = match record.algorithm {
        KeyAlgorithm::Hmac { hash } => {
            mac::verify(secret_bytes(record)?, message, signature, hash)?
        }
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Pkcs1V15,
            hash,
        } => rsa::verify_pkcs1v15(&rsa_public(record)?, message, signature, hash),
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Pss,
            hash,
        } => rsa::verify_pss(&rsa_public(record)?, message, signature, hash, salt_length)?,
        KeyAlgorithm::Ecdsa { curve } => {
            ecdsa::verify_with_spki_der(curve, &ec_spki(record)?, message, signature)?
        }
        ref other => return Err(not_implemented("verification", other)),
    };

    Ok(vec![ResultItem::text(
        "Verification Result",
        if valid {
            "Signature is valid"
        } else {
            "Signature is NOT valid"
        },
    )])
}

fn require_usage(record: &KeyRecord, usage: KeyUsage, name: &'static str) -> Result<()> {
    if record.usages.contains(&usage) {
        Ok(())
    } else {
        Err(Error::UsageNotPermitted {
            usage: name,
            name: record.name.clone(),
        })
    }
}

fn not_implemented(operation: &'static str, algorithm: &KeyAlgorithm) -> Error {
    Error::OperationNotImplemented {
        operation,
        algorithm: algorithm.to_string(),
    }
}

fn required_iv<'a>(iv: Option<&'a [u8]>, what: &str) -> Result<&'a [u8]> {
    iv.ok_or_else(|| Error::Other(format!("This operation requires {what}")))
}

fn secret_bytes(record: &KeyRecord) -> Result<&[u8]> {
    match &record.material {
        KeyMaterial::Secret { bytes } => Ok(bytes),
        _ => Err(Error::Other(format!(
            "Key \"{}\" does not hold symmetric key material",
            record.name
        ))),
    }
}

fn pkcs8_der(record: &KeyRecord) -> Result<&[u8]> {
    match &record.material {
        KeyMaterial::Private { pkcs8_der } | KeyMaterial::Pair { pkcs8_der, .. } => Ok(pkcs8_der),
        _ => Err(Error::Other(format!(
            "Key \"{}\" does not hold a private key",
            record.name
        ))),
    }
}

/// RSA public key, derived from the private half when only that is held
fn rsa_public(record: &KeyRecord) -> Result<rsa::RsaPublicKey> {
    match &record.material {
        KeyMaterial::Public { spki_der } | KeyMaterial::Pair { spki_der, .. } => {
            Ok(rsa::public_key_from_spki_der(spki_der)?)
        }
        KeyMaterial::Private { pkcs8_der } => Ok(Rsa::from_pkcs8_der(pkcs8_der)?.public_key()),
        KeyMaterial::Secret { .. } => Err(Error::Other(format!(
            "Key \"{}\" does not hold an RSA key",
            record.name
        ))),
    }
}

/// EC public key SPKI, derived from the private half when only that is held
fn ec_spki(record: &KeyRecord) -> Result<Vec<u8>> {
    match &record.material {
        KeyMaterial::Public { spki_der } | KeyMaterial::Pair { spki_der, .. } => {
            Ok(spki_der.clone())
        }
        KeyMaterial::Private { pkcs8_der } => Ecdsa::from_pkcs8_der(pkcs8_der)?
            .to_spki_der()
            .map_err(Error::Crypto),
        KeyMaterial::Secret { .. } => Err(Error::Other(format!(
            "Key \"{}\" does not hold an EC key",
            record.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use cryptools_crypto::{digest::HashAlgorithm, EcCurve};

    use super::*;
    use crate::{
        classify::{conventional_usages, KeyClass},
        material::{generate, KeyGenParams, KeyMaterial},
    };

    fn record(
        name: &str,
        algorithm: KeyAlgorithm,
        usages: Vec<KeyUsage>,
        material: KeyMaterial,
    ) -> KeyRecord {
        KeyRecord {
            name: name.to_string(),
            algorithm,
            usages,
            material,
            persisted: false,
        }
    }

    fn first_bytes(items: &[ResultItem], label: &str) -> Vec<u8> {
        match &items.iter().find(|i| i.label == label).unwrap().value {
            cryptools_codec::ResultValue::Bytes(bytes) => bytes.clone(),
            other => panic!("expected bytes for {label}, got {other:?}"),
        }
    }

    #[test]
    fn test_aes_gcm_roundtrip() {
        let algorithm = KeyAlgorithm::AesGcm { length: 256 };
        let material = generate(&KeyGenParams::AesGcm { length: 256 }).unwrap();
        let key = record(
            "data key",
            algorithm,
            vec![KeyUsage::Encrypt, KeyUsage::Decrypt],
            material,
        );

        let items = encrypt(&key, b"attack at dawn").unwrap();
        let ciphertext = first_bytes(&items, "Encrypted Data");
        let iv = first_bytes(&items, "Initialization Vector");
        assert_eq!(iv.len(), 12);

        let items = decrypt(&key, &ciphertext, Some(&iv)).unwrap();
        assert_eq!(first_bytes(&items, "Decrypted Data"), b"attack at dawn");
    }

    #[test]
    fn test_aes_ctr_returns_counter_block() {
        let material = generate(&KeyGenParams::AesCtr { length: 128 }).unwrap();
        let key = record(
            "ctr key",
            KeyAlgorithm::AesCtr { length: 128 },
            vec![KeyUsage::Encrypt, KeyUsage::Decrypt],
            material,
        );

        let items = encrypt(&key, b"stream me").unwrap();
        let counter = first_bytes(&items, "Counter Block");
        assert_eq!(counter.len(), 16);

        let ciphertext = first_bytes(&items, "Encrypted Data");
        let items = decrypt(&key, &ciphertext, Some(&counter)).unwrap();
        assert_eq!(first_bytes(&items, "Decrypted Data"), b"stream me");
    }

    #[test]
    fn test_decrypt_requires_iv() {
        let material = generate(&KeyGenParams::AesGcm { length: 128 }).unwrap();
        let key = record(
            "data key",
            KeyAlgorithm::AesGcm { length: 128 },
            vec![KeyUsage::Encrypt, KeyUsage::Decrypt],
            material,
        );
        assert!(decrypt(&key, b"junk", None).is_err());
    }

    #[test]
    fn test_hmac_sign_verify() {
        let algorithm = KeyAlgorithm::Hmac {
            hash: HashAlgorithm::Sha256,
        };
        let material = generate(&KeyGenParams::Hmac {
            hash: HashAlgorithm::Sha256,
        })
        .unwrap();
        let key = record(
            "mac key",
            algorithm,
            vec![KeyUsage::Sign, KeyUsage::Verify],
            material,
        );

        let items = sign(&key, b"message", None).unwrap();
        let tag = first_bytes(&items, "Signature");

        let items = verify(&key, b"message", &tag, None).unwrap();
        assert_eq!(items[0].render().unwrap(), "Signature is valid");

        let items = verify(&key, b"tampered", &tag, None).unwrap();
        assert_eq!(items[0].render().unwrap(), "Signature is NOT valid");
    }

    #[test]
    fn test_ecdsa_sign_with_pair_verify_with_public() {
        let algorithm = KeyAlgorithm::Ecdsa {
            curve: EcCurve::P256,
        };
        let material = generate(&KeyGenParams::Ecdsa {
            curve: EcCurve::P256,
        })
        .unwrap();
        let spki_der = match &material {
            KeyMaterial::Pair { spki_der, .. } => spki_der.clone(),
            other => panic!("expected a pair, got {other:?}"),
        };

        let signer = record(
            "signing key",
            algorithm,
            vec![KeyUsage::Sign, KeyUsage::Verify],
            material,
        );
        let items = sign(&signer, b"message", None).unwrap();
        let signature = first_bytes(&items, "Signature");

        let verifier = record(
            "verifying key",
            algorithm,
            conventional_usages(&algorithm, KeyClass::Public),
            KeyMaterial::Public { spki_der },
        );
        let items = verify(&verifier, b"message", &signature, None).unwrap();
        assert_eq!(items[0].render().unwrap(), "Signature is valid");
    }

    #[test]
    fn test_pss_reports_salt_length() {
        let algorithm = KeyAlgorithm::Rsa {
            variant: RsaVariant::Pss,
            hash: HashAlgorithm::Sha256,
        };
        let material = generate(&KeyGenParams::Rsa {
            variant: RsaVariant::Pss,
            hash: HashAlgorithm::Sha256,
            modulus_length: 2048,
            public_exponent: 65537,
        })
        .unwrap();
        let key = record(
            "pss key",
            algorithm,
            vec![KeyUsage::Sign, KeyUsage::Verify],
            material,
        );

        let items = sign(&key, b"message", Some(16)).unwrap();
        let salt_item = items.iter().find(|i| i.label == "Salt Length").unwrap();
        assert_eq!(salt_item.render().unwrap(), "16");

        let signature = first_bytes(&items, "Signature");
        let items = verify(&key, b"message", &signature, Some(16)).unwrap();
        assert_eq!(items[0].render().unwrap(), "Signature is valid");
    }

    #[test]
    fn test_usage_enforced() {
        let material = generate(&KeyGenParams::AesGcm { length: 256 }).unwrap();
        let key = record(
            "encrypt only",
            KeyAlgorithm::AesGcm { length: 256 },
            vec![KeyUsage::Encrypt],
            material,
        );
        assert!(matches!(
            decrypt(&key, b"junk", Some(&[0u8; 12])),
            Err(Error::UsageNotPermitted { .. })
        ));
    }

    #[test]
    fn test_unsupported_combination() {
        let material = generate(&KeyGenParams::AesGcm { length: 256 }).unwrap();
        let key = record(
            "data key",
            KeyAlgorithm::AesGcm { length: 256 },
            vec![KeyUsage::Encrypt, KeyUsage::Decrypt, KeyUsage::Sign],
            material,
        );
        assert!(matches!(
            sign(&key, b"message", None),
            Err(Error::OperationNotImplemented { .. })
        ));
    }
}
