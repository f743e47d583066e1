//! Key-material classification
//!
//! Given pasted or uploaded text purporting to be a cryptographic key,
//! determine its wire format (JWK, PEM, DER, or raw bytes) and produce the
//! fully-specified parameters needed for import. The classifier is a pure
//! function of its input plus the explicit caller hints; it either returns
//! complete [`ImportParams`] or fails with a descriptive error, never a
//! partial state.

use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use cryptools_codec::{decode, encode, guess_encoding, Encoding};
use cryptools_crypto::{digest::HashAlgorithm, EcCurve};
use pkcs8::PrivateKeyInfo;
use spki::SubjectPublicKeyInfoRef;

use crate::{
    algorithm::{KeyAlgorithm, KeyUsage, RsaVariant},
    error::{Error, Result},
    jwk::Jwk,
};

/// Wire format of imported key material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    Jwk,
    Pkcs8,
    Spki,
    Raw,
}

/// Public/private/secret disposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Secret,
    Private,
    Public,
}

impl std::fmt::Display for KeyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Secret => "Secret",
            Self::Private => "Private",
            Self::Public => "Public",
        })
    }
}

/// The key bytes in their classified form
#[derive(Debug, Clone)]
pub enum KeyData {
    Jwk(Jwk),
    Der(Vec<u8>),
    Raw(Vec<u8>),
}

/// Everything needed to hand off to key import
#[derive(Debug, Clone)]
pub struct ImportParams {
    pub format: KeyFormat,
    pub key_data: KeyData,
    pub algorithm: KeyAlgorithm,
    pub usages: Vec<KeyUsage>,
    pub class: KeyClass,
}

/// RSA scheme disambiguation for DER keys
///
/// The `rsaEncryption` OID does not say which scheme a key is for, so the
/// caller must choose.
#[derive(Debug, Clone, Copy)]
pub struct RsaHint {
    pub variant: RsaVariant,
    pub hash: HashAlgorithm,
}

/// Caller-supplied disambiguation the input alone cannot provide
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportHints {
    /// Algorithm for raw key bytes (cannot be inferred from the bytes)
    pub raw_algorithm: Option<KeyAlgorithm>,
    /// RSA scheme selection for DER-encoded RSA keys
    pub rsa: Option<RsaHint>,
}

/// Classify pasted or uploaded key material
pub fn classify(input: &str, hints: &ImportHints) -> Result<ImportParams> {
    if input.is_empty() {
        return Err(Error::InvalidKeyFormat("A key must be provided".into()));
    }
    let value = normalize(input);

    if let Some(der) = pem_body(&value)? {
        return classify_der(der, hints);
    }

    match guess_encoding(&value) {
        Some(Encoding::Json) => classify_jwk(&value),
        Some(encoding) => {
            let bytes = decode(&value, encoding).map_err(|_| {
                Error::InvalidKeyFormat("Pasted content does not look like key material".into())
            })?;
            classify_der(bytes, hints)
        }
        None => Err(Error::InvalidKeyFormat(
            "Pasted content does not look like key material".into(),
        )),
    }
}

/// Reinterpret the input as UTF-8 after best-guess decoding, so JSON or PEM
/// pasted in some binary-to-text encoding (e.g. hex) is recovered as
/// plaintext. Falls back to the original on any failure.
fn normalize(input: &str) -> String {
    let Some(encoding) = guess_encoding(input) else {
        return input.to_string();
    };
    let Ok(bytes) = decode(input, encoding) else {
        return input.to_string();
    };
    let Ok(text) = encode(&bytes, Encoding::Utf8) else {
        return input.to_string();
    };
    if guess_encoding(&text).is_some() || looks_like_pem(&text) {
        text
    } else {
        input.to_string()
    }
}

fn looks_like_pem(text: &str) -> bool {
    text.trim_start().starts_with("-----BEGIN ")
}

/// Extract the DER body of a PEM envelope, or `None` if the input is not PEM
fn pem_body(value: &str) -> Result<Option<Vec<u8>>> {
    if !looks_like_pem(value) {
        return Ok(None);
    }
    let parsed = pem::parse(value)
        .map_err(|e| Error::InvalidKeyFormat(format!("Invalid PEM encoding: {e}")))?;
    Ok(Some(parsed.into_contents()))
}

fn classify_jwk(value: &str) -> Result<ImportParams> {
    let jwk = Jwk::from_json(value)?;
    let algorithm = jwk.algorithm()?;

    let class = match jwk.kty.as_deref() {
        Some("oct") => KeyClass::Secret,
        _ if jwk.d.is_some() => KeyClass::Private,
        _ => KeyClass::Public,
    };

    // key_ops wins when present; otherwise fall back to convention
    let usages = match &jwk.key_ops {
        Some(ops) => {
            let parsed: Vec<KeyUsage> = ops.iter().filter_map(|op| KeyUsage::parse(op)).collect();
            if parsed.is_empty() {
                conventional_usages(&algorithm, class)
            } else {
                parsed
            }
        }
        None => conventional_usages(&algorithm, class),
    };

    Ok(ImportParams {
        format: KeyFormat::Jwk,
        key_data: KeyData::Jwk(jwk),
        algorithm,
        usages,
        class,
    })
}

fn classify_der(der: Vec<u8>, hints: &ImportHints) -> Result<ImportParams> {
    // Public first, then private, matching the SPKI/PKCS#8 schema order
    if let Ok(spki) = SubjectPublicKeyInfoRef::try_from(der.as_slice()) {
        let algorithm =
            algorithm_from_oids(spki.algorithm.oid, spki.algorithm.parameters_oid().ok(), hints)?;
        return Ok(ImportParams {
            format: KeyFormat::Spki,
            usages: conventional_usages(&algorithm, KeyClass::Public),
            key_data: KeyData::Der(der),
            algorithm,
            class: KeyClass::Public,
        });
    }

    if let Ok(pkcs8) = PrivateKeyInfo::try_from(der.as_slice()) {
        let algorithm = algorithm_from_oids(
            pkcs8.algorithm.oid,
            pkcs8.algorithm.parameters_oid().ok(),
            hints,
        )?;
        return Ok(ImportParams {
            format: KeyFormat::Pkcs8,
            usages: conventional_usages(&algorithm, KeyClass::Private),
            key_data: KeyData::Der(der),
            algorithm,
            class: KeyClass::Private,
        });
    }

    classify_raw(der, hints)
}

/// Bytes that match neither schema are treated as raw key material; the
/// algorithm cannot be inferred and must come from the caller
fn classify_raw(bytes: Vec<u8>, hints: &ImportHints) -> Result<ImportParams> {
    tracing::warn!(
        len = bytes.len(),
        "input does not look like a PEM-, DER-, or JSON-encoded key; assuming raw"
    );

    let algorithm = hints.raw_algorithm.ok_or_else(|| {
        Error::InvalidKeyFormat(
            "Raw key material requires an explicitly selected algorithm".into(),
        )
    })?;

    let (class, usages) = match algorithm {
        // Only ECDSA public points can travel as raw key material
        KeyAlgorithm::Ecdsa { .. } => (KeyClass::Public, vec![KeyUsage::Verify]),
        KeyAlgorithm::Hmac { .. } => (KeyClass::Secret, vec![KeyUsage::Sign, KeyUsage::Verify]),
        KeyAlgorithm::AesCbc { .. } | KeyAlgorithm::AesCtr { .. } | KeyAlgorithm::AesGcm { .. } => {
            (KeyClass::Secret, vec![KeyUsage::Encrypt, KeyUsage::Decrypt])
        }
        KeyAlgorithm::Rsa { .. } => {
            return Err(Error::UnsupportedKeyAlgorithm(
                "RSA keys cannot be imported from raw bytes".into(),
            ))
        }
    };

    Ok(ImportParams {
        format: KeyFormat::Raw,
        key_data: KeyData::Raw(bytes),
        algorithm,
        usages,
        class,
    })
}

fn algorithm_from_oids(
    oid: const_oid::ObjectIdentifier,
    parameters: Option<const_oid::ObjectIdentifier>,
    hints: &ImportHints,
) -> Result<KeyAlgorithm> {
    if oid == ID_EC_PUBLIC_KEY {
        let curve_oid = parameters.ok_or_else(|| {
            Error::InvalidKeyFormat("EC key is missing its curve parameters".into())
        })?;
        let curve = if curve_oid == SECP_256_R_1 {
            EcCurve::P256
        } else if curve_oid == SECP_384_R_1 {
            EcCurve::P384
        } else if curve_oid == SECP_521_R_1 {
            EcCurve::P521
        } else {
            return Err(Error::UnsupportedKeyAlgorithm(format!(
                "Unsupported named curve {curve_oid}"
            )));
        };
        return Ok(KeyAlgorithm::Ecdsa { curve });
    }

    if oid == RSA_ENCRYPTION {
        // The OID is ambiguous among the RSA schemes
        let hint = hints.rsa.ok_or_else(|| {
            Error::UnsupportedKeyAlgorithm(
                "RSA keys require an explicitly selected scheme and hash".into(),
            )
        })?;
        return Ok(KeyAlgorithm::Rsa {
            variant: hint.variant,
            hash: hint.hash,
        });
    }

    Err(Error::UnknownAlgorithmId(oid.to_string()))
}

/// Usage conventions when the input does not state them: encryption-capable
/// keys encrypt/decrypt, signature keys sign/verify, split by disposition
/// for asymmetric keys
pub fn conventional_usages(algorithm: &KeyAlgorithm, class: KeyClass) -> Vec<KeyUsage> {
    match algorithm {
        KeyAlgorithm::AesCbc { .. } | KeyAlgorithm::AesCtr { .. } | KeyAlgorithm::AesGcm { .. } => {
            vec![KeyUsage::Encrypt, KeyUsage::Decrypt]
        }
        KeyAlgorithm::Hmac { .. } => vec![KeyUsage::Sign, KeyUsage::Verify],
        KeyAlgorithm::Rsa {
            variant: RsaVariant::Oaep,
            ..
        } => match class {
            KeyClass::Private => vec![KeyUsage::Decrypt],
            _ => vec![KeyUsage::Encrypt],
        },
        KeyAlgorithm::Rsa { .. } | KeyAlgorithm::Ecdsa { .. } => match class {
            KeyClass::Private => vec![KeyUsage::Sign],
            _ => vec![KeyUsage::Verify],
        },
    }
}

#[cfg(test)]
mod tests {
    use cryptools_crypto::Ecdsa;

    use super::*;

    #[test]
    fn test_jwk_oct_with_key_ops() {
        let input = r#"{"kty":"oct","alg":"A256GCM","k":"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA","key_ops":["encrypt","decrypt"]}"#;
        let params = classify(input, &ImportHints::default()).unwrap();
        assert_eq!(params.format, KeyFormat::Jwk);
        assert_eq!(params.class, KeyClass::Secret);
        assert_eq!(params.algorithm, KeyAlgorithm::AesGcm { length: 256 });
        assert_eq!(params.usages, vec![KeyUsage::Encrypt, KeyUsage::Decrypt]);
    }

    #[test]
    fn test_jwk_without_kty_rejected() {
        let result = classify(r#"{"alg":"A256GCM"}"#, &ImportHints::default());
        assert!(matches!(result, Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_spki_ec_key() {
        let key = Ecdsa::generate(cryptools_crypto::EcCurve::P256);
        let spki = key.to_spki_der().unwrap();
        let text = encode(&spki, Encoding::Base64).unwrap();

        let params = classify(&text, &ImportHints::default()).unwrap();
        assert_eq!(params.format, KeyFormat::Spki);
        assert_eq!(params.class, KeyClass::Public);
        assert_eq!(
            params.algorithm,
            KeyAlgorithm::Ecdsa {
                curve: EcCurve::P256
            }
        );
        assert_eq!(params.usages, vec![KeyUsage::Verify]);
    }

    #[test]
    fn test_pkcs8_ec_key_via_pem() {
        let key = Ecdsa::generate(cryptools_crypto::EcCurve::P384);
        let der = key.to_pkcs8_der().unwrap();
        let pem_text = pem::encode(&pem::Pem::new("PRIVATE KEY", der.clone()));

        let params = classify(&pem_text, &ImportHints::default()).unwrap();
        assert_eq!(params.format, KeyFormat::Pkcs8);
        assert_eq!(params.class, KeyClass::Private);
        assert_eq!(params.usages, vec![KeyUsage::Sign]);
        match params.key_data {
            KeyData::Der(bytes) => assert_eq!(bytes, der),
            other => panic!("expected DER key data, got {other:?}"),
        }
    }

    #[test]
    fn test_normalization_recovers_hex_encoded_json() {
        let jwk = r#"{"kty":"oct","alg":"HS256","k":"c2VjcmV0"}"#;
        let hexed = hex::encode(jwk.as_bytes());

        let params = classify(&hexed, &ImportHints::default()).unwrap();
        assert_eq!(params.format, KeyFormat::Jwk);
        assert_eq!(
            params.algorithm,
            KeyAlgorithm::Hmac {
                hash: HashAlgorithm::Sha256
            }
        );
    }

    #[test]
    fn test_raw_requires_hint() {
        // 32 random-looking bytes in Base64, not valid DER
        let text = encode(&[0xA5u8; 32], Encoding::Base64).unwrap();
        assert!(classify(&text, &ImportHints::default()).is_err());

        let hints = ImportHints {
            raw_algorithm: Some(KeyAlgorithm::AesGcm { length: 256 }),
            rsa: None,
        };
        let params = classify(&text, &hints).unwrap();
        assert_eq!(params.format, KeyFormat::Raw);
        assert_eq!(params.class, KeyClass::Secret);
        assert_eq!(params.usages, vec![KeyUsage::Encrypt, KeyUsage::Decrypt]);
    }

    #[test]
    fn test_rsa_der_requires_scheme_hint() {
        let key = cryptools_crypto::Rsa::generate(2048, 65537).unwrap();
        let spki = key.to_spki_der().unwrap();
        let text = encode(&spki, Encoding::Base64).unwrap();

        let result = classify(&text, &ImportHints::default());
        assert!(matches!(result, Err(Error::UnsupportedKeyAlgorithm(_))));

        let hints = ImportHints {
            raw_algorithm: None,
            rsa: Some(RsaHint {
                variant: RsaVariant::Oaep,
                hash: HashAlgorithm::Sha256,
            }),
        };
        let params = classify(&text, &hints).unwrap();
        assert_eq!(params.format, KeyFormat::Spki);
        assert_eq!(params.usages, vec![KeyUsage::Encrypt]);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(classify("", &ImportHints::default()).is_err());
    }
}
