//! JSON Web Key model (RFC 7517/7518)
//!
//! Only the members this toolkit reads and writes are modeled. Binary
//! members use base64url without padding.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cryptools_crypto::{digest::HashAlgorithm, EcCurve};
use serde::{Deserialize, Serialize};

use crate::{
    algorithm::{KeyAlgorithm, RsaVariant},
    error::{Error, Result},
};

/// A JSON Web Key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Jwk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,

    // EC coordinates and scalar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,

    // RSA components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    // Symmetric key value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_ops: Option<Vec<String>>,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<bool>,
}

impl Jwk {
    /// Parse a JWK from JSON text; `kty` is required by RFC 7517
    pub fn from_json(text: &str) -> Result<Self> {
        let jwk: Jwk = serde_json::from_str(text)
            .map_err(|_| Error::InvalidKeyFormat("JSON object is not a valid JSON Web Key".into()))?;
        if jwk.kty.is_none() {
            return Err(Error::InvalidKeyFormat(
                "JSON object is not a valid JSON Web Key".into(),
            ));
        }
        Ok(jwk)
    }

    /// Derive the concrete algorithm from the `alg`/`kty` members
    ///
    /// Implements the fixed mapping: `A{n}CBC`/`A{n}CTR`/`A{n}GCM` for AES,
    /// `HS{n}` for HMAC, `RSA-OAEP[-{n}]`/`RS{n}`/`PS{n}` for the RSA
    /// schemes (hash defaults to SHA-1 when no bits are given), and
    /// `kty=EC` with the curve taken from `crv`.
    pub fn algorithm(&self) -> Result<KeyAlgorithm> {
        let kty = self.kty.as_deref().unwrap_or("");
        let alg = self.alg.as_deref();

        if let Some(alg) = alg {
            if let Some(length) = parse_aes_alg(alg, "CBC") {
                return Ok(KeyAlgorithm::AesCbc {
                    length: check_aes_length(alg, length)?,
                });
            }
            if let Some(length) = parse_aes_alg(alg, "CTR") {
                return Ok(KeyAlgorithm::AesCtr {
                    length: check_aes_length(alg, length)?,
                });
            }
            if let Some(length) = parse_aes_alg(alg, "GCM") {
                return Ok(KeyAlgorithm::AesGcm {
                    length: check_aes_length(alg, length)?,
                });
            }
            if let Some(bits) = alg.strip_prefix("HS") {
                let hash = hash_from_bits(Some(bits))
                    .ok_or_else(|| unsupported(kty, Some(alg)))?;
                return Ok(KeyAlgorithm::Hmac { hash });
            }
        }

        if kty == "RSA" {
            let alg = alg.ok_or_else(|| unsupported(kty, None))?;
            let (name, bits) = split_rsa_alg(alg);
            let variant = match name {
                "RSA-OAEP" => RsaVariant::Oaep,
                "RS" => RsaVariant::Pkcs1V15,
                "PS" => RsaVariant::Pss,
                _ => {
                    return Err(Error::UnsupportedKeyAlgorithm(format!(
                        "RSA algorithm \"{alg}\" is not supported"
                    )))
                }
            };
            let hash = hash_from_bits(bits).ok_or_else(|| {
                Error::UnsupportedKeyAlgorithm(format!("RSA algorithm \"{alg}\" is not supported"))
            })?;
            return Ok(KeyAlgorithm::Rsa { variant, hash });
        }

        if kty == "EC" {
            let crv = self.crv.as_deref().unwrap_or("");
            let curve = match crv {
                "P-256" => EcCurve::P256,
                "P-384" => EcCurve::P384,
                "P-521" => EcCurve::P521,
                _ => {
                    return Err(Error::UnsupportedKeyAlgorithm(format!(
                        "Unsupported named curve {crv}"
                    )))
                }
            };
            return Ok(KeyAlgorithm::Ecdsa { curve });
        }

        Err(unsupported(kty, alg))
    }

    /// Whether the key carries private material
    pub fn is_private(&self) -> bool {
        self.d.is_some() || self.k.is_some()
    }
}

fn unsupported(kty: &str, alg: Option<&str>) -> Error {
    match alg {
        Some(alg) => Error::UnsupportedKeyAlgorithm(format!(
            "Unsupported key type \"{kty}\" with algorithm \"{alg}\""
        )),
        None => Error::UnsupportedKeyAlgorithm(format!("Unsupported key type \"{kty}\"")),
    }
}

/// `A{n}<mode>` → n
fn parse_aes_alg(alg: &str, mode: &str) -> Option<u32> {
    let digits = alg.strip_prefix('A')?.strip_suffix(mode)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn check_aes_length(alg: &str, length: u32) -> Result<u32> {
    if matches!(length, 128 | 192 | 256) {
        Ok(length)
    } else {
        Err(Error::UnsupportedKeyAlgorithm(format!(
            "AES algorithm \"{alg}\" has an invalid key length"
        )))
    }
}

/// `RSA-OAEP[-{n}]` / `RS{n}` / `PS{n}` → (scheme, hash bits)
fn split_rsa_alg(alg: &str) -> (&str, Option<&str>) {
    let digits_start = alg
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);
    match digits_start {
        Some(i) if i > 0 => {
            let (mut name, bits) = alg.split_at(i);
            name = name.strip_suffix('-').unwrap_or(name);
            (name, Some(bits))
        }
        _ => (alg, None),
    }
}

/// Hash bits to algorithm; absent or "1" means SHA-1
fn hash_from_bits(bits: Option<&str>) -> Option<HashAlgorithm> {
    match bits {
        None | Some("1") => Some(HashAlgorithm::Sha1),
        Some("256") => Some(HashAlgorithm::Sha256),
        Some("384") => Some(HashAlgorithm::Sha384),
        Some("512") => Some(HashAlgorithm::Sha512),
        _ => None,
    }
}

/// Decode a base64url JWK member
pub(crate) fn decode_b64url(name: &str, value: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|_| Error::InvalidKeyFormat(format!("JWK member \"{name}\" is not base64url")))
}

/// Encode bytes as a base64url JWK member
pub(crate) fn encode_b64url(value: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_alg_table() {
        let jwk = Jwk {
            kty: Some("oct".into()),
            alg: Some("A256GCM".into()),
            ..Default::default()
        };
        assert_eq!(
            jwk.algorithm().unwrap(),
            KeyAlgorithm::AesGcm { length: 256 }
        );

        let jwk = Jwk {
            kty: Some("oct".into()),
            alg: Some("A128CBC".into()),
            ..Default::default()
        };
        assert_eq!(
            jwk.algorithm().unwrap(),
            KeyAlgorithm::AesCbc { length: 128 }
        );
    }

    #[test]
    fn test_hmac_alg_table() {
        for (alg, hash) in [
            ("HS1", HashAlgorithm::Sha1),
            ("HS256", HashAlgorithm::Sha256),
            ("HS384", HashAlgorithm::Sha384),
            ("HS512", HashAlgorithm::Sha512),
        ] {
            let jwk = Jwk {
                kty: Some("oct".into()),
                alg: Some(alg.into()),
                ..Default::default()
            };
            assert_eq!(jwk.algorithm().unwrap(), KeyAlgorithm::Hmac { hash });
        }
    }

    #[test]
    fn test_rsa_alg_table() {
        let cases = [
            ("RSA-OAEP", RsaVariant::Oaep, HashAlgorithm::Sha1),
            ("RSA-OAEP-256", RsaVariant::Oaep, HashAlgorithm::Sha256),
            ("RS256", RsaVariant::Pkcs1V15, HashAlgorithm::Sha256),
            ("RS1", RsaVariant::Pkcs1V15, HashAlgorithm::Sha1),
            ("PS384", RsaVariant::Pss, HashAlgorithm::Sha384),
        ];
        for (alg, variant, hash) in cases {
            let jwk = Jwk {
                kty: Some("RSA".into()),
                alg: Some(alg.into()),
                ..Default::default()
            };
            assert_eq!(jwk.algorithm().unwrap(), KeyAlgorithm::Rsa { variant, hash });
        }
    }

    #[test]
    fn test_ec_curve_from_crv() {
        let jwk = Jwk {
            kty: Some("EC".into()),
            crv: Some("P-384".into()),
            ..Default::default()
        };
        assert_eq!(
            jwk.algorithm().unwrap(),
            KeyAlgorithm::Ecdsa {
                curve: EcCurve::P384
            }
        );
    }

    #[test]
    fn test_unrecognized_combinations() {
        let jwk = Jwk {
            kty: Some("RSA".into()),
            alg: Some("RS224".into()),
            ..Default::default()
        };
        assert!(matches!(
            jwk.algorithm(),
            Err(Error::UnsupportedKeyAlgorithm(_))
        ));

        let jwk = Jwk {
            kty: Some("EC".into()),
            crv: Some("secp256k1".into()),
            ..Default::default()
        };
        assert!(matches!(
            jwk.algorithm(),
            Err(Error::UnsupportedKeyAlgorithm(_))
        ));

        let jwk = Jwk {
            kty: Some("OKP".into()),
            ..Default::default()
        };
        assert!(matches!(
            jwk.algorithm(),
            Err(Error::UnsupportedKeyAlgorithm(_))
        ));
    }

    #[test]
    fn test_kty_required() {
        assert!(Jwk::from_json(r#"{"alg":"A256GCM"}"#).is_err());
        assert!(Jwk::from_json(r#"{"kty":"oct","k":"AAAA"}"#).is_ok());
    }
}
