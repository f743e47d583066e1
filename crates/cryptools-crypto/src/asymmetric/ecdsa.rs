//! ECDSA over the NIST curves P-256, P-384 and P-521
//!
//! Signatures use SHA-256/384/512 respectively (the digest matched to the
//! curve's security level) and are serialized as ASN.1 DER.

use p256::{
    ecdsa::signature::{Signer, Verifier},
    elliptic_curve::rand_core::OsRng,
};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported NIST curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

impl EcCurve {
    /// Canonical curve name
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Field element size in bytes
    pub fn field_len(&self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }
}

/// An ECDSA private key on one of the supported curves
pub enum Ecdsa {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl Ecdsa {
    /// Generate a new key pair on the given curve
    pub fn generate(curve: EcCurve) -> Self {
        match curve {
            EcCurve::P256 => Self::P256(p256::SecretKey::random(&mut OsRng)),
            EcCurve::P384 => Self::P384(p384::SecretKey::random(&mut OsRng)),
            EcCurve::P521 => Self::P521(p521::SecretKey::random(&mut OsRng)),
        }
    }

    /// Import from PKCS8 DER format; the curve is taken from the key's
    /// algorithm parameters
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        if let Ok(key) = p256::SecretKey::from_pkcs8_der(der) {
            return Ok(Self::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_pkcs8_der(der) {
            return Ok(Self::P384(key));
        }
        if let Ok(key) = p521::SecretKey::from_pkcs8_der(der) {
            return Ok(Self::P521(key));
        }
        Err(Error::Other(
            "Invalid EC PKCS8 key or unsupported curve".to_string(),
        ))
    }

    pub fn curve(&self) -> EcCurve {
        match self {
            Self::P256(_) => EcCurve::P256,
            Self::P384(_) => EcCurve::P384,
            Self::P521(_) => EcCurve::P521,
        }
    }

    /// Export private key to PKCS8 DER format
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let der = match self {
            Self::P256(key) => key.to_pkcs8_der(),
            Self::P384(key) => key.to_pkcs8_der(),
            Self::P521(key) => key.to_pkcs8_der(),
        }
        .map_err(|e| Error::Other(format!("PKCS8 encoding failed: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI DER format
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let der = match self {
            Self::P256(key) => key.public_key().to_public_key_der(),
            Self::P384(key) => key.public_key().to_public_key_der(),
            Self::P521(key) => key.public_key().to_public_key_der(),
        }
        .map_err(|e| Error::Other(format!("SPKI encoding failed: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }

    /// Sign a message, returning a DER-encoded signature
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let der = match self {
            Self::P256(key) => {
                let signature: p256::ecdsa::Signature =
                    p256::ecdsa::SigningKey::from(key).sign(message);
                signature.to_der().as_bytes().to_vec()
            }
            Self::P384(key) => {
                let signature: p384::ecdsa::Signature =
                    p384::ecdsa::SigningKey::from(key).sign(message);
                signature.to_der().as_bytes().to_vec()
            }
            Self::P521(key) => {
                // p521 lacks the From<&SecretKey> conversion the other
                // curves provide; go through the scalar bytes
                let signing = p521::ecdsa::SigningKey::from_bytes(&key.to_bytes())?;
                let signature: p521::ecdsa::Signature = signing.sign(message);
                signature.to_der().as_bytes().to_vec()
            }
        };
        Ok(der)
    }
}

/// Verify a DER-encoded ECDSA signature against an SPKI DER public key
pub fn verify_with_spki_der(
    curve: EcCurve,
    spki_der: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    match curve {
        EcCurve::P256 => {
            let key = p256::ecdsa::VerifyingKey::from_public_key_der(spki_der)
                .map_err(|e| Error::Other(format!("Invalid P-256 SPKI key: {e}")))?;
            let sig = p256::ecdsa::Signature::from_der(signature)?;
            Ok(key.verify(message, &sig).is_ok())
        }
        EcCurve::P384 => {
            let key = p384::ecdsa::VerifyingKey::from_public_key_der(spki_der)
                .map_err(|e| Error::Other(format!("Invalid P-384 SPKI key: {e}")))?;
            let sig = p384::ecdsa::Signature::from_der(signature)?;
            Ok(key.verify(message, &sig).is_ok())
        }
        EcCurve::P521 => {
            // p521's VerifyingKey cannot decode SPKI directly; parse the
            // envelope as a PublicKey and hand over the SEC1 point
            let public = p521::PublicKey::from_public_key_der(spki_der)
                .map_err(|e| Error::Other(format!("Invalid P-521 SPKI key: {e}")))?;
            let key = p521::ecdsa::VerifyingKey::from_sec1_bytes(&public.to_sec1_bytes())?;
            let sig = p521::ecdsa::Signature::from_der(signature)?;
            Ok(key.verify(message, &sig).is_ok())
        }
    }
}

/// Re-encode a raw SEC1 public point as SPKI DER
///
/// Accepts compressed or uncompressed points.
pub fn spki_from_sec1(curve: EcCurve, point: &[u8]) -> Result<Vec<u8>> {
    let der = match curve {
        EcCurve::P256 => p256::PublicKey::from_sec1_bytes(point)
            .map_err(|e| Error::Other(format!("Invalid P-256 point: {e}")))?
            .to_public_key_der(),
        EcCurve::P384 => p384::PublicKey::from_sec1_bytes(point)
            .map_err(|e| Error::Other(format!("Invalid P-384 point: {e}")))?
            .to_public_key_der(),
        EcCurve::P521 => p521::PublicKey::from_sec1_bytes(point)
            .map_err(|e| Error::Other(format!("Invalid P-521 point: {e}")))?
            .to_public_key_der(),
    }
    .map_err(|e| Error::Other(format!("SPKI encoding failed: {e}")))?;
    Ok(der.as_bytes().to_vec())
}
