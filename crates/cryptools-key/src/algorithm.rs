//! Algorithm tags for key material
//!
//! Every key carries one fully-specified [`KeyAlgorithm`]. There is no
//! untyped parameter object; each variant holds exactly the fields its
//! family needs.

use cryptools_crypto::{digest::HashAlgorithm, EcCurve};
use serde::{Deserialize, Serialize};

/// The RSA schemes sharing the `rsaEncryption` OID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsaVariant {
    Oaep,
    Pkcs1V15,
    Pss,
}

impl RsaVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Oaep => "RSA-OAEP",
            Self::Pkcs1V15 => "RSASSA-PKCS1-v1_5",
            Self::Pss => "RSA-PSS",
        }
    }
}

/// A fully-specified key algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// AES-CBC with the key length in bits
    AesCbc { length: u32 },
    /// AES-CTR with the key length in bits
    AesCtr { length: u32 },
    /// AES-GCM with the key length in bits
    AesGcm { length: u32 },
    /// HMAC over the given hash
    Hmac { hash: HashAlgorithm },
    /// One of the RSA schemes with its digest
    Rsa {
        variant: RsaVariant,
        hash: HashAlgorithm,
    },
    /// ECDSA on a NIST curve
    Ecdsa { curve: EcCurve },
}

impl KeyAlgorithm {
    /// Canonical algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AesCbc { .. } => "AES-CBC",
            Self::AesCtr { .. } => "AES-CTR",
            Self::AesGcm { .. } => "AES-GCM",
            Self::Hmac { .. } => "HMAC",
            Self::Rsa { variant, .. } => variant.name(),
            Self::Ecdsa { .. } => "ECDSA",
        }
    }

    /// Whether keys of this algorithm are symmetric secrets
    pub fn is_symmetric(&self) -> bool {
        matches!(
            self,
            Self::AesCbc { .. } | Self::AesCtr { .. } | Self::AesGcm { .. } | Self::Hmac { .. }
        )
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AesCbc { length } | Self::AesCtr { length } | Self::AesGcm { length } => {
                write!(f, "{}-{length}", self.name())
            }
            Self::Hmac { hash } => write!(f, "HMAC-{}", hash.name()),
            Self::Rsa { variant, hash } => write!(f, "{} with {}", variant.name(), hash.name()),
            Self::Ecdsa { curve } => write!(f, "ECDSA on {}", curve.name()),
        }
    }
}

/// What a key may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUsage {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
}

impl KeyUsage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Sign => "sign",
            Self::Verify => "verify",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "encrypt" => Some(Self::Encrypt),
            "decrypt" => Some(Self::Decrypt),
            "sign" => Some(Self::Sign),
            "verify" => Some(Self::Verify),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let alg = KeyAlgorithm::AesGcm { length: 256 };
        assert_eq!(alg.to_string(), "AES-GCM-256");
        assert_eq!(alg.name(), "AES-GCM");
        assert!(alg.is_symmetric());

        let alg = KeyAlgorithm::Rsa {
            variant: RsaVariant::Pss,
            hash: HashAlgorithm::Sha256,
        };
        assert_eq!(alg.to_string(), "RSA-PSS with SHA-256");
        assert!(!alg.is_symmetric());
    }

    #[test]
    fn test_usage_parse() {
        assert_eq!(KeyUsage::parse("sign"), Some(KeyUsage::Sign));
        assert_eq!(KeyUsage::parse("wrap"), None);
    }
}
