//! RSA key generation, encryption and signatures
//!
//! Covers the three RSA schemes: RSA-OAEP for encryption, RSASSA-PKCS1-v1_5
//! and RSA-PSS for signatures, each with a selectable digest. The PSS salt
//! length is always explicit: `None` means "as long as the digest output",
//! and anything above the RFC 8017 ceiling `emLen - hLen - 2` is rejected
//! instead of being silently clamped.

use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
pub use rsa::RsaPublicKey;
use rsa::{traits::PublicKeyParts, BigUint, Oaep, Pkcs1v15Sign, Pss, RsaPrivateKey};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::{
    digest::{digest, HashAlgorithm},
    error::{Error, Result},
};

pub struct Rsa {
    pub inner: RsaPrivateKey,
}

impl From<RsaPrivateKey> for Rsa {
    fn from(value: RsaPrivateKey) -> Self {
        Self { inner: value }
    }
}

impl Rsa {
    /// Generate a new RSA key pair
    ///
    /// # Arguments
    /// * `bits` - Modulus length (2048, 3072, or 4096)
    /// * `exponent` - Public exponent, conventionally 65537
    pub fn generate(bits: usize, exponent: u64) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new_with_exp(&mut rng, bits, &BigUint::from(exponent))
            .map_err(|e| Error::Other(format!("Failed to generate RSA key: {e}")))?;
        Ok(private_key.into())
    }

    /// Import from PKCS8 DER format
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| Error::Other(format!("Invalid RSA PKCS8 key: {e}")))?;
        Ok(private_key.into())
    }

    /// Export private key to PKCS8 DER format
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let der = self
            .inner
            .to_pkcs8_der()
            .map_err(|e| Error::Other(format!("PKCS8 encoding failed: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI DER format
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let der = self
            .inner
            .to_public_key()
            .to_public_key_der()
            .map_err(|e| Error::Other(format!("SPKI encoding failed: {e}")))?;
        Ok(der.as_bytes().to_vec())
    }

    /// Get the public key for this keypair
    pub fn public_key(&self) -> RsaPublicKey {
        self.inner.to_public_key()
    }

    /// Get key size in bits
    pub fn size(&self) -> usize {
        self.inner.size() * 8
    }

    /// Sign with RSASSA-PKCS1-v1_5
    pub fn sign_pkcs1v15(&self, message: &[u8], hash: HashAlgorithm) -> Result<Vec<u8>> {
        let hashed = digest(message, hash);
        self.inner
            .sign(pkcs1v15_scheme(hash), &hashed)
            .map_err(|e| Error::Other(format!("RSA signing failed: {e}")))
    }

    /// Sign with RSA-PSS
    ///
    /// # Arguments
    /// * `message` - Data to sign
    /// * `hash` - Digest used for both the message and MGF1
    /// * `salt_length` - Salt bytes; `None` defaults to the digest size
    pub fn sign_pss(
        &self,
        message: &[u8],
        hash: HashAlgorithm,
        salt_length: Option<usize>,
    ) -> Result<Vec<u8>> {
        let salt_len = resolve_salt_length(&self.public_key(), hash, salt_length)?;
        let mut rng = rand::thread_rng();
        let hashed = digest(message, hash);
        self.inner
            .sign_with_rng(&mut rng, pss_scheme(hash, salt_len), &hashed)
            .map_err(|e| Error::Other(format!("RSA-PSS signing failed: {e}")))
    }

    /// Decrypt with RSA-OAEP
    pub fn decrypt_oaep(&self, ciphertext: &[u8], hash: HashAlgorithm) -> Result<Vec<u8>> {
        self.inner
            .decrypt(oaep_scheme(hash), ciphertext)
            .map_err(|e| Error::Other(format!("RSA-OAEP decryption failed: {e}")))
    }
}

/// Encrypt with RSA-OAEP under a public key
pub fn encrypt_oaep(
    public_key: &RsaPublicKey,
    plaintext: &[u8],
    hash: HashAlgorithm,
) -> Result<Vec<u8>> {
    let mut rng = rand::thread_rng();
    public_key
        .encrypt(&mut rng, oaep_scheme(hash), plaintext)
        .map_err(|e| Error::Other(format!("RSA-OAEP encryption failed: {e}")))
}

/// Verify an RSASSA-PKCS1-v1_5 signature
pub fn verify_pkcs1v15(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
    hash: HashAlgorithm,
) -> bool {
    let hashed = digest(message, hash);
    public_key
        .verify(pkcs1v15_scheme(hash), &hashed, signature)
        .is_ok()
}

/// Verify an RSA-PSS signature
///
/// Fails with [`Error::SaltTooLong`] before any verification if the salt
/// length cannot fit this key/hash pair.
pub fn verify_pss(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
    hash: HashAlgorithm,
    salt_length: Option<usize>,
) -> Result<bool> {
    let salt_len = resolve_salt_length(public_key, hash, salt_length)?;
    let hashed = digest(message, hash);
    Ok(public_key
        .verify(pss_scheme(hash, salt_len), &hashed, signature)
        .is_ok())
}

/// Import a public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der)
        .map_err(|e| Error::Other(format!("Invalid RSA SPKI key: {e}")))
}

fn oaep_scheme(hash: HashAlgorithm) -> Oaep {
    match hash {
        HashAlgorithm::Sha1 => Oaep::new::<Sha1>(),
        HashAlgorithm::Sha256 => Oaep::new::<Sha256>(),
        HashAlgorithm::Sha384 => Oaep::new::<Sha384>(),
        HashAlgorithm::Sha512 => Oaep::new::<Sha512>(),
    }
}

fn pkcs1v15_scheme(hash: HashAlgorithm) -> Pkcs1v15Sign {
    match hash {
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

fn pss_scheme(hash: HashAlgorithm, salt_len: usize) -> Pss {
    match hash {
        HashAlgorithm::Sha1 => Pss::new_with_salt::<Sha1>(salt_len),
        HashAlgorithm::Sha256 => Pss::new_with_salt::<Sha256>(salt_len),
        HashAlgorithm::Sha384 => Pss::new_with_salt::<Sha384>(salt_len),
        HashAlgorithm::Sha512 => Pss::new_with_salt::<Sha512>(salt_len),
    }
}

/// RFC 8017 bound: sLen <= emLen - hLen - 2 with emLen = ceil((modBits-1)/8)
fn resolve_salt_length(
    public_key: &RsaPublicKey,
    hash: HashAlgorithm,
    salt_length: Option<usize>,
) -> Result<usize> {
    let h_len = hash.output_len();
    let em_len = (public_key.n().bits() - 1).div_ceil(8);
    let maximum = em_len.saturating_sub(h_len + 2);
    let requested = salt_length.unwrap_or(h_len);
    if requested > maximum {
        return Err(Error::SaltTooLong { requested, maximum });
    }
    Ok(requested)
}
