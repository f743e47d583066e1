//! AES encryption (GCM, CBC, CTR)
//!
//! Supports 128-, 192- and 256-bit keys. Every mode takes its own typed
//! parameter struct; there is no untyped parameter bag. The caller supplies
//! the IV or counter block so that operations stay deterministic and
//! testable.
//!
//! AES-GCM produces ciphertext with the 16-byte authentication tag appended.
//! AES-CBC applies PKCS#7 padding. AES-CTR treats the full 16-byte counter
//! block as a big-endian counter.

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::{
    aead::{consts::U12, generic_array::GenericArray, Aead, KeyInit, Payload},
    Aes128Gcm, Aes256Gcm, AesGcm,
};
use cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher};
use ctr::Ctr128BE;

use crate::error::{Error, Result};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES-GCM parameters: 12-byte nonce plus optional additional
/// authenticated data. The authentication tag is always 128 bits.
#[derive(Debug, Clone)]
pub struct GcmParams<'a> {
    pub iv: &'a [u8],
    pub aad: &'a [u8],
}

/// AES-CBC parameters: one 16-byte initialization vector
#[derive(Debug, Clone)]
pub struct CbcParams<'a> {
    pub iv: &'a [u8],
}

/// AES-CTR parameters: one 16-byte initial counter block
#[derive(Debug, Clone)]
pub struct CtrParams<'a> {
    pub counter: &'a [u8],
}

/// Mode selection with per-mode parameters
#[derive(Debug, Clone)]
pub enum AesParams<'a> {
    Gcm(GcmParams<'a>),
    Cbc(CbcParams<'a>),
    Ctr(CtrParams<'a>),
}

/// Encrypt data with AES under the given mode parameters
///
/// # Arguments
/// * `key` - 16-, 24- or 32-byte key
/// * `params` - Mode and its IV/counter/AAD
/// * `plaintext` - Data to encrypt
pub fn encrypt(key: &[u8], params: &AesParams<'_>, plaintext: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;
    match params {
        AesParams::Gcm(p) => gcm_encrypt(key, p, plaintext),
        AesParams::Cbc(p) => cbc_encrypt(key, p, plaintext),
        AesParams::Ctr(p) => ctr_apply(key, p, plaintext),
    }
}

/// Decrypt data with AES under the given mode parameters
///
/// # Arguments
/// * `key` - 16-, 24- or 32-byte key
/// * `params` - Mode and its IV/counter/AAD, matching encryption
/// * `ciphertext` - Data to decrypt (GCM: with appended tag)
pub fn decrypt(key: &[u8], params: &AesParams<'_>, ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;
    match params {
        AesParams::Gcm(p) => gcm_decrypt(key, p, ciphertext),
        AesParams::Cbc(p) => cbc_decrypt(key, p, ciphertext),
        AesParams::Ctr(p) => ctr_apply(key, p, ciphertext),
    }
}

fn check_key(key: &[u8]) -> Result<()> {
    if matches!(key.len(), 16 | 24 | 32) {
        Ok(())
    } else {
        Err(Error::InvalidKeyLength(key.len()))
    }
}

fn check_iv(iv: &[u8], expected: usize) -> Result<()> {
    if iv.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidIvLength {
            expected,
            actual: iv.len(),
        })
    }
}

fn gcm_seal<C: Aead + KeyInit>(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(|_| Error::InvalidKeyLength(key.len()))?;
    cipher
        .encrypt(
            GenericArray::from_slice(iv),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|e| Error::Other(format!("AES-GCM encryption failed: {e}")))
}

fn gcm_open<C: Aead + KeyInit>(
    key: &[u8],
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key).map_err(|_| Error::InvalidKeyLength(key.len()))?;
    cipher
        .decrypt(
            GenericArray::from_slice(iv),
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|e| Error::Other(format!("AES-GCM decryption failed: {e}")))
}

fn gcm_encrypt(key: &[u8], params: &GcmParams<'_>, plaintext: &[u8]) -> Result<Vec<u8>> {
    check_iv(params.iv, 12)?;
    match key.len() {
        16 => gcm_seal::<Aes128Gcm>(key, params.iv, params.aad, plaintext),
        24 => gcm_seal::<Aes192Gcm>(key, params.iv, params.aad, plaintext),
        _ => gcm_seal::<Aes256Gcm>(key, params.iv, params.aad, plaintext),
    }
}

fn gcm_decrypt(key: &[u8], params: &GcmParams<'_>, ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_iv(params.iv, 12)?;
    if ciphertext.len() < 16 {
        return Err(Error::Other(
            "Ciphertext too short for AES-GCM tag".to_string(),
        ));
    }
    match key.len() {
        16 => gcm_open::<Aes128Gcm>(key, params.iv, params.aad, ciphertext),
        24 => gcm_open::<Aes192Gcm>(key, params.iv, params.aad, ciphertext),
        _ => gcm_open::<Aes256Gcm>(key, params.iv, params.aad, ciphertext),
    }
}

fn cbc_encrypt(key: &[u8], params: &CbcParams<'_>, plaintext: &[u8]) -> Result<Vec<u8>> {
    check_iv(params.iv, 16)?;
    let out = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, params.iv)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => cbc::Encryptor::<Aes192>::new_from_slices(key, params.iv)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        _ => cbc::Encryptor::<Aes256>::new_from_slices(key, params.iv)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };
    Ok(out)
}

fn cbc_decrypt(key: &[u8], params: &CbcParams<'_>, ciphertext: &[u8]) -> Result<Vec<u8>> {
    check_iv(params.iv, 16)?;
    let unpad_err = |_| Error::Other("AES-CBC decryption failed: bad padding".to_string());
    match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, params.iv)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(unpad_err),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, params.iv)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(unpad_err),
        _ => cbc::Decryptor::<Aes256>::new_from_slices(key, params.iv)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(unpad_err),
    }
}

/// CTR is its own inverse; the same keystream application encrypts and
/// decrypts
fn ctr_apply(key: &[u8], params: &CtrParams<'_>, data: &[u8]) -> Result<Vec<u8>> {
    check_iv(params.counter, 16)?;
    let mut out = data.to_vec();
    match key.len() {
        16 => Ctr128BE::<Aes128>::new_from_slices(key, params.counter)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .apply_keystream(&mut out),
        24 => Ctr128BE::<Aes192>::new_from_slices(key, params.counter)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .apply_keystream(&mut out),
        _ => Ctr128BE::<Aes256>::new_from_slices(key, params.counter)
            .map_err(|_| Error::InvalidKeyLength(key.len()))?
            .apply_keystream(&mut out),
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcm_roundtrip_all_key_sizes() {
        let iv = [7u8; 12];
        let plaintext = b"Hello, AES-GCM!";
        for key_len in [16usize, 24, 32] {
            let key = vec![0x42u8; key_len];
            let params = AesParams::Gcm(GcmParams { iv: &iv, aad: b"" });
            let ciphertext = encrypt(&key, &params, plaintext).unwrap();
            // ciphertext plus 16-byte tag
            assert_eq!(ciphertext.len(), plaintext.len() + 16);
            assert_eq!(decrypt(&key, &params, &ciphertext).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_gcm_aad_mismatch_fails() {
        let key = [1u8; 32];
        let iv = [2u8; 12];
        let sealed = encrypt(
            &key,
            &AesParams::Gcm(GcmParams {
                iv: &iv,
                aad: b"context",
            }),
            b"secret",
        )
        .unwrap();
        let wrong = AesParams::Gcm(GcmParams {
            iv: &iv,
            aad: b"other",
        });
        assert!(decrypt(&key, &wrong, &sealed).is_err());
    }

    #[test]
    fn test_cbc_roundtrip_and_padding() {
        let key = [3u8; 16];
        let iv = [4u8; 16];
        let params = AesParams::Cbc(CbcParams { iv: &iv });
        // 16-byte plaintext gains a full padding block
        let plaintext = [0u8; 16];
        let ciphertext = encrypt(&key, &params, &plaintext).unwrap();
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(decrypt(&key, &params, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_ctr_is_involutive() {
        let key = [5u8; 24];
        let counter = [0u8; 16];
        let params = AesParams::Ctr(CtrParams { counter: &counter });
        let plaintext = b"counter mode keystream";
        let ciphertext = encrypt(&key, &params, plaintext).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_eq!(decrypt(&key, &params, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_bad_lengths_rejected() {
        let iv = [0u8; 12];
        let params = AesParams::Gcm(GcmParams { iv: &iv, aad: b"" });
        assert!(matches!(
            encrypt(&[0u8; 15], &params, b"x"),
            Err(Error::InvalidKeyLength(15))
        ));

        let short_iv = [0u8; 8];
        let params = AesParams::Gcm(GcmParams {
            iv: &short_iv,
            aad: b"",
        });
        assert!(matches!(
            encrypt(&[0u8; 16], &params, b"x"),
            Err(Error::InvalidIvLength {
                expected: 12,
                actual: 8
            })
        ));
    }
}
