//! Password-based key derivation (PBKDF2)

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::{
    digest::HashAlgorithm,
    error::{Error, Result},
};

/// Derive key material from a password with PBKDF2
///
/// # Arguments
/// * `password` - Password bytes
/// * `salt` - Salt bytes
/// * `iterations` - Iteration count, must be nonzero
/// * `hash` - Underlying PRF hash
/// * `output_len` - Number of bytes to derive
pub fn pbkdf2(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    hash: HashAlgorithm,
    output_len: usize,
) -> Result<Vec<u8>> {
    if iterations == 0 {
        return Err(Error::Other("PBKDF2 iteration count must be nonzero".into()));
    }
    if output_len == 0 {
        return Err(Error::Other("PBKDF2 output length must be nonzero".into()));
    }

    let mut out = vec![0u8; output_len];
    match hash {
        HashAlgorithm::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, iterations, &mut out),
        HashAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out),
        HashAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, iterations, &mut out),
        HashAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out),
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_rfc6070_vector() {
        // RFC 6070 test vector 2 (PBKDF2-HMAC-SHA1, 2 iterations)
        let out = pbkdf2(b"password", b"salt", 2, HashAlgorithm::Sha1, 20).unwrap();
        assert_eq!(out, hex!("ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"));
    }

    #[test]
    fn test_sha256_vector() {
        // From the PBKDF2-HMAC-SHA256 test vectors of RFC 7914 appendix B
        let out = pbkdf2(b"passwd", b"salt", 1, HashAlgorithm::Sha256, 32).unwrap();
        assert_eq!(
            out,
            hex!("55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc")
        );
    }

    #[test]
    fn test_output_length_honored() {
        let out = pbkdf2(b"pw", b"salt", 10, HashAlgorithm::Sha512, 100).unwrap();
        assert_eq!(out.len(), 100);
    }

    #[test]
    fn test_zero_parameters_rejected() {
        assert!(pbkdf2(b"pw", b"salt", 0, HashAlgorithm::Sha256, 32).is_err());
        assert!(pbkdf2(b"pw", b"salt", 1, HashAlgorithm::Sha256, 0).is_err());
    }
}
