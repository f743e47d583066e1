//! Cryptools Cryptography Library
//!
//! This library provides the cryptographic primitives for the cryptools
//! project: message digests, symmetric and asymmetric encryption, signatures,
//! MACs, password hashing, and key derivation.

pub mod error;

// Cryptographic algorithm modules
pub mod asymmetric;
pub mod digest;
pub mod kdf;
pub mod mac;
pub mod password;
pub mod random;
pub mod srp;
pub mod symmetric;

// Re-export commonly used types for convenience
pub use asymmetric::{EcCurve, Ecdsa, Rsa};
pub use digest::{digest, digest_batch, digest_file, digest_hex, FileDigest, HashAlgorithm};
pub use error::{Error, Result};
pub use symmetric::{AesParams, CbcParams, CtrParams, GcmParams};
