//! Cryptools Key Management Library
//!
//! This library turns pasted or uploaded key material into named, typed keys
//! and runs cryptographic operations over them: classification of JWK, PEM,
//! DER, and raw inputs, import into canonical representations, generation,
//! export, persistent storage, and the encrypt/decrypt/sign/verify
//! operations themselves.

pub mod algorithm;
pub mod classify;
pub mod error;
pub mod jwk;
pub mod keyring;
pub mod material;
pub mod ops;
pub mod store;

// Re-export core functionality
pub use algorithm::{KeyAlgorithm, KeyUsage, RsaVariant};
pub use classify::{
    classify, conventional_usages, ImportHints, ImportParams, KeyClass, KeyData, KeyFormat,
    RsaHint,
};
pub use error::{Error, Result};
pub use jwk::Jwk;
pub use keyring::{KeyRecord, KeyRing};
pub use material::{export, generate, import, KeyGenParams, KeyMaterial};
pub use store::{FileKeyStore, KeyStore, StoredKey};
