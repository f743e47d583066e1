//! Symmetric encryption algorithms

pub mod aes;

pub use aes::{decrypt, encrypt, AesParams, CbcParams, CtrParams, GcmParams};
