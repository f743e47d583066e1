//! Asymmetric algorithms

pub mod ecdsa;
pub mod rsa;

pub use ecdsa::{EcCurve, Ecdsa};
pub use rsa::Rsa;
