//! SRP-6a registration helper
//!
//! Produces the (salt, verifier) pair a server stores at account creation.
//! The protocol math itself is delegated to the `srp` crate; only the
//! registration artifacts are surfaced here.

use sha2::Sha256;
use srp::{client::SrpClient, groups::G_2048};

use crate::{error::Result, random};

/// Salt length used for new registrations, in bytes
pub const SALT_LEN: usize = 16;

/// Registration output: the values the server persists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub salt: Vec<u8>,
    pub verifier: Vec<u8>,
}

/// Compute a verifier for the given identity over a caller-supplied salt
///
/// Uses the 2048-bit group from RFC 5054 with SHA-256.
pub fn compute_verifier(username: &str, password: &str, salt: &[u8]) -> Vec<u8> {
    let client = SrpClient::<Sha256>::new(&G_2048);
    client.compute_verifier(username.as_bytes(), password.as_bytes(), salt)
}

/// Register an identity: generate a fresh random salt and derive the verifier
pub fn register(username: &str, password: &str) -> Result<Registration> {
    let salt = random::bytes(SALT_LEN)?;
    let verifier = compute_verifier(username, password, &salt);
    Ok(Registration { salt, verifier })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verifier_deterministic_for_fixed_salt() {
        let salt = [0x5au8; 16];
        let a = compute_verifier("alice", "password123", &salt);
        let b = compute_verifier("alice", "password123", &salt);
        assert_eq!(a, b);
        // 2048-bit group yields a verifier of up to 256 bytes
        assert!(!a.is_empty() && a.len() <= 256);
    }

    #[test]
    fn test_verifier_binds_identity_and_salt() {
        let salt = [0x5au8; 16];
        let base = compute_verifier("alice", "password123", &salt);
        assert_ne!(compute_verifier("bob", "password123", &salt), base);
        assert_ne!(compute_verifier("alice", "different", &salt), base);
        assert_ne!(compute_verifier("alice", "password123", &[0u8; 16]), base);
    }

    #[test]
    fn test_register_generates_salt() {
        let a = register("alice", "pw").unwrap();
        let b = register("alice", "pw").unwrap();
        assert_eq!(a.salt.len(), SALT_LEN);
        // Fresh salt per registration, hence a fresh verifier
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.verifier, b.verifier);
    }
}
