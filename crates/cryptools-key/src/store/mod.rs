mod file;

pub use file::FileKeyStore;
use serde::{Deserialize, Serialize};

use crate::{
    algorithm::{KeyAlgorithm, KeyUsage},
    error::Result,
    material::KeyMaterial,
};

/// One stored key, addressed by its unique name
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredKey {
    pub name: String,
    pub algorithm: KeyAlgorithm,
    pub usages: Vec<KeyUsage>,
    pub material: KeyMaterial,
}

/// Trait for persistent key storage backends (synchronous)
pub trait KeyStore: Send + Sync {
    /// Prepare the backing storage; calling this on existing storage is a
    /// no-op that preserves its contents
    fn open(&self) -> Result<()>;

    /// Insert a key, failing when the name is already taken
    fn insert(&self, key: &StoredKey) -> Result<()>;

    /// Delete a key by name, failing when it does not exist
    fn delete(&self, name: &str) -> Result<()>;

    /// List every stored key
    fn list(&self) -> Result<Vec<StoredKey>>;
}
