//! The key ring: named keys, in memory with optional persistence
//!
//! Keys live in a name-indexed map for the life of the process. A ring may
//! be backed by a [`KeyStore`]; persisted keys are loaded on open, and keys
//! added with persistence requested are written through to the backend.

use std::collections::HashMap;

use crate::{
    algorithm::{KeyAlgorithm, KeyUsage},
    error::{Error, Result},
    material::KeyMaterial,
    store::{KeyStore, StoredKey},
};

/// One key on the ring
#[derive(Clone, Debug)]
pub struct KeyRecord {
    pub name: String,
    pub algorithm: KeyAlgorithm,
    pub usages: Vec<KeyUsage>,
    pub material: KeyMaterial,
    /// Whether the key is written through to the backing store
    pub persisted: bool,
}

/// Name-indexed key collection
pub struct KeyRing {
    keys: HashMap<String, KeyRecord>,
    store: Option<Box<dyn KeyStore>>,
}

impl KeyRing {
    /// Ring without persistence; keys vanish with the process
    pub fn ephemeral() -> Self {
        Self {
            keys: HashMap::new(),
            store: None,
        }
    }

    /// Ring backed by a store, preloaded with the store's keys
    pub fn open(store: Box<dyn KeyStore>) -> Result<Self> {
        store.open()?;
        let mut keys = HashMap::new();
        for stored in store.list()? {
            keys.insert(
                stored.name.clone(),
                KeyRecord {
                    name: stored.name,
                    algorithm: stored.algorithm,
                    usages: stored.usages,
                    material: stored.material,
                    persisted: true,
                },
            );
        }
        Ok(Self {
            keys,
            store: Some(store),
        })
    }

    /// Add a key under a unique name, optionally writing it through
    pub fn add(
        &mut self,
        name: &str,
        algorithm: KeyAlgorithm,
        usages: Vec<KeyUsage>,
        material: KeyMaterial,
        persist: bool,
    ) -> Result<&KeyRecord> {
        if self.keys.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        if persist {
            let store = self.store.as_ref().ok_or_else(|| {
                Error::Other("No persistent store is configured".to_string())
            })?;
            store.insert(&StoredKey {
                name: name.to_string(),
                algorithm,
                usages: usages.clone(),
                material: material.clone(),
            })?;
        }

        let record = KeyRecord {
            name: name.to_string(),
            algorithm,
            usages,
            material,
            persisted: persist,
        };
        self.keys.insert(name.to_string(), record);
        Ok(&self.keys[name])
    }

    pub fn get(&self, name: &str) -> Result<&KeyRecord> {
        self.keys
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Remove a key from the ring and, when persisted, from the store
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let record = self
            .keys
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        if record.persisted {
            if let Some(store) = &self.store {
                store.delete(name)?;
            }
        }
        Ok(())
    }

    /// All keys, sorted by name
    pub fn list(&self) -> Vec<&KeyRecord> {
        let mut records: Vec<&KeyRecord> = self.keys.values().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use cryptools_crypto::{digest::HashAlgorithm, random};
    use tempfile::TempDir;

    use super::*;
    use crate::store::FileKeyStore;

    fn hmac_key() -> (KeyAlgorithm, Vec<KeyUsage>, KeyMaterial) {
        (
            KeyAlgorithm::Hmac {
                hash: HashAlgorithm::Sha256,
            },
            vec![KeyUsage::Sign, KeyUsage::Verify],
            KeyMaterial::Secret {
                bytes: random::bytes(64).unwrap(),
            },
        )
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut ring = KeyRing::ephemeral();
        let (algorithm, usages, material) = hmac_key();
        ring.add("token", algorithm, usages.clone(), material.clone(), false)
            .unwrap();

        let (_, _, other_material) = hmac_key();
        let result = ring.add("token", algorithm, usages, other_material, false);
        assert!(matches!(result, Err(Error::DuplicateName(name)) if name == "token"));

        // The rejected insert must leave the existing record untouched
        assert_eq!(ring.get("token").unwrap().material, material);
    }

    #[test]
    fn test_get_and_remove() {
        let mut ring = KeyRing::ephemeral();
        let (algorithm, usages, material) = hmac_key();
        ring.add("token", algorithm, usages, material, false).unwrap();

        assert_eq!(ring.get("token").unwrap().name, "token");
        ring.remove("token").unwrap();
        assert!(matches!(ring.get("token"), Err(Error::NotFound(_))));
        assert!(matches!(ring.remove("token"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_persisted_keys_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keys.json");
        let (algorithm, usages, material) = hmac_key();

        let mut ring = KeyRing::open(Box::new(FileKeyStore::new(&path))).unwrap();
        ring.add("kept", algorithm, usages.clone(), material.clone(), true)
            .unwrap();
        ring.add("dropped", algorithm, usages, material.clone(), false)
            .unwrap();
        drop(ring);

        // Only the persisted key survives a reopen
        let ring = KeyRing::open(Box::new(FileKeyStore::new(&path))).unwrap();
        let record = ring.get("kept").unwrap();
        assert!(record.persisted);
        assert_eq!(record.material, material);
        assert!(matches!(ring.get("dropped"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_persist_without_store_fails() {
        let mut ring = KeyRing::ephemeral();
        let (algorithm, usages, material) = hmac_key();
        assert!(ring.add("token", algorithm, usages, material, true).is_err());
    }

    #[test]
    fn test_remove_deletes_from_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keys.json");
        let (algorithm, usages, material) = hmac_key();

        let mut ring = KeyRing::open(Box::new(FileKeyStore::new(&path))).unwrap();
        ring.add("kept", algorithm, usages, material, true).unwrap();
        ring.remove("kept").unwrap();
        drop(ring);

        let ring = KeyRing::open(Box::new(FileKeyStore::new(&path))).unwrap();
        assert!(ring.is_empty());
    }
}
