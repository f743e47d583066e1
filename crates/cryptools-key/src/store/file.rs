use std::{
    fs,
    path::PathBuf,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};

use super::{KeyStore, StoredKey};
use crate::error::{Error, Result};

/// Key store persisted as a single JSON document
///
/// Every operation loads the document, applies its change, and writes the
/// document back, so the file stays consistent across processes that do not
/// run concurrently.
pub struct FileKeyStore {
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

#[derive(Default, Serialize, Deserialize)]
struct Document {
    keys: Vec<StoredKey>,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(RwLock::new(())),
        }
    }

    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn open(&self) -> Result<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| Error::Other("Failed to acquire write lock".to_string()))?;

        // Existing storage is left untouched
        if self.path.exists() {
            self.load()?;
            return Ok(());
        }
        self.save(&Document::default())
    }

    fn insert(&self, key: &StoredKey) -> Result<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| Error::Other("Failed to acquire write lock".to_string()))?;

        let mut document = self.load()?;
        if document.keys.iter().any(|k| k.name == key.name) {
            return Err(Error::DuplicateName(key.name.clone()));
        }
        document.keys.push(key.clone());
        self.save(&document)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let _guard = self
            .lock
            .write()
            .map_err(|_| Error::Other("Failed to acquire write lock".to_string()))?;

        let mut document = self.load()?;
        let before = document.keys.len();
        document.keys.retain(|k| k.name != name);
        if document.keys.len() == before {
            return Err(Error::NotFound(name.to_string()));
        }
        self.save(&document)
    }

    fn list(&self) -> Result<Vec<StoredKey>> {
        let _guard = self
            .lock
            .read()
            .map_err(|_| Error::Other("Failed to acquire read lock".to_string()))?;
        Ok(self.load()?.keys)
    }
}

#[cfg(test)]
mod tests {
    use cryptools_crypto::{digest::HashAlgorithm, random};
    use tempfile::TempDir;

    use super::*;
    use crate::{
        algorithm::{KeyAlgorithm, KeyUsage},
        material::KeyMaterial,
    };

    fn sample_key(name: &str) -> StoredKey {
        StoredKey {
            name: name.to_string(),
            algorithm: KeyAlgorithm::Hmac {
                hash: HashAlgorithm::Sha256,
            },
            usages: vec![KeyUsage::Sign, KeyUsage::Verify],
            material: KeyMaterial::Secret {
                bytes: random::bytes(64).unwrap(),
            },
        }
    }

    #[test]
    fn test_open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyStore::new(dir.path().join("keys.json"));

        store.open().unwrap();
        store.insert(&sample_key("alpha")).unwrap();

        // Reopening must not wipe the stored key
        store.open().unwrap();
        let keys = store.list().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].name, "alpha");
    }

    #[test]
    fn test_insert_rejects_duplicate_name() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyStore::new(dir.path().join("keys.json"));
        store.open().unwrap();

        store.insert(&sample_key("alpha")).unwrap();
        let result = store.insert(&sample_key("alpha"));
        assert!(matches!(result, Err(Error::DuplicateName(name)) if name == "alpha"));
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyStore::new(dir.path().join("keys.json"));
        store.open().unwrap();

        store.insert(&sample_key("alpha")).unwrap();
        store.insert(&sample_key("beta")).unwrap();
        store.delete("alpha").unwrap();

        let keys = store.list().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].name, "beta");

        assert!(matches!(
            store.delete("alpha"),
            Err(Error::NotFound(name)) if name == "alpha"
        ));
    }

    #[test]
    fn test_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keys.json");

        let key = sample_key("alpha");
        let store = FileKeyStore::new(&path);
        store.open().unwrap();
        store.insert(&key).unwrap();
        drop(store);

        let store = FileKeyStore::new(&path);
        store.open().unwrap();
        let keys = store.list().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].material, key.material);
        assert_eq!(keys[0].usages, key.usages);
    }
}
