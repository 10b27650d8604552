use super::{KeyValueStore, validate_key};
use crate::errors::StorageError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Uses `root` as the storage directory, creating it on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the platform default directory, see [`default_storage_dir`].
    pub fn in_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(default_storage_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|source| StorageError::CreateDir {
                path: self.root.clone(),
                source,
            })?;
        }

        // Write next to the target and rename so readers never see a partial record
        let tmp = self.root.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Write { path, source })?;

        log::debug!("Stored key '{}' in {}", key, self.root.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { path, source }),
        }
    }
}

/// Platform storage directory.
///
/// Prefers `~/.config/chatadmin/storage` on Unix-like systems and falls back
/// to the platform config directory elsewhere.
pub fn default_storage_dir() -> Result<PathBuf, StorageError> {
    if cfg!(unix) {
        if let Some(mut home_path) = dirs::home_dir() {
            home_path.push(".config");
            home_path.push("chatadmin");
            home_path.push("storage");
            return Ok(home_path);
        }
    }

    dirs::config_dir()
        .map(|mut path| {
            path.push("chatadmin");
            path.push("storage");
            path
        })
        .ok_or_else(|| {
            StorageError::DirectoryUnavailable("Unable to determine config directory".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("storage");

        FileStore::new(&root)
            .set("conn", r#"{"ServerUrl":"http://x.test/"}"#)
            .unwrap();

        let reopened = FileStore::new(&root);
        assert_eq!(
            reopened.get("conn").unwrap().as_deref(),
            Some(r#"{"ServerUrl":"http://x.test/"}"#)
        );
        assert!(root.join("conn.json").exists());
    }

    #[test]
    fn remove_deletes_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("user", "{}").unwrap();
        store.remove("user").unwrap();
        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
