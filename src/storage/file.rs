//! JSON file backed storage.

use std::fs::{self, File, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tempfile::NamedTempFile;

use super::{Storage, StorageError, StorageResult};
use crate::models::{VlanDataset, VlanInput, VlanRecord};

/// Storage that keeps the whole dataset in one indented JSON document.
///
/// Nothing is cached between calls: each operation reloads the file under the lock, so
/// the file on disk is always the live state.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Open the data file at `path`, creating it with an empty dataset if missing.
    ///
    /// An existing file is left untouched; its contents are only read by the first
    /// operation.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let storage = Self {
            path: path.into(),
            lock: Mutex::new(()),
        };

        let exists = storage
            .path
            .try_exists()
            .map_err(|e| StorageError::io("failed to inspect data file", e))?;
        if !exists {
            if let Some(parent) = storage.parent_dir() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::io("failed to create data directory", e))?;
            }
            let _guard = storage.acquire();
            storage.persist(&VlanDataset::default())?;
        }

        Ok(storage)
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
    }

    /// The lock guards no data of its own, so a poisoned lock is still usable.
    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> StorageResult<VlanDataset> {
        let bytes =
            fs::read(&self.path).map_err(|e| StorageError::io("failed to read data file", e))?;
        serde_json::from_slice(&bytes).map_err(|e| StorageError::io("failed to parse data file", e))
    }

    /// Replace the data file with `dataset` in one rename.
    fn persist(&self, dataset: &VlanDataset) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(dataset)
            .map_err(|e| StorageError::io("failed to serialize data", e))?;

        let dir = self.parent_dir().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| StorageError::io("failed to create temporary file", e))?;
        tmp.write_all(&json)
            .map_err(|e| StorageError::io("failed to write data file", e))?;
        let permissions = self
            .target_permissions(tmp.as_file())
            .map_err(|e| StorageError::io("failed to read data file permissions", e))?;
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| StorageError::io("failed to set data file permissions", e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StorageError::io("failed to sync data file", e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io("failed to replace data file", e))?;

        Ok(())
    }

    /// Mode the replacement file must carry: the current file's, or 0644 for a new file.
    fn target_permissions(&self, tmp: &File) -> io::Result<Permissions> {
        match fs::metadata(&self.path) {
            Ok(metadata) => Ok(metadata.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => new_file_permissions(tmp),
            Err(e) => Err(e),
        }
    }

    fn read<T>(&self, op: impl FnOnce(&VlanDataset) -> StorageResult<T>) -> StorageResult<T> {
        let _guard = self.acquire();
        let dataset = self.load()?;
        op(&dataset)
    }

    /// Load, mutate and persist while holding the lock for the whole sequence.
    ///
    /// If `op` or the write fails the mutated copy is dropped and the file keeps its
    /// previous contents.
    fn write<T>(&self, op: impl FnOnce(&mut VlanDataset) -> StorageResult<T>) -> StorageResult<T> {
        let _guard = self.acquire();
        let mut dataset = self.load()?;
        let result = op(&mut dataset)?;
        self.persist(&dataset)?;
        Ok(result)
    }
}

#[cfg(unix)]
fn new_file_permissions(_tmp: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions(tmp: &File) -> io::Result<Permissions> {
    Ok(tmp.metadata()?.permissions())
}

impl Storage for JsonFileStorage {
    fn get_all(&self) -> StorageResult<Vec<VlanRecord>> {
        self.read(|dataset| Ok(dataset.vlans.clone()))
    }

    fn get_by_id(&self, id: i64) -> StorageResult<VlanRecord> {
        self.read(|dataset| dataset.find(id).cloned())
    }

    fn create(&self, input: &VlanInput) -> StorageResult<VlanRecord> {
        self.write(|dataset| dataset.insert(input, Utc::now()))
    }

    fn update(&self, id: i64, input: &VlanInput) -> StorageResult<VlanRecord> {
        self.write(|dataset| dataset.replace(id, input, Utc::now()))
    }

    fn delete(&self, id: i64) -> StorageResult<()> {
        self.write(|dataset| dataset.remove(id).map(|_| ()))
    }
}
