//! In-memory storage with the same contract as the file backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::{Storage, StorageResult};
use crate::models::{VlanDataset, VlanInput, VlanRecord};

/// Dataset held in process memory behind a single lock. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    dataset: Mutex<VlanDataset>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: VlanDataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
        }
    }

    fn acquire(&self) -> MutexGuard<'_, VlanDataset> {
        self.dataset.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `op` on a copy and commit it only on success, so a failed mutation
    /// leaves no partial state behind.
    fn write<T>(&self, op: impl FnOnce(&mut VlanDataset) -> StorageResult<T>) -> StorageResult<T> {
        let mut guard = self.acquire();
        let mut working = guard.clone();
        let result = op(&mut working)?;
        *guard = working;
        Ok(result)
    }
}

impl Storage for MemoryStorage {
    fn get_all(&self) -> StorageResult<Vec<VlanRecord>> {
        Ok(self.acquire().vlans.clone())
    }

    fn get_by_id(&self, id: i64) -> StorageResult<VlanRecord> {
        self.acquire().find(id).cloned()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn input(vlan_tag: i64) -> VlanInput {
        VlanInput {
            name: format!("vlan-{vlan_tag}"),
            vlan_tag,
            subnet: "172.16.0.0/16".to_string(),
            gateway: "172.16.0.1".to_string(),
            status: "inactive".to_string(),
        }
    }

    #[test]
    fn test_crud_cycle() {
        let storage = MemoryStorage::new();

        let created = storage.create(&input(10)).unwrap();
        assert_eq!(storage.get_by_id(created.id).unwrap(), created);

        let updated = storage.update(created.id, &input(11)).unwrap();
        assert_eq!(updated.vlan_tag, 11);

        storage.delete(created.id).unwrap();
        assert!(matches!(
            storage.get_by_id(created.id),
            Err(StorageError::NotFound)
        ));
        assert!(storage.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_seeded_dataset_drives_id_assignment() {
        let seed = {
            let mut dataset = VlanDataset::default();
            dataset.insert(&input(1), Utc::now()).unwrap();
            dataset.insert(&input(2), Utc::now()).unwrap();
            dataset
        };
        let storage = MemoryStorage::with_dataset(seed);

        assert_eq!(storage.create(&input(3)).unwrap().id, 3);
        assert!(matches!(
            storage.create(&input(2)),
            Err(StorageError::AlreadyExists)
        ));
    }
}
