//! Mutation rules shared by every storage backend.

use chrono::{DateTime, Utc};

use super::{StorageError, StorageResult};
use crate::models::{VlanDataset, VlanInput, VlanRecord};

impl VlanDataset {
    pub fn find(&self, id: i64) -> StorageResult<&VlanRecord> {
        self.vlans
            .iter()
            .find(|vlan| vlan.id == id)
            .ok_or(StorageError::NotFound)
    }

    /// One past the highest id currently present, or 1 when empty.
    ///
    /// Derived from content, not a counter: deleting the top record frees its id again.
    pub fn next_id(&self) -> StorageResult<i64> {
        match self.vlans.iter().map(|vlan| vlan.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(StorageError::IdsExhausted),
        }
    }

    fn tag_taken(&self, vlan_tag: i64, except_id: Option<i64>) -> bool {
        self.vlans
            .iter()
            .any(|vlan| vlan.vlan_tag == vlan_tag && Some(vlan.id) != except_id)
    }

    /// Append a new record built from `input`.
    pub fn insert(&mut self, input: &VlanInput, now: DateTime<Utc>) -> StorageResult<VlanRecord> {
        if self.tag_taken(input.vlan_tag, None) {
            return Err(StorageError::AlreadyExists);
        }

        let record = VlanRecord {
            id: self.next_id()?,
            name: input.name.clone(),
            vlan_tag: input.vlan_tag,
            subnet: input.subnet.clone(),
            gateway: input.gateway.clone(),
            status: input.status.clone(),
            created_at: now,
            updated_at: now,
        };
        self.vlans.push(record.clone());

        Ok(record)
    }

    /// Overwrite every field of record `id` except `id` and `created_at`.
    pub fn replace(
        &mut self,
        id: i64,
        input: &VlanInput,
        now: DateTime<Utc>,
    ) -> StorageResult<VlanRecord> {
        let current_tag = self.find(id)?.vlan_tag;
        if current_tag != input.vlan_tag && self.tag_taken(input.vlan_tag, Some(id)) {
            return Err(StorageError::AlreadyExists);
        }

        let vlan = self
            .vlans
            .iter_mut()
            .find(|vlan| vlan.id == id)
            .ok_or(StorageError::NotFound)?;
        vlan.name = input.name.clone();
        vlan.vlan_tag = input.vlan_tag;
        vlan.subnet = input.subnet.clone();
        vlan.gateway = input.gateway.clone();
        vlan.status = input.status.clone();
        vlan.updated_at = now;

        Ok(vlan.clone())
    }

    /// Remove record `id`, keeping the relative order of the rest.
    pub fn remove(&mut self, id: i64) -> StorageResult<VlanRecord> {
        let index = self
            .vlans
            .iter()
            .position(|vlan| vlan.id == id)
            .ok_or(StorageError::NotFound)?;
        Ok(self.vlans.remove(index))
    }
}
