//! Storage layer for VLAN records.
//!
//! The JSON data file is the source of truth. Every operation takes the single storage
//! lock, loads the whole dataset, and for mutations rewrites the whole file before
//! releasing the lock.

mod dataset;
mod file;
#[allow(dead_code)]
mod memory;

pub use file::*;
#[allow(unused_imports)]
pub use memory::*;

use std::io;

use thiserror::Error;

use crate::models::{VlanInput, VlanRecord};

/// Failure kinds surfaced by any `Storage` implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("VLAN not found")]
    NotFound,
    #[error("VLAN already exists")]
    AlreadyExists,
    /// The highest stored id leaves no room for another one.
    #[error("no VLAN ids left to assign")]
    IdsExhausted,
    /// The backing file could not be read, written or parsed.
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(context: &'static str, source: impl Into<io::Error>) -> Self {
        StorageError::Io {
            context,
            source: source.into(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// CRUD contract consumed by the HTTP layer.
///
/// Callers validate `VlanInput` before handing it over; implementations only enforce
/// existence and VLAN tag uniqueness. All methods block the calling thread.
pub trait Storage: Send + Sync {
    fn get_all(&self) -> StorageResult<Vec<VlanRecord>>;
    fn get_by_id(&self, id: i64) -> StorageResult<VlanRecord>;
    fn create(&self, input: &VlanInput) -> StorageResult<VlanRecord>;
    fn update(&self, id: i64, input: &VlanInput) -> StorageResult<VlanRecord>;
    fn delete(&self, id: i64) -> StorageResult<()>;
}
