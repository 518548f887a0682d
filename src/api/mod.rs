//! REST API module.
//!
//! Handlers validate input, run the blocking storage call off the async runtime and
//! translate failures into `AppError` responses.

mod vlans;

pub use vlans::*;

use std::io;
use std::sync::Arc;

use crate::errors::AppError;
use crate::storage::{Storage, StorageError, StorageResult};
use crate::validation::{MAX_VLAN_TAG, MIN_VLAN_TAG};
use crate::AppState;

/// Handler result type.
pub type ApiResult<T> = Result<T, AppError>;

/// Run a storage operation on the blocking thread pool.
pub async fn with_storage<T, F>(state: &AppState, op: F) -> StorageResult<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn Storage) -> StorageResult<T> + Send + 'static,
{
    let storage = Arc::clone(&state.storage);
    tokio::task::spawn_blocking(move || op(storage.as_ref()))
        .await
        .map_err(|e| StorageError::io("storage task failed", io::Error::other(e)))?
}

/// Parse a record id from the request path.
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    use crate::errors::messages;

    let id: i64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(messages::INVALID_ID.to_string()))?;

    if !(MIN_VLAN_TAG..=MAX_VLAN_TAG).contains(&id) {
        return Err(AppError::BadRequest(messages::ID_OUT_OF_RANGE.to_string()));
    }

    Ok(id)
}
