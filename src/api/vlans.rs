//! VLAN API endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{parse_id, with_storage, ApiResult};
use crate::errors::{messages, AppError};
use crate::models::{VlanInput, VlanRecord};
use crate::validation::validate;
use crate::AppState;

/// Decode and validate a JSON body. The Content-Type header is not consulted.
fn read_input(body: &[u8]) -> ApiResult<VlanInput> {
    let input: VlanInput = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        AppError::BadRequest(messages::INVALID_BODY.to_string())
    })?;
    validate(&input)?;
    Ok(input)
}

/// GET /api/v1/vlans - List all VLANs.
pub async fn list_vlans(State(state): State<AppState>) -> ApiResult<Json<Vec<VlanRecord>>> {
    let vlans = with_storage(&state, |storage| storage.get_all())
        .await
        .map_err(|e| AppError::from_storage(e, "Failed to retrieve VLANs"))?;

    Ok(Json(vlans))
}

/// GET /api/v1/vlans/:id - Get a single VLAN.
pub async fn get_vlan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<VlanRecord>> {
    let id = parse_id(&raw_id)?;

    let vlan = with_storage(&state, move |storage| storage.get_by_id(id))
        .await
        .map_err(|e| AppError::from_storage(e, "Failed to retrieve VLAN"))?;

    Ok(Json(vlan))
}

/// POST /api/v1/vlans - Create a new VLAN.
pub async fn create_vlan(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<VlanRecord>)> {
    let input = read_input(&body)?;

    let vlan = with_storage(&state, move |storage| storage.create(&input))
        .await
        .map_err(|e| AppError::from_storage(e, "Failed to create VLAN"))?;

    tracing::info!(id = vlan.id, vlan_id = vlan.vlan_tag, "Created VLAN");
    Ok((StatusCode::CREATED, Json(vlan)))
}

/// PUT /api/v1/vlans/:id - Replace a VLAN's fields.
pub async fn update_vlan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<VlanRecord>> {
    let id = parse_id(&raw_id)?;
    let input = read_input(&body)?;

    let vlan = with_storage(&state, move |storage| storage.update(id, &input))
        .await
        .map_err(|e| AppError::from_storage(e, "Failed to update VLAN"))?;

    tracing::info!(id = vlan.id, vlan_id = vlan.vlan_tag, "Updated VLAN");
    Ok(Json(vlan))
}

/// DELETE /api/v1/vlans/:id - Delete a VLAN.
pub async fn delete_vlan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id)?;

    with_storage(&state, move |storage| storage.delete(id))
        .await
        .map_err(|e| AppError::from_storage(e, "Failed to delete VLAN"))?;

    tracing::info!(id, "Deleted VLAN");
    Ok(StatusCode::NO_CONTENT)
}
