//! Medicine Catalog Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Medicine, MedicineCreate, MedicineUpdate};
use crate::db::repository::{MedicineRepository, RepoError};
use crate::utils::{AppError, AppResult};

const MSG_CREATED: &str = "تم اضافة الدواء بنجاح";
const MSG_UPDATED: &str = "تم تحديث الدواء بنجاح";
const MSG_DELETED: &str = "تم حذف الدواء بنجاح";
const MSG_NOT_FOUND: &str = "الدواء غير موجود";
const MSG_DELETE_FAILED: &str = "حدث خطأ أثناء حذف الدواء";

#[derive(Debug, Serialize)]
pub struct MedicineResponse {
    pub success: bool,
    pub message: &'static str,
    pub medicine: Medicine,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /medicines - full catalog snapshot, no pagination
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Medicine>> {
    let repo = MedicineRepository::new(state.store.clone());
    Json(repo.find_all())
}

/// POST /medicines - admin adds a medicine, optionally with an inline
/// base64 image payload
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MedicineCreate>,
) -> AppResult<(StatusCode, Json<MedicineResponse>)> {
    let repo = MedicineRepository::new(state.store.clone());
    let medicine = repo
        .create(payload)
        .map_err(|e| AppError::internal(e.to_string()))?;
    tracing::info!(id = medicine.id, name = %medicine.name, "Medicine added");

    Ok((
        StatusCode::CREATED,
        Json(MedicineResponse {
            success: true,
            message: MSG_CREATED,
            medicine,
        }),
    ))
}

/// PUT /medicines/{id} - shallow merge of the permitted fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(patch): Json<MedicineUpdate>,
) -> AppResult<Json<MedicineResponse>> {
    let repo = MedicineRepository::new(state.store.clone());
    let medicine = repo.update(id, patch).map_err(|e| match e {
        RepoError::NotFound(_) => AppError::not_found(MSG_NOT_FOUND),
        other => AppError::internal(other.to_string()),
    })?;

    Ok(Json(MedicineResponse {
        success: true,
        message: MSG_UPDATED,
        medicine,
    }))
}

/// DELETE /medicines/{id} - no cascade into existing orders
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = MedicineRepository::new(state.store.clone());
    repo.delete(id).map_err(|e| match e {
        RepoError::NotFound(_) => AppError::not_found(MSG_NOT_FOUND),
        other => {
            tracing::error!(id, error = %other, "Failed to delete medicine");
            AppError::internal(MSG_DELETE_FAILED)
        }
    })?;

    Ok(Json(DeleteResponse {
        message: MSG_DELETED,
    }))
}
