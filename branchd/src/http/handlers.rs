//! Route handlers: listing, CRUD, login, import/export

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use super::error::ApiError;
use crate::excel;
use crate::listing;
use crate::model::{Branch, BranchInput};
use crate::query::ListParams;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if state.verifier.verify(&body.username, &body.password) {
        Ok(Json(json!({
            "success": true,
            "message": "Login successful",
            "user": { "username": body.username },
        })))
    } else {
        Err(ApiError::unauthorized("Invalid credentials"))
    }
}

pub async fn list_branches(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let criteria = params.resolve();
    let listing = listing::list(&state.store, &criteria).await?;
    Ok(Json(listing))
}

pub async fn create_branch(
    State(state): State<AppState>,
    Json(input): Json<BranchInput>,
) -> Result<(StatusCode, Json<Branch>), ApiError> {
    let branch = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

pub async fn update_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<BranchInput>,
) -> Result<Json<Branch>, ApiError> {
    let branch = state.store.replace(&id, input).await?;
    Ok(Json(branch))
}

pub async fn delete_branch(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete(&id).await?;
    Ok(Json(json!({ "message": "Branch deleted successfully" })))
}

/// Bulk import: multipart upload with a `file` part holding the workbook.
/// All-or-nothing: a single bad row fails the batch and nothing is created.
pub async fn import_branches(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<Branch>>), ApiError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            file = Some(bytes);
            break;
        }
    }
    let bytes = file.ok_or_else(|| ApiError::bad_request("no 'file' part in upload"))?;

    let candidates = excel::read_branches_xlsx(&bytes)?;
    let records = excel::validate_candidates(candidates)?;
    let created = state.store.create_many(records).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Export every record in the store as an XLSX attachment (no filter, no
/// pagination, by design)
pub async fn export_branches(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let branches = state.store.fetch_all().await?;
    let bytes = excel::write_branches_xlsx(&branches)?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=branches.xlsx",
            ),
        ],
        bytes,
    ))
}
