use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::db::models::{DartsInput, DartsPatch, DartsRecord, DartsUpdate};
use crate::db::repository::DartsRepository;
use crate::middleware::json_body::ValidatedJson;
use crate::middleware::params::{DartsId, PageQuery};
use crate::{DartsError, router::DartsState};

/// Body of a successful `DELETE /darts/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub detail: String,
}

/// GET /darts?page=&limit= -> records ordered by id.
pub async fn list_darts<R: DartsRepository>(
    State(state): State<DartsState<R>>,
    PageQuery(page): PageQuery,
) -> Result<Json<Vec<DartsRecord>>, DartsError> {
    let records = state.repo.list(page).await?;
    Ok(Json(records))
}

/// POST /darts
pub async fn create_darts<R: DartsRepository>(
    State(state): State<DartsState<R>>,
    ValidatedJson(input): ValidatedJson<DartsInput>,
) -> Result<(StatusCode, Json<DartsRecord>), DartsError> {
    let record = state.repo.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /darts/{id}
pub async fn get_darts<R: DartsRepository>(
    State(state): State<DartsState<R>>,
    DartsId(id): DartsId,
) -> Result<Json<DartsRecord>, DartsError> {
    Ok(Json(state.repo.get_by_id(id).await?))
}

/// PUT /darts/{id} -> full replace; omitted optional fields become null.
pub async fn replace_darts<R: DartsRepository>(
    State(state): State<DartsState<R>>,
    DartsId(id): DartsId,
    ValidatedJson(input): ValidatedJson<DartsInput>,
) -> Result<Json<DartsRecord>, DartsError> {
    let record = state.repo.update(id, DartsUpdate::Replace(input)).await?;
    Ok(Json(record))
}

/// PATCH /darts/{id} -> only keys present in the body are written.
pub async fn patch_darts<R: DartsRepository>(
    State(state): State<DartsState<R>>,
    DartsId(id): DartsId,
    ValidatedJson(patch): ValidatedJson<DartsPatch>,
) -> Result<Json<DartsRecord>, DartsError> {
    let record = state.repo.update(id, DartsUpdate::Patch(patch)).await?;
    Ok(Json(record))
}

/// DELETE /darts/{id}
pub async fn delete_darts<R: DartsRepository>(
    State(state): State<DartsState<R>>,
    DartsId(id): DartsId,
) -> Result<Json<DeleteResponse>, DartsError> {
    state.repo.delete(id).await?;
    Ok(Json(DeleteResponse {
        detail: format!("darts with id {id} deleted successfully"),
    }))
}
