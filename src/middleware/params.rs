use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;

use crate::db::repository::Pagination;
use crate::error::DartsError;

/// `{id}` path segment of `/darts/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct DartsId(pub i64);

impl<S> FromRequestParts<S> for DartsId
where
    S: Send + Sync,
{
    type Rejection = DartsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| DartsError::Validation(rejection.body_text()))?;
        Ok(Self(id))
    }
}

/// Validated `?page=&limit=` query.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery(pub Pagination);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = DartsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(page) = Query::<Pagination>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| DartsError::Validation(rejection.body_text()))?;
        page.validate()?;
        Ok(Self(page))
    }
}
