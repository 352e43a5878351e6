use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::db::models::Validate;
use crate::error::DartsError;

/// JSON body that is deserialized and then checked with [`Validate`].
/// Malformed bodies and missing required keys surface as
/// `DartsError::Validation` instead of axum's plain-text rejection.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = DartsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| DartsError::Validation(rejection.body_text()))?;
        body.validate()?;
        Ok(Self(body))
    }
}
