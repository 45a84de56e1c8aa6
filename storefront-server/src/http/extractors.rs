//! Custom Axum extractors
//!
//! Both reject with `ApiError::Validation` so every malformed input is a
//! 400 with the usual JSON error body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::{ProductId, ValidationError};

/// Extract and validate a product id from path
pub struct ValidProductId(pub ProductId);

impl<S> FromRequestParts<S> for ValidProductId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = ProductId::parse(&id)?;
        Ok(Self(id))
    }
}

/// JSON body whose decode failures become validation errors
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(status = %rejection.status(), "rejected request body");
            ApiError::Validation(ValidationError::MalformedBody {
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}
