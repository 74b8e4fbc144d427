//! Custom Axum extractors

use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Form;
use gigbook_core::{FormData, ValidationError};

use super::error::ApiError;

/// Numeric record id from the path.
///
/// Anything that isn't a positive integer can't name a record, so it is
/// rejected as not found rather than as a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let requested = parts.uri.path().to_owned();
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("page", &requested))?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(ApiError::not_found("page", requested)),
        }
    }
}

/// Urlencoded form body.
///
/// A body that can't be read as a form (wrong content type, bad encoding)
/// is a rejected submission, rendered like any other validation failure.
#[derive(Debug, Clone)]
pub struct Submitted(pub FormData);

impl<S> FromRequest<S> for Submitted
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(form) = Form::<FormData>::from_request(req, state)
            .await
            .map_err(form_rejection)?;
        Ok(Self(form))
    }
}

fn form_rejection(rejection: FormRejection) -> ApiError {
    tracing::debug!("form rejected: {}", rejection);
    let reason = match rejection {
        FormRejection::InvalidFormContentType(_) => {
            "must be sent as application/x-www-form-urlencoded"
        }
        _ => "could not be decoded",
    };
    ApiError::Validation(ValidationError::InvalidFormat { field: "form", reason }.into())
}
