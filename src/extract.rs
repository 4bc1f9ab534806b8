use axum::body::Bytes;
use axum::extract::{
    FromRequest, FromRequestParts, OptionalFromRequestParts, Path, Query, Request,
};
use axum::http::request::Parts;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::ProjectPayload;

#[derive(Deserialize)]
struct SaveProjectRequest {
    project: Option<ProjectPayload>,
}

/// The `project` field of a create/update body.
///
/// An empty body, a missing field and `"project": null` all yield `None`,
/// so handlers decide how to report absence. Malformed JSON is rejected.
#[derive(Debug)]
pub struct ProjectBody(pub Option<ProjectPayload>);

impl<S> FromRequest<S> for ProjectBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::rejected(e.status(), e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProjectBody(None));
        }

        let req: SaveProjectRequest = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
        Ok(ProjectBody(req.project))
    }
}

/// The `{project_id}` path segment, `None` on routes without one.
#[derive(Debug)]
pub struct ProjectId(pub Option<String>);

impl<S> FromRequestParts<S> for ProjectId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path =
            <Path<String> as OptionalFromRequestParts<S>>::from_request_parts(parts, state).await?;
        Ok(ProjectId(path.map(|Path(raw)| raw)))
    }
}

/// `Query` with rejections rendered as `AppError`.
#[derive(Debug)]
pub struct ListQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(ListQuery(value))
    }
}
