use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// Success envelope: `{ "status": <code>, "data": <payload> }`.
#[derive(Debug)]
pub struct Envelope<T> {
    pub status: StatusCode,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let body = json!({ "status": self.status.as_u16(), "data": self.data });
        (self.status, axum::Json(body)).into_response()
    }
}
