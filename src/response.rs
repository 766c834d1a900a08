//! Response bodies shared by handlers and the error mapping.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
