//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::model::{NewStudent, Student};
use crate::response::{created, ok};
use crate::service::StudentService;
use axum::{body::Bytes, http::StatusCode, response::IntoResponse};
use serde::Deserialize;

/// Optional filters on `GET /students`. `email` wins over the name filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

fn parse_body(body: &[u8]) -> Result<NewStudent, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid student body: {}", e)))
}

async fn filtered(service: &StudentService, params: ListParams) -> Result<Vec<Student>, AppError> {
    if let Some(email) = params.email {
        return match service.get_by_email(&email).await {
            Ok(s) => Ok(vec![s]),
            Err(AppError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        };
    }
    match (params.first_name, params.last_name) {
        (Some(first), Some(last)) => Ok(service
            .list_by_first_name(&first)
            .await?
            .into_iter()
            .filter(|s| s.last_name == last)
            .collect()),
        (Some(first), None) => service.list_by_first_name(&first).await,
        (None, Some(last)) => service.list_by_last_name(&last).await,
        (None, None) => service.list().await,
    }
}

pub async fn list(
    service: &StudentService,
    params: ListParams,
) -> Result<impl IntoResponse, AppError> {
    let rows = filtered(service, params).await?;
    Ok(ok(rows))
}

pub async fn read(service: &StudentService, id: i64) -> Result<impl IntoResponse, AppError> {
    let student = service.get_by_id(id).await?;
    Ok(ok(student))
}

pub async fn create(service: &StudentService, body: Bytes) -> Result<impl IntoResponse, AppError> {
    let student = parse_body(&body)?;
    let row = service.create(student).await?;
    Ok(created(row))
}

/// The path id always wins over any id in the body.
pub async fn update(
    service: &StudentService,
    id: i64,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let student = parse_body(&body)?.with_id(id);
    let row = service.update(student).await?;
    Ok(ok(row))
}

pub async fn delete(service: &StudentService, id: i64) -> Result<impl IntoResponse, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
