//! Student routes. Verb + path are demultiplexed here rather than by the axum
//! router so every malformed shape under `/students` gets a 400, not a 404.

use crate::error::AppError;
use crate::handlers::students::{self, ListParams};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

pub const STUDENTS_PATH: &str = "/students";

/// One parsed student request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentRoute {
    List,
    Create,
    Read(i64),
    Update(i64),
    Delete(i64),
}

impl StudentRoute {
    /// Split everything after `/students` on `/`, dropping empty segments. No segment
    /// addresses the collection; exactly one must be a numeric id; more is a bad path.
    pub fn parse(method: &Method, path: &str) -> Result<Self, AppError> {
        let rest = path
            .strip_prefix(STUDENTS_PATH)
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .ok_or_else(|| AppError::NotFound(format!("no route for {}", path)))?;
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => match *method {
                Method::GET | Method::HEAD => Ok(StudentRoute::List),
                Method::POST => Ok(StudentRoute::Create),
                _ => Err(AppError::MethodNotAllowed),
            },
            [segment] => {
                let id: i64 = segment
                    .parse()
                    .map_err(|_| AppError::BadRequest("Invalid ID format".into()))?;
                match *method {
                    Method::GET | Method::HEAD => Ok(StudentRoute::Read(id)),
                    Method::PUT => Ok(StudentRoute::Update(id)),
                    Method::DELETE => Ok(StudentRoute::Delete(id)),
                    _ => Err(AppError::MethodNotAllowed),
                }
            }
            _ => Err(AppError::BadRequest("Invalid path".into())),
        }
    }
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let route = StudentRoute::parse(&method, uri.path())?;
    let body = body?;
    tracing::debug!(?route, "student request");
    let service = &state.service;
    let response = match route {
        StudentRoute::List => {
            let Query(params) = Query::<ListParams>::try_from_uri(&uri)
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            students::list(service, params).await?.into_response()
        }
        StudentRoute::Create => students::create(service, body).await?.into_response(),
        StudentRoute::Read(id) => students::read(service, id).await?.into_response(),
        StudentRoute::Update(id) => students::update(service, id, body).await?.into_response(),
        StudentRoute::Delete(id) => students::delete(service, id).await?.into_response(),
    };
    Ok(response)
}

/// `/students`, `/students/` and everything below, all through [`StudentRoute::parse`].
pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route(STUDENTS_PATH, any(dispatch))
        .route("/students/", any(dispatch))
        .route("/students/*rest", any(dispatch))
        .with_state(state)
}
