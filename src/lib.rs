//! Student service: CRUD REST backend for student records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use migration::{ensure_database_exists, ensure_student_table};
pub use model::{NewStudent, Student};
pub use routes::{common_routes, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{MemoryStudentStore, PgStudentStore, StudentStore};

use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application router: health routes plus `/students`, with request tracing and a body size cap.
/// The cap is enforced while the body is buffered, so an oversized request surfaces as a
/// 413 `{"error": ...}` whether or not it declares a `Content-Length`.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(student_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit_bytes)),
        )
}
