//! Student server: reads config from the environment, prepares the store, serves the API.
//!
//! Run from repo root: `cargo run -p student-server`
//! Without PostgreSQL: `STUDENT_STORE=memory cargo run -p student-server`

use std::sync::Arc;
use student_service::{
    app, ensure_database_exists, ensure_student_table, AppState, MemoryStudentStore, PgStudentStore,
    ServerConfig, StoreBackend, StudentService, StudentStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("student_service=info,student_server=info,tower_http=info")
            }),
        )
        .init();

    let store: Arc<dyn StudentStore> = match config.store {
        StoreBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_student_table(&pool, &config.schema).await?;
            Arc::new(PgStudentStore::new(pool, &config.schema))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStudentStore::new())
        }
    };

    let state = AppState::new(StudentService::new(store));
    let router = app(state, config.body_limit_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("student server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
