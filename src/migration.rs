//! Database bootstrap: create the target database and the `students` table if missing.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

pub const STUDENTS_TABLE: &str = "students";
/// Name of the UNIQUE(email) constraint; the Postgres store keys 409s off it.
pub const STUDENTS_EMAIL_CONSTRAINT: &str = "students_email_key";

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Schema-qualified, quoted table name (e.g. `"public"."students"`).
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Create `schema` and the students table. Idempotent; safe to call on every start.
pub async fn ensure_student_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;

    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            CONSTRAINT {} UNIQUE (email)
        )
        "#,
        qualified_table(schema, STUDENTS_TABLE),
        quote_ident(STUDENTS_EMAIL_CONSTRAINT)
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!(schema, table = STUDENTS_TABLE, "students table ready");
    Ok(())
}

/// Ensure the database named in `database_url` exists, connecting to the `postgres`
/// maintenance database to create it. Call before building the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, target) = admin_target(database_url)?;
    let db_name = match target {
        Some(name) if name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

/// Returns (options pointing at the `postgres` database, decoded target database name).
fn admin_target(url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let target = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), target))
}
