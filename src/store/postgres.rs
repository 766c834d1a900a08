//! PostgreSQL-backed store. Every method is one parameterized statement against `<schema>.students`.

use super::StudentStore;
use crate::error::AppError;
use crate::migration::{qualified_table, STUDENTS_EMAIL_CONSTRAINT, STUDENTS_TABLE};
use crate::model::{NewStudent, Student};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, first_name, last_name, email";

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
    table: String,
}

impl PgStudentStore {
    /// `schema` must already be a validated identifier (see [`crate::config::is_valid_identifier`]).
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStudentStore {
            pool,
            table: qualified_table(schema, STUDENTS_TABLE),
        }
    }

    async fn fetch_many(&self, sql: &str, arg: &str) -> Result<Vec<Student>, AppError> {
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(sql)
            .bind(arg)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Only a violation of the email constraint is a `DuplicateEmail`; any other
/// unique violation (e.g. a primary-key clash after an id-preserving import) is a 500.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db)
            if db.is_unique_violation() && db.constraint() == Some(STUDENTS_EMAIL_CONSTRAINT) =>
        {
            AppError::DuplicateEmail
        }
        _ => AppError::Db(e),
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn insert(&self, student: &NewStudent) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO {} (first_name, last_name, email) VALUES ($1, $2, $3) RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, Student>(&sql)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn save(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "UPDATE {} SET first_name = $2, last_name = $3, email = $4 WHERE id = $1 RETURNING {}",
            self.table, COLUMNS
        );
        tracing::debug!(sql = %sql, id = student.id, "query");
        sqlx::query_as::<_, Student>(&sql)
            .bind(student.id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(&student.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE email = $1", COLUMNS, self.table);
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE first_name = $1 ORDER BY id",
            COLUMNS, self.table
        );
        self.fetch_many(&sql, first_name).await
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Student>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE last_name = $1 ORDER BY id",
            COLUMNS, self.table
        );
        self.fetch_many(&sql, last_name).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let exists: (bool,) = sqlx::query_as(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
