//! Persistence boundary for students.
//!
//! Implementations enforce email uniqueness atomically on `insert` and `save` and
//! report a collision as [`AppError::DuplicateEmail`]; callers never inspect messages.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::PgStudentStore;

use crate::error::AppError;
use crate::model::{NewStudent, Student};
use async_trait::async_trait;

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a new row; the store assigns the id.
    async fn insert(&self, student: &NewStudent) -> Result<Student, AppError>;

    /// Overwrite every field of the row with `student.id`. `None` when no such row exists.
    async fn save(&self, student: &Student) -> Result<Option<Student>, AppError>;

    /// All students ordered by id.
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError>;

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Student>, AppError>;

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Student>, AppError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap reachability check used by the readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}
