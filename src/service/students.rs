//! Student operations. One store round trip per read; writes check existence first.

use super::StudentValidator;
use crate::error::AppError;
use crate::model::{NewStudent, Student};
use crate::store::StudentStore;
use std::sync::Arc;

/// Stateless façade over the store; cloning shares the same store.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        StudentService { store }
    }

    /// Insert a new student. Fails with `DuplicateEmail` if the email is taken.
    pub async fn create(&self, student: NewStudent) -> Result<Student, AppError> {
        StudentValidator::validate_new(&student)?;
        let created = self.store.insert(&student).await?;
        tracing::info!(id = created.id, "student created");
        Ok(created)
    }

    /// All students, ordered by id.
    pub async fn list(&self) -> Result<Vec<Student>, AppError> {
        self.store.find_all().await
    }

    pub async fn list_by_first_name(&self, first_name: &str) -> Result<Vec<Student>, AppError> {
        self.store.find_by_first_name(first_name).await
    }

    pub async fn list_by_last_name(&self, last_name: &str) -> Result<Vec<Student>, AppError> {
        self.store.find_by_last_name(last_name).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Student, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::student_not_found(id))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Student, AppError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student not found with email: {}", email)))
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.store.find_by_email(email).await?.is_some())
    }

    /// Overwrite every field of an existing student. `NotFound` if the id is unknown,
    /// including when the row disappears between the existence check and the write.
    pub async fn update(&self, student: Student) -> Result<Student, AppError> {
        StudentValidator::validate_existing(&student)?;
        if !self.store.exists_by_id(student.id).await? {
            return Err(AppError::student_not_found(student.id));
        }
        let updated = self
            .store
            .save(&student)
            .await?
            .ok_or_else(|| AppError::student_not_found(student.id))?;
        tracing::info!(id = updated.id, "student updated");
        Ok(updated)
    }

    /// Remove a student permanently. Deleting an unknown id is `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.exists_by_id(id).await? || !self.store.delete_by_id(id).await? {
            return Err(AppError::student_not_found(id));
        }
        tracing::info!(id, "student deleted");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }
}
