//! In-process store for local runs and tests. Ids start at 1 and are never reused.

use super::StudentStore;
use crate::error::AppError;
use crate::model::{NewStudent, Student};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

impl Table {
    fn email_taken(&self, email: &str, except_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|s| s.email == email && Some(s.id) != except_id)
    }

    fn filter<P: Fn(&Student) -> bool>(&self, pred: P) -> Vec<Student> {
        self.rows.values().filter(|s| pred(*s)).cloned().collect()
    }
}

/// Uniqueness checks and writes happen under one write lock, so concurrent
/// inserts with the same email cannot both succeed.
#[derive(Default)]
pub struct MemoryStudentStore {
    table: RwLock<Table>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn insert(&self, student: &NewStudent) -> Result<Student, AppError> {
        let mut table = self.write();
        if table.email_taken(&student.email, None) {
            return Err(AppError::DuplicateEmail);
        }
        table.last_id += 1;
        let row = student.clone().with_id(table.last_id);
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn save(&self, student: &Student) -> Result<Option<Student>, AppError> {
        let mut table = self.write();
        if !table.rows.contains_key(&student.id) {
            return Ok(None);
        }
        if table.email_taken(&student.email, Some(student.id)) {
            return Err(AppError::DuplicateEmail);
        }
        table.rows.insert(student.id, student.clone());
        Ok(Some(student.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.read().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        Ok(self.read().rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        Ok(self.read().rows.values().find(|s| s.email == email).cloned())
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Student>, AppError> {
        Ok(self.read().filter(|s| s.first_name == first_name))
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Student>, AppError> {
        Ok(self.read().filter(|s| s.last_name == last_name))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.read().rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write().rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
