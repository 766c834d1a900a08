//! Route tables: common health routes plus the student resource.

pub mod common;
pub mod students;

pub use common::common_routes;
pub use students::{student_routes, StudentRoute, STUDENTS_PATH};
