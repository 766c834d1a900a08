//! Field checks applied before any write reaches the store.

use crate::error::AppError;
use crate::model::{NewStudent, Student};
use regex::Regex;
use std::sync::OnceLock;

const MAX_LENGTH: usize = 255;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern compiles"))
}

pub struct StudentValidator;

impl StudentValidator {
    pub fn validate_new(student: &NewStudent) -> Result<(), AppError> {
        Self::validate(&student.first_name, &student.last_name, &student.email)
    }

    pub fn validate_existing(student: &Student) -> Result<(), AppError> {
        Self::validate(&student.first_name, &student.last_name, &student.email)
    }

    /// All three fields are required, non-blank, and bounded; `email` must look like an address.
    fn validate(first_name: &str, last_name: &str, email: &str) -> Result<(), AppError> {
        required("firstName", first_name)?;
        required("lastName", last_name)?;
        required("email", email)?;
        if !email_pattern().is_match(email) {
            return Err(AppError::Validation("email must be a valid email".into()));
        }
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_LENGTH
        )));
    }
    Ok(())
}
