//! StudentService: business rules over a [`crate::store::StudentStore`].

mod students;
mod validation;
pub use students::StudentService;
pub use validation::StudentValidator;
