//! Shared application state for all routes.

use crate::service::StudentService;

#[derive(Clone)]
pub struct AppState {
    pub service: StudentService,
}

impl AppState {
    pub fn new(service: StudentService) -> Self {
        AppState { service }
    }
}
