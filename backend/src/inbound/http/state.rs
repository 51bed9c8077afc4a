//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCatalogue, FacultyDirectory, LoginService, RegistrationCommand, RegistrationQuery,
    SignupCommand, StudentDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupCommand>,
    pub students: Arc<dyn StudentDirectory>,
    pub faculty: Arc<dyn FacultyDirectory>,
    pub courses: Arc<dyn CourseCatalogue>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub registration_query: Arc<dyn RegistrationQuery>,
}
