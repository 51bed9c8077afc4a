//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed records of the registrar (students,
//! faculty, courses) and the services enforcing the registration rules.
//! Adapters reach persistence and hashing only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - Student / Course / Faculty: records and their validated inputs.
//! - RegistrationService: the register/deregister/cascade engine.
//! - DirectoryService / AccountService: record maintenance and accounts.

pub mod account_service;
pub mod auth;
pub mod course;
pub mod directory_service;
pub mod error;
pub mod faculty;
pub mod identity;
pub mod ports;
pub mod profile;
pub mod registration;
pub mod student;
pub mod trace_id;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialHash, CredentialValidationError, LoginCredentials, PASSWORD_MIN_LEN, Password,
    Principal, Role,
};
pub use self::course::{Course, CourseDetails, CourseSummary, CourseValidationError, RosterStatus};
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::faculty::Faculty;
pub use self::identity::{CourseId, FacultyId, StudentId};
pub use self::profile::{FacultyProfile, ProfileValidationError, StudentProfile, normalise_email};
pub use self::registration::{MAX_COMMIT_ATTEMPTS, RegistrationError, RegistrationService};
pub use self::student::{CREDIT_LIMIT, Student};
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use registrar::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
