//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the password hasher) are implemented by
//! outbound adapters. Driving ports (commands, queries, directories) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_repository;
mod directory;
mod faculty_repository;
mod login_service;
mod password_hasher;
mod registration_command;
mod registration_query;
mod roster_repository;
mod signup_command;
mod store_error;
mod student_repository;

pub use course_repository::CourseRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use directory::{CourseCatalogue, FacultyDirectory, StudentDirectory};
#[cfg(test)]
pub use directory::{MockCourseCatalogue, MockFacultyDirectory, MockStudentDirectory};
#[cfg(test)]
pub use faculty_repository::MockFacultyRepository;
pub use faculty_repository::{FacultyDraft, FacultyRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::{CourseRemoval, Enrollment, RegistrationCommand, StudentRemoval};
#[cfg(test)]
pub use registration_query::MockRegistrationQuery;
pub use registration_query::RegistrationQuery;
#[cfg(test)]
pub use roster_repository::MockRosterRepository;
pub use roster_repository::{RosterChange, RosterRepository, RosterWrite};
#[cfg(test)]
pub use signup_command::MockSignupCommand;
pub use signup_command::{Account, SignupCommand, SignupRequest};
pub use store_error::{StoreError, persistence_failure, write_failure};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentDraft, StudentRepository};
