//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, Faculty, FacultyProfile, Password, Principal, Student, StudentProfile};

/// Validated signup payload for either role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupRequest {
    /// Create a student account.
    Student {
        /// Personal details.
        profile: StudentProfile,
        /// Plaintext password, hashed before storage.
        password: Password,
    },
    /// Create a faculty account.
    Faculty {
        /// Personal details.
        profile: FacultyProfile,
        /// Plaintext password, hashed before storage.
        password: Password,
    },
}

/// Newly created account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    /// A student record.
    Student(Student),
    /// A faculty record.
    Faculty(Faculty),
}

impl Account {
    /// Principal a session would carry for this account.
    pub fn principal(&self) -> Principal {
        match self {
            Self::Student(student) => Principal::Student(student.id()),
            Self::Faculty(faculty) => Principal::Faculty(faculty.id()),
        }
    }
}

/// Creates accounts for students and faculty.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Hash the password, allocate an identifier, and store the record.
    ///
    /// Fails with `Conflict` (`email_taken`) when the email already belongs
    /// to an account of the same role.
    async fn signup(&self, request: SignupRequest) -> Result<Account, Error>;
}
