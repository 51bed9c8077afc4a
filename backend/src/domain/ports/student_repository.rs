//! Port abstraction for student persistence.

use async_trait::async_trait;

use crate::domain::{CredentialHash, Student, StudentId, StudentProfile};

use super::StoreError;

/// Everything needed to create a student except the identifier, which the
/// store allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    /// Validated personal details.
    pub profile: StudentProfile,
    /// Hashed password.
    pub credential: CredentialHash,
}

/// Identity store for students.
///
/// Implementations must allocate identifiers in increasing order starting at
/// 1, never reissue the identifier of a deleted student, and enforce email
/// uniqueness in the same step, so concurrent signups cannot collide. A
/// session names its student by identifier alone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Fetch a student by identifier.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StoreError>;

    /// Fetch a student by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StoreError>;

    /// All students ordered by identifier.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// Allocate an identifier and store a new student.
    ///
    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn create(&self, draft: StudentDraft) -> Result<Student, StoreError>;

    /// Replace a student's record if its stored revision equals
    /// `expected_revision`.
    async fn update(&self, student: &Student, expected_revision: u64) -> Result<(), StoreError>;
}
