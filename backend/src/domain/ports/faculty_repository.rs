//! Port abstraction for faculty persistence.

use async_trait::async_trait;

use crate::domain::{CredentialHash, Faculty, FacultyId, FacultyProfile};

use super::StoreError;

/// Everything needed to create a faculty member except the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyDraft {
    /// Validated personal details.
    pub profile: FacultyProfile,
    /// Hashed password.
    pub credential: CredentialHash,
}

/// Identity store for faculty members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FacultyRepository: Send + Sync {
    /// Fetch a faculty member by identifier.
    async fn find_by_id(&self, id: FacultyId) -> Result<Option<Faculty>, StoreError>;

    /// Fetch a faculty member by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Faculty>, StoreError>;

    /// All faculty ordered by identifier.
    async fn list(&self) -> Result<Vec<Faculty>, StoreError>;

    /// Allocate a never-before-issued identifier and store a new faculty
    /// member.
    async fn create(&self, draft: FacultyDraft) -> Result<Faculty, StoreError>;

    /// Replace a record if its stored revision equals `expected_revision`.
    async fn update(&self, faculty: &Faculty, expected_revision: u64) -> Result<(), StoreError>;

    /// Remove a faculty member. Returns `false` when nothing was removed.
    async fn delete(&self, id: FacultyId) -> Result<bool, StoreError>;
}
