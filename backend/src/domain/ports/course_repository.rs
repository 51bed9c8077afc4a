//! Port abstraction for course persistence.

use async_trait::async_trait;

use crate::domain::{Course, CourseDetails, CourseId};

use super::StoreError;

/// Course store.
///
/// Roster changes never go through [`CourseRepository::update`]; they are
/// committed together with the affected students via
/// [`super::RosterRepository`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fetch a course by identifier.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, StoreError>;

    /// Fetch every course in `ids` that exists, in the order given.
    async fn find_many(&self, ids: &[CourseId]) -> Result<Vec<Course>, StoreError>;

    /// All courses ordered by identifier.
    async fn list(&self) -> Result<Vec<Course>, StoreError>;

    /// Allocate an identifier and store a new course.
    async fn create(&self, details: CourseDetails) -> Result<Course, StoreError>;

    /// Replace a course's descriptive fields if its stored revision equals
    /// `expected_revision`.
    async fn update(&self, course: &Course, expected_revision: u64) -> Result<(), StoreError>;
}
