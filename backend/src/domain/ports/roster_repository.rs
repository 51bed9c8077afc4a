//! Atomic multi-record writes for registration flows.
//!
//! A registration touches a student and a course; a cascade touches one
//! record and every counterpart it references. [`RosterChange`] collects
//! those writes together with the revision each was read at, and
//! [`RosterRepository::commit`] applies them all or none.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Student, StudentId};

use super::StoreError;

/// One write inside a [`RosterChange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterWrite {
    /// Replace a student record.
    PutStudent { student: Student, expected: u64 },
    /// Replace a course record.
    PutCourse { course: Course, expected: u64 },
    /// Delete a student record.
    RemoveStudent { id: StudentId, expected: u64 },
    /// Delete a course record.
    RemoveCourse { id: CourseId, expected: u64 },
}

/// Ordered batch of writes with optimistic revision checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterChange {
    writes: Vec<RosterWrite>,
}

impl RosterChange {
    /// Start an empty change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `student`, provided the stored copy is still at `expected`.
    #[must_use]
    pub fn put_student(mut self, student: Student, expected: u64) -> Self {
        self.writes.push(RosterWrite::PutStudent { student, expected });
        self
    }

    /// Replace `course`, provided the stored copy is still at `expected`.
    #[must_use]
    pub fn put_course(mut self, course: Course, expected: u64) -> Self {
        self.writes.push(RosterWrite::PutCourse { course, expected });
        self
    }

    /// Delete a student, provided the stored copy is still at `expected`.
    #[must_use]
    pub fn remove_student(mut self, id: StudentId, expected: u64) -> Self {
        self.writes.push(RosterWrite::RemoveStudent { id, expected });
        self
    }

    /// Delete a course, provided the stored copy is still at `expected`.
    #[must_use]
    pub fn remove_course(mut self, id: CourseId, expected: u64) -> Self {
        self.writes.push(RosterWrite::RemoveCourse { id, expected });
        self
    }

    /// Writes in the order they were added.
    pub fn writes(&self) -> &[RosterWrite] {
        &self.writes
    }
}

/// Transactional commit over students and courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Apply every write in `change` or none of them.
    ///
    /// Implementations must check every expected revision before applying
    /// anything and fail with [`StoreError::RevisionMismatch`] or
    /// [`StoreError::Missing`] without side effects.
    async fn commit(&self, change: RosterChange) -> Result<(), StoreError>;
}
