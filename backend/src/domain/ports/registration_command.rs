//! Driving port for the registration workflow.
//!
//! Every operation here mutates both sides of a membership and commits them
//! together, so a student's registered courses and a course's enrolled
//! students never disagree.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Course, CourseId, Error, Student, StudentId};

/// Both records after a registration change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    /// The student after the change.
    pub student: Student,
    /// The course after the change.
    pub course: Course,
}

/// Outcome of deleting a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRemoval {
    /// The deleted course.
    pub course: CourseId,
    /// Students whose registration was released.
    pub released_students: Vec<StudentId>,
    /// Enrolled ids that no longer resolved to a student.
    pub skipped_students: Vec<StudentId>,
}

/// Outcome of deleting a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRemoval {
    /// The deleted student.
    pub student: StudentId,
    /// Courses the student was removed from.
    pub released_courses: Vec<CourseId>,
    /// Registered ids that no longer resolved to a course.
    pub skipped_courses: Vec<CourseId>,
}

/// Registration use-cases that change state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationCommand: Send + Sync {
    /// Enroll a student in a course.
    ///
    /// # Errors
    ///
    /// Checked in order: missing student, missing course, existing
    /// membership, full course, exceeded credit limit. Losing every retry
    /// against concurrent writers yields `concurrent_modification`.
    async fn register(&self, student: StudentId, course: CourseId) -> Result<Enrollment, Error>;

    /// Withdraw a student from a course.
    async fn deregister(&self, student: StudentId, course: CourseId)
    -> Result<Enrollment, Error>;

    /// Delete a course and release every enrolled student.
    async fn cascade_remove_course(&self, course: CourseId) -> Result<CourseRemoval, Error>;

    /// Delete a student and remove them from every roster.
    async fn cascade_remove_student(&self, student: StudentId) -> Result<StudentRemoval, Error>;
}
