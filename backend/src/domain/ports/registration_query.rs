//! Driving port for registration reads.

use async_trait::async_trait;

use crate::domain::{CourseId, CourseSummary, Error, RosterStatus, StudentId};

/// Read-only registration views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationQuery: Send + Sync {
    /// Courses a student is registered for, in registration order.
    async fn registered_courses(&self, student: StudentId) -> Result<Vec<CourseSummary>, Error>;

    /// Capacity and roster of a course.
    async fn roster_status(&self, course: CourseId) -> Result<RosterStatus, Error>;
}
