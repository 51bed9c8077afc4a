//! Driving ports for record maintenance.
//!
//! Creation of student and faculty accounts goes through
//! [`super::SignupCommand`]; these ports cover reads, edits, and deletes.

use async_trait::async_trait;

use crate::domain::{
    Course, CourseDetails, CourseId, Error, Faculty, FacultyId, FacultyProfile, Student,
    StudentId, StudentProfile,
};

use super::{CourseRemoval, StudentRemoval};

/// Student record maintenance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// All students.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;

    /// One student, or `NotFound`.
    async fn student(&self, id: StudentId) -> Result<Student, Error>;

    /// Replace a student's personal details. Membership is untouched.
    async fn update_student(&self, id: StudentId, profile: StudentProfile)
    -> Result<Student, Error>;

    /// Delete a student and release their registrations.
    async fn delete_student(&self, id: StudentId) -> Result<StudentRemoval, Error>;
}

/// Faculty record maintenance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FacultyDirectory: Send + Sync {
    /// All faculty.
    async fn list_faculty(&self) -> Result<Vec<Faculty>, Error>;

    /// One faculty member, or `NotFound`.
    async fn faculty(&self, id: FacultyId) -> Result<Faculty, Error>;

    /// Replace a faculty member's personal details.
    async fn update_faculty(&self, id: FacultyId, profile: FacultyProfile)
    -> Result<Faculty, Error>;

    /// Delete a faculty member.
    async fn delete_faculty(&self, id: FacultyId) -> Result<(), Error>;
}

/// Course record maintenance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogue: Send + Sync {
    /// All courses.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// One course, or `NotFound`.
    async fn course(&self, id: CourseId) -> Result<Course, Error>;

    /// Store a new course with an empty roster.
    async fn create_course(&self, details: CourseDetails) -> Result<Course, Error>;

    /// Replace a course's descriptive fields.
    ///
    /// Fails with `Conflict` when `maxStudents` would drop below the
    /// enrolled count or `creditPoints` would change while students are
    /// enrolled.
    async fn update_course(&self, id: CourseId, details: CourseDetails) -> Result<Course, Error>;

    /// Delete a course and release every enrolled student.
    async fn delete_course(&self, id: CourseId) -> Result<CourseRemoval, Error>;
}
