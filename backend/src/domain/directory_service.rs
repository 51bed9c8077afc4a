//! Record maintenance for students, faculty, and courses.
//!
//! Implements the directory driving ports. Edits re-read and retry on stale
//! revisions the same way the registration engine does, since a roster
//! change may bump a record between the read and the write. Deletes of
//! students and courses hand over to [`RegistrationCommand`] so rosters and
//! registrations are released in the same commit as the delete.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CourseCatalogue, CourseRemoval, CourseRepository, FacultyDirectory, FacultyRepository,
    RegistrationCommand, StudentDirectory, StudentRemoval, StudentRepository,
    persistence_failure, write_failure,
};
use crate::domain::{
    Course, CourseDetails, CourseId, Error, Faculty, FacultyId, FacultyProfile,
    MAX_COMMIT_ATTEMPTS, Student, StudentId, StudentProfile,
};

fn contention(entity: &str, id: u64) -> Error {
    Error::rule_conflict(
        format!("{entity} {id} kept changing; try again"),
        "concurrent_modification",
        json!({ "attempts": MAX_COMMIT_ATTEMPTS }),
    )
}

/// Directory service implementing the record maintenance ports.
pub struct DirectoryService<S, F, C> {
    students: Arc<S>,
    faculty: Arc<F>,
    courses: Arc<C>,
    registration: Arc<dyn RegistrationCommand>,
}

impl<S, F, C> Clone for DirectoryService<S, F, C> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
            faculty: Arc::clone(&self.faculty),
            courses: Arc::clone(&self.courses),
            registration: Arc::clone(&self.registration),
        }
    }
}

impl<S, F, C> DirectoryService<S, F, C> {
    /// Create a new service with the given stores and cascade handler.
    pub fn new(
        students: Arc<S>,
        faculty: Arc<F>,
        courses: Arc<C>,
        registration: Arc<dyn RegistrationCommand>,
    ) -> Self {
        Self {
            students,
            faculty,
            courses,
            registration,
        }
    }
}

impl<S, F, C> DirectoryService<S, F, C>
where
    S: StudentRepository,
    F: FacultyRepository,
    C: CourseRepository,
{
    async fn load_student(&self, id: StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(id)
            .await
            .map_err(persistence_failure)?
            .ok_or_else(|| Error::record_not_found(StudentId::label(), id.get()))
    }

    async fn load_faculty(&self, id: FacultyId) -> Result<Faculty, Error> {
        self.faculty
            .find_by_id(id)
            .await
            .map_err(persistence_failure)?
            .ok_or_else(|| Error::record_not_found(FacultyId::label(), id.get()))
    }

    async fn load_course(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(persistence_failure)?
            .ok_or_else(|| Error::record_not_found(CourseId::label(), id.get()))
    }
}

/// Reject course edits that would break roster or credit consistency.
fn check_course_edit(course: &Course, details: &CourseDetails) -> Result<(), Error> {
    let enrolled = course.enrolled_count();
    if details.max_students() < enrolled {
        return Err(Error::rule_conflict(
            format!(
                "course {} has {enrolled} students enrolled; capacity cannot drop to {}",
                course.id(),
                details.max_students()
            ),
            "capacity_below_enrollment",
            json!({ "enrolledCount": enrolled, "maxStudents": details.max_students() }),
        ));
    }
    if enrolled > 0 && details.credit_points() != course.credit_points() {
        return Err(Error::rule_conflict(
            format!(
                "course {} has students enrolled; credit points are locked",
                course.id()
            ),
            "credit_points_locked",
            json!({ "enrolledCount": enrolled, "creditPoints": course.credit_points() }),
        ));
    }
    Ok(())
}

#[async_trait]
impl<S, F, C> StudentDirectory for DirectoryService<S, F, C>
where
    S: StudentRepository,
    F: FacultyRepository,
    C: CourseRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.students.list().await.map_err(persistence_failure)
    }

    async fn student(&self, id: StudentId) -> Result<Student, Error> {
        self.load_student(id).await
    }

    async fn update_student(
        &self,
        id: StudentId,
        profile: StudentProfile,
    ) -> Result<Student, Error> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let mut student = self.load_student(id).await?;
            let expected = student.revision();
            student.apply_profile(profile.clone());
            match self.students.update(&student, expected).await {
                Ok(()) => {
                    info!(student_id = %id, "student updated");
                    return Ok(student);
                }
                Err(err) if err.is_retryable() => {
                    debug!(student_id = %id, attempt, "student update raced; retrying");
                }
                Err(err) => return Err(write_failure(err)),
            }
        }
        Err(contention(StudentId::label(), id.get()))
    }

    async fn delete_student(&self, id: StudentId) -> Result<StudentRemoval, Error> {
        self.registration.cascade_remove_student(id).await
    }
}

#[async_trait]
impl<S, F, C> FacultyDirectory for DirectoryService<S, F, C>
where
    S: StudentRepository,
    F: FacultyRepository,
    C: CourseRepository,
{
    async fn list_faculty(&self) -> Result<Vec<Faculty>, Error> {
        self.faculty.list().await.map_err(persistence_failure)
    }

    async fn faculty(&self, id: FacultyId) -> Result<Faculty, Error> {
        self.load_faculty(id).await
    }

    async fn update_faculty(
        &self,
        id: FacultyId,
        profile: FacultyProfile,
    ) -> Result<Faculty, Error> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let mut member = self.load_faculty(id).await?;
            let expected = member.revision();
            member.apply_profile(profile.clone());
            match self.faculty.update(&member, expected).await {
                Ok(()) => {
                    info!(faculty_id = %id, "faculty updated");
                    return Ok(member);
                }
                Err(err) if err.is_retryable() => {
                    debug!(faculty_id = %id, attempt, "faculty update raced; retrying");
                }
                Err(err) => return Err(write_failure(err)),
            }
        }
        Err(contention(FacultyId::label(), id.get()))
    }

    async fn delete_faculty(&self, id: FacultyId) -> Result<(), Error> {
        let removed = self.faculty.delete(id).await.map_err(persistence_failure)?;
        if !removed {
            return Err(Error::record_not_found(FacultyId::label(), id.get()));
        }
        info!(faculty_id = %id, "faculty deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, F, C> CourseCatalogue for DirectoryService<S, F, C>
where
    S: StudentRepository,
    F: FacultyRepository,
    C: CourseRepository,
{
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        self.courses.list().await.map_err(persistence_failure)
    }

    async fn course(&self, id: CourseId) -> Result<Course, Error> {
        self.load_course(id).await
    }

    async fn create_course(&self, details: CourseDetails) -> Result<Course, Error> {
        let course = self.courses.create(details).await.map_err(write_failure)?;
        info!(course_id = %course.id(), "course created");
        Ok(course)
    }

    async fn update_course(&self, id: CourseId, details: CourseDetails) -> Result<Course, Error> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let mut course = self.load_course(id).await?;
            check_course_edit(&course, &details)?;
            let expected = course.revision();
            course.apply_details(details.clone());
            match self.courses.update(&course, expected).await {
                Ok(()) => {
                    info!(course_id = %id, "course updated");
                    return Ok(course);
                }
                Err(err) if err.is_retryable() => {
                    debug!(course_id = %id, attempt, "course update raced; retrying");
                }
                Err(err) => return Err(write_failure(err)),
            }
        }
        Err(contention(CourseId::label(), id.get()))
    }

    async fn delete_course(&self, id: CourseId) -> Result<CourseRemoval, Error> {
        self.registration.cascade_remove_course(id).await
    }
}

#[cfg(test)]
mod tests;
