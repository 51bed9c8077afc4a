//! Registration engine.
//!
//! Binds students to courses under the capacity and credit rules and keeps
//! both sides of every membership in step. Each operation reads the records
//! it needs, validates against that snapshot, and commits every touched
//! record through [`RosterRepository::commit`] with the revisions it read. A
//! stale revision means another writer interleaved; the operation then
//! starts over from a fresh read, so the outcome matches some serial order.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CourseRemoval, CourseRepository, Enrollment, RegistrationCommand, RegistrationQuery,
    RosterChange, RosterRepository, StoreError, StudentRemoval, StudentRepository,
    persistence_failure,
};
use crate::domain::{
    CREDIT_LIMIT, Course, CourseId, CourseSummary, Error, RosterStatus, Student, StudentId,
};

/// Commit attempts per operation before giving up on concurrent writers.
pub const MAX_COMMIT_ATTEMPTS: usize = 8;

/// Rule and persistence failures raised by the registration engine.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum RegistrationError {
    /// No student with this identifier exists.
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    /// No course with this identifier exists.
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    /// The membership already exists on at least one side.
    #[error("student {student} is already registered for course {course}")]
    AlreadyRegistered {
        /// Student identifier.
        student: StudentId,
        /// Course identifier.
        course: CourseId,
    },
    /// The membership exists on neither side.
    #[error("student {student} is not registered for course {course}")]
    NotRegistered {
        /// Student identifier.
        student: StudentId,
        /// Course identifier.
        course: CourseId,
    },
    /// The roster has reached capacity.
    #[error("course {course} is full ({max_students} seats)")]
    CourseFull {
        /// Course identifier.
        course: CourseId,
        /// Capacity of the course.
        max_students: u32,
    },
    /// Registering would push the student over the credit cap.
    #[error("registering adds {course_points} credits to {current}, above the limit of {limit}")]
    CreditLimitExceeded {
        /// Credits currently held.
        current: u32,
        /// Credit weight of the requested course.
        course_points: u32,
        /// The cap.
        limit: u32,
    },
    /// Every attempt lost a race against another writer.
    #[error("gave up after {attempts} conflicting writes")]
    ConcurrentModification {
        /// Attempts made.
        attempts: usize,
    },
    /// The record store failed.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl RegistrationError {
    /// Rule code carried in `details.code` for conflicts.
    pub fn rule_code(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyRegistered { .. } => Some("already_registered"),
            Self::NotRegistered { .. } => Some("not_registered"),
            Self::CourseFull { .. } => Some("course_full"),
            Self::CreditLimitExceeded { .. } => Some("credit_limit_exceeded"),
            Self::ConcurrentModification { .. } => Some("concurrent_modification"),
            Self::StudentNotFound(_) | Self::CourseNotFound(_) | Self::Persistence(_) => None,
        }
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        let message = err.to_string();
        let rule = err.rule_code().unwrap_or_default();
        match err {
            RegistrationError::StudentNotFound(id) => {
                Error::record_not_found(StudentId::label(), id.get())
            }
            RegistrationError::CourseNotFound(id) => {
                Error::record_not_found(CourseId::label(), id.get())
            }
            RegistrationError::AlreadyRegistered { student, course }
            | RegistrationError::NotRegistered { student, course } => Error::rule_conflict(
                message,
                rule,
                json!({ "studentId": student.get(), "courseId": course.get() }),
            ),
            RegistrationError::CourseFull {
                course,
                max_students,
            } => Error::rule_conflict(
                message,
                rule,
                json!({ "courseId": course.get(), "maxStudents": max_students }),
            ),
            RegistrationError::CreditLimitExceeded {
                current,
                course_points,
                limit,
            } => Error::rule_conflict(
                message,
                rule,
                json!({
                    "currentPoints": current,
                    "coursePoints": course_points,
                    "limit": limit,
                }),
            ),
            RegistrationError::ConcurrentModification { attempts } => {
                Error::rule_conflict(message, rule, json!({ "attempts": attempts }))
            }
            RegistrationError::Persistence(store) => persistence_failure(store),
        }
    }
}

/// Registration service implementing the registration driving ports.
pub struct RegistrationService<S, C, R> {
    students: Arc<S>,
    courses: Arc<C>,
    roster: Arc<R>,
}

impl<S, C, R> Clone for RegistrationService<S, C, R> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
            courses: Arc::clone(&self.courses),
            roster: Arc::clone(&self.roster),
        }
    }
}

impl<S, C, R> RegistrationService<S, C, R> {
    /// Create a new service over the given stores.
    pub fn new(students: Arc<S>, courses: Arc<C>, roster: Arc<R>) -> Self {
        Self {
            students,
            courses,
            roster,
        }
    }
}

impl<S, C, R> RegistrationService<S, C, R>
where
    S: StudentRepository,
    C: CourseRepository,
    R: RosterRepository,
{
    async fn load_student(&self, id: StudentId) -> Result<Student, RegistrationError> {
        self.students
            .find_by_id(id)
            .await?
            .ok_or(RegistrationError::StudentNotFound(id))
    }

    async fn load_course(&self, id: CourseId) -> Result<Course, RegistrationError> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or(RegistrationError::CourseNotFound(id))
    }

    /// Credits held by `student`, summed from the live course records.
    ///
    /// `points_tracker` is a cache of the same figure; a disagreement is
    /// logged and the live sum wins.
    async fn live_credit_total(&self, student: &Student) -> Result<u32, RegistrationError> {
        let courses = self.courses.find_many(student.registered_courses()).await?;
        let total = courses
            .iter()
            .map(Course::credit_points)
            .fold(0_u32, u32::saturating_add);
        if total != student.points_tracker() {
            warn!(
                student_id = %student.id(),
                tracker = student.points_tracker(),
                live_total = total,
                "credit tracker disagrees with registered courses"
            );
        }
        Ok(total)
    }

    /// Commit `change`, reporting `false` when a concurrent writer got there
    /// first.
    async fn commit(
        &self,
        operation: &'static str,
        attempt: usize,
        change: RosterChange,
    ) -> Result<bool, RegistrationError> {
        match self.roster.commit(change).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_retryable() => {
                debug!(operation, attempt, error = %err, "roster commit lost a race; retrying");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn exhausted(operation: &'static str) -> RegistrationError {
        warn!(
            operation,
            attempts = MAX_COMMIT_ATTEMPTS,
            "giving up after repeated concurrent modification"
        );
        RegistrationError::ConcurrentModification {
            attempts: MAX_COMMIT_ATTEMPTS,
        }
    }

    /// Enroll `student_id` in `course_id`.
    pub async fn enroll(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Enrollment, RegistrationError> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let mut student = self.load_student(student_id).await?;
            let mut course = self.load_course(course_id).await?;

            if student.is_registered_for(course_id) || course.has_student(student_id) {
                return Err(RegistrationError::AlreadyRegistered {
                    student: student_id,
                    course: course_id,
                });
            }
            if course.is_full() {
                return Err(RegistrationError::CourseFull {
                    course: course_id,
                    max_students: course.max_students(),
                });
            }
            let current = self.live_credit_total(&student).await?;
            if current.saturating_add(course.credit_points()) > CREDIT_LIMIT {
                return Err(RegistrationError::CreditLimitExceeded {
                    current,
                    course_points: course.credit_points(),
                    limit: CREDIT_LIMIT,
                });
            }

            let student_revision = student.revision();
            let course_revision = course.revision();
            student.enroll(&course);
            course.admit(student_id);
            let change = RosterChange::new()
                .put_student(student.clone(), student_revision)
                .put_course(course.clone(), course_revision);

            if self.commit("register", attempt, change).await? {
                info!(
                    student_id = %student_id,
                    course_id = %course_id,
                    points = student.points_tracker(),
                    "student registered"
                );
                return Ok(Enrollment { student, course });
            }
        }
        Err(Self::exhausted("register"))
    }

    /// Withdraw `student_id` from `course_id`.
    pub async fn withdraw(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Enrollment, RegistrationError> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let mut student = self.load_student(student_id).await?;
            let mut course = self.load_course(course_id).await?;

            if !student.is_registered_for(course_id) && !course.has_student(student_id) {
                return Err(RegistrationError::NotRegistered {
                    student: student_id,
                    course: course_id,
                });
            }

            let student_revision = student.revision();
            let course_revision = course.revision();
            student.withdraw(&course);
            course.release(student_id);
            let change = RosterChange::new()
                .put_student(student.clone(), student_revision)
                .put_course(course.clone(), course_revision);

            if self.commit("deregister", attempt, change).await? {
                info!(
                    student_id = %student_id,
                    course_id = %course_id,
                    points = student.points_tracker(),
                    "student deregistered"
                );
                return Ok(Enrollment { student, course });
            }
        }
        Err(Self::exhausted("deregister"))
    }

    /// Delete `course_id`, releasing every enrolled student in the same
    /// commit.
    pub async fn remove_course(
        &self,
        course_id: CourseId,
    ) -> Result<CourseRemoval, RegistrationError> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let course = self.load_course(course_id).await?;
            let mut change = RosterChange::new();
            let mut released_students = Vec::new();
            let mut skipped_students = Vec::new();

            for &student_id in course.enrolled_students() {
                let Some(mut student) = self.students.find_by_id(student_id).await? else {
                    warn!(
                        course_id = %course_id,
                        student_id = %student_id,
                        "enrolled student no longer exists; skipping"
                    );
                    skipped_students.push(student_id);
                    continue;
                };
                let expected = student.revision();
                student.withdraw(&course);
                change = change.put_student(student, expected);
                released_students.push(student_id);
            }
            change = change.remove_course(course_id, course.revision());

            if self.commit("delete_course", attempt, change).await? {
                info!(
                    course_id = %course_id,
                    released = released_students.len(),
                    skipped = skipped_students.len(),
                    "course deleted"
                );
                return Ok(CourseRemoval {
                    course: course_id,
                    released_students,
                    skipped_students,
                });
            }
        }
        Err(Self::exhausted("delete_course"))
    }

    /// Delete `student_id`, removing them from every roster in the same
    /// commit.
    pub async fn remove_student(
        &self,
        student_id: StudentId,
    ) -> Result<StudentRemoval, RegistrationError> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let student = self.load_student(student_id).await?;
            let courses = self.courses.find_many(student.registered_courses()).await?;
            let found: HashSet<CourseId> = courses.iter().map(Course::id).collect();
            let skipped_courses: Vec<CourseId> = student
                .registered_courses()
                .iter()
                .copied()
                .filter(|id| !found.contains(id))
                .collect();
            for course_id in &skipped_courses {
                warn!(
                    student_id = %student_id,
                    course_id = %course_id,
                    "registered course no longer exists; skipping"
                );
            }

            let mut change = RosterChange::new();
            let mut released_courses = Vec::with_capacity(courses.len());
            for mut course in courses {
                let expected = course.revision();
                course.release(student_id);
                released_courses.push(course.id());
                change = change.put_course(course, expected);
            }
            change = change.remove_student(student_id, student.revision());

            if self.commit("delete_student", attempt, change).await? {
                info!(
                    student_id = %student_id,
                    released = released_courses.len(),
                    skipped = skipped_courses.len(),
                    "student deleted"
                );
                return Ok(StudentRemoval {
                    student: student_id,
                    released_courses,
                    skipped_courses,
                });
            }
        }
        Err(Self::exhausted("delete_student"))
    }
}

#[async_trait]
impl<S, C, R> RegistrationCommand for RegistrationService<S, C, R>
where
    S: StudentRepository,
    C: CourseRepository,
    R: RosterRepository,
{
    async fn register(&self, student: StudentId, course: CourseId) -> Result<Enrollment, Error> {
        self.enroll(student, course).await.map_err(Error::from)
    }

    async fn deregister(
        &self,
        student: StudentId,
        course: CourseId,
    ) -> Result<Enrollment, Error> {
        self.withdraw(student, course).await.map_err(Error::from)
    }

    async fn cascade_remove_course(&self, course: CourseId) -> Result<CourseRemoval, Error> {
        self.remove_course(course).await.map_err(Error::from)
    }

    async fn cascade_remove_student(&self, student: StudentId) -> Result<StudentRemoval, Error> {
        self.remove_student(student).await.map_err(Error::from)
    }
}

#[async_trait]
impl<S, C, R> RegistrationQuery for RegistrationService<S, C, R>
where
    S: StudentRepository,
    C: CourseRepository,
    R: RosterRepository,
{
    async fn registered_courses(&self, student: StudentId) -> Result<Vec<CourseSummary>, Error> {
        let student = self.load_student(student).await?;
        let courses = self
            .courses
            .find_many(student.registered_courses())
            .await
            .map_err(persistence_failure)?;
        Ok(courses.iter().map(Course::summary).collect())
    }

    async fn roster_status(&self, course: CourseId) -> Result<RosterStatus, Error> {
        Ok(self.load_course(course).await?.roster_status())
    }
}
