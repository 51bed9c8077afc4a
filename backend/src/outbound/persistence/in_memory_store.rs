//! In-process record store implementing every persistence port.
//!
//! One `tokio::sync::RwLock` guards the students, faculty, and courses
//! together, so a roster commit validates and applies its writes under a
//! single write guard. Revision checks mirror the conditional `UPDATE ...
//! WHERE revision = $expected` a relational adapter would issue.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{
    CourseRepository, FacultyDraft, FacultyRepository, RosterChange, RosterRepository,
    RosterWrite, StoreError, StudentDraft, StudentRepository,
};
use crate::domain::{Course, CourseDetails, CourseId, Faculty, FacultyId, Student, StudentId};

#[derive(Debug, Default)]
struct CampusState {
    students: BTreeMap<StudentId, Student>,
    faculty: BTreeMap<FacultyId, Faculty>,
    courses: BTreeMap<CourseId, Course>,
    issued: IssuedIds,
}

/// Highest identifier handed out per record kind. Deletes never lower these,
/// so an identifier is issued at most once.
#[derive(Debug, Default)]
struct IssuedIds {
    students: u64,
    faculty: u64,
    courses: u64,
}

fn issue(last: &mut u64) -> u64 {
    *last = last.saturating_add(1);
    *last
}

/// Check `expected` against the stored revision of a record.
fn check_revision(
    entity: &str,
    id: u64,
    stored: Option<u64>,
    expected: u64,
) -> Result<(), StoreError> {
    match stored {
        None => Err(StoreError::missing(entity, id)),
        Some(actual) if actual != expected => {
            Err(StoreError::revision_mismatch(entity, id, expected, actual))
        }
        Some(_) => Ok(()),
    }
}

impl CampusState {
    fn validate(&self, write: &RosterWrite) -> Result<(), StoreError> {
        match write {
            RosterWrite::PutStudent { student, expected } => check_revision(
                StudentId::label(),
                student.id().get(),
                self.students.get(&student.id()).map(Student::revision),
                *expected,
            ),
            RosterWrite::RemoveStudent { id, expected } => check_revision(
                StudentId::label(),
                id.get(),
                self.students.get(id).map(Student::revision),
                *expected,
            ),
            RosterWrite::PutCourse { course, expected } => {
                check_revision(
                    CourseId::label(),
                    course.id().get(),
                    self.courses.get(&course.id()).map(Course::revision),
                    *expected,
                )?;
                if course.enrolled_count() > course.max_students() {
                    return Err(StoreError::query(format!(
                        "course {} roster exceeds capacity {}",
                        course.id(),
                        course.max_students()
                    )));
                }
                Ok(())
            }
            RosterWrite::RemoveCourse { id, expected } => check_revision(
                CourseId::label(),
                id.get(),
                self.courses.get(id).map(Course::revision),
                *expected,
            ),
        }
    }

    fn apply(&mut self, write: RosterWrite) {
        match write {
            RosterWrite::PutStudent { student, .. } => {
                self.students.insert(student.id(), student);
            }
            RosterWrite::PutCourse { course, .. } => {
                self.courses.insert(course.id(), course);
            }
            RosterWrite::RemoveStudent { id, .. } => {
                self.students.remove(&id);
            }
            RosterWrite::RemoveCourse { id, .. } => {
                self.courses.remove(&id);
            }
        }
    }
}

/// Shared in-memory store. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCampusStore {
    state: Arc<RwLock<CampusState>>,
}

impl InMemoryCampusStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryCampusStore {
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, StoreError> {
        Ok(self.state.read().await.students.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .students
            .values()
            .find(|student| student.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.state.read().await.students.values().cloned().collect())
    }

    async fn create(&self, draft: StudentDraft) -> Result<Student, StoreError> {
        let mut state = self.state.write().await;
        if state
            .students
            .values()
            .any(|student| student.email() == draft.profile.email())
        {
            return Err(StoreError::duplicate(StudentId::label(), "email"));
        }
        let id = StudentId::new(issue(&mut state.issued.students));
        let student = Student::new(id, draft.profile, draft.credential);
        state.students.insert(id, student.clone());
        debug!(student_id = %id, "stored student");
        Ok(student)
    }

    async fn update(&self, student: &Student, expected_revision: u64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        check_revision(
            StudentId::label(),
            student.id().get(),
            state.students.get(&student.id()).map(Student::revision),
            expected_revision,
        )?;
        if state
            .students
            .values()
            .any(|other| other.id() != student.id() && other.email() == student.email())
        {
            return Err(StoreError::duplicate(StudentId::label(), "email"));
        }
        state.students.insert(student.id(), student.clone());
        Ok(())
    }
}

#[async_trait]
impl FacultyRepository for InMemoryCampusStore {
    async fn find_by_id(&self, id: FacultyId) -> Result<Option<Faculty>, StoreError> {
        Ok(self.state.read().await.faculty.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Faculty>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .faculty
            .values()
            .find(|member| member.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Faculty>, StoreError> {
        Ok(self.state.read().await.faculty.values().cloned().collect())
    }

    async fn create(&self, draft: FacultyDraft) -> Result<Faculty, StoreError> {
        let mut state = self.state.write().await;
        if state
            .faculty
            .values()
            .any(|member| member.email() == draft.profile.email())
        {
            return Err(StoreError::duplicate(FacultyId::label(), "email"));
        }
        let id = FacultyId::new(issue(&mut state.issued.faculty));
        let member = Faculty::new(id, draft.profile, draft.credential);
        state.faculty.insert(id, member.clone());
        debug!(faculty_id = %id, "stored faculty");
        Ok(member)
    }

    async fn update(&self, faculty: &Faculty, expected_revision: u64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        check_revision(
            FacultyId::label(),
            faculty.id().get(),
            state.faculty.get(&faculty.id()).map(Faculty::revision),
            expected_revision,
        )?;
        if state
            .faculty
            .values()
            .any(|other| other.id() != faculty.id() && other.email() == faculty.email())
        {
            return Err(StoreError::duplicate(FacultyId::label(), "email"));
        }
        state.faculty.insert(faculty.id(), faculty.clone());
        Ok(())
    }

    async fn delete(&self, id: FacultyId) -> Result<bool, StoreError> {
        Ok(self.state.write().await.faculty.remove(&id).is_some())
    }
}

#[async_trait]
impl CourseRepository for InMemoryCampusStore {
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, StoreError> {
        Ok(self.state.read().await.courses.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[CourseId]) -> Result<Vec<Course>, StoreError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.courses.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.state.read().await.courses.values().cloned().collect())
    }

    async fn create(&self, details: CourseDetails) -> Result<Course, StoreError> {
        let mut state = self.state.write().await;
        let id = CourseId::new(issue(&mut state.issued.courses));
        let course = Course::new(id, details);
        state.courses.insert(id, course.clone());
        debug!(course_id = %id, "stored course");
        Ok(course)
    }

    async fn update(&self, course: &Course, expected_revision: u64) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        check_revision(
            CourseId::label(),
            course.id().get(),
            state.courses.get(&course.id()).map(Course::revision),
            expected_revision,
        )?;
        state.courses.insert(course.id(), course.clone());
        Ok(())
    }
}

#[async_trait]
impl RosterRepository for InMemoryCampusStore {
    async fn commit(&self, change: RosterChange) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for write in change.writes() {
            if let Err(err) = state.validate(write) {
                debug!(error = %err, writes = change.writes().len(), "roster commit rejected");
                return Err(err);
            }
        }
        let applied = change.writes().len();
        for write in change.writes().iter().cloned() {
            state.apply(write);
        }
        debug!(writes = applied, "roster commit applied");
        Ok(())
    }
}
