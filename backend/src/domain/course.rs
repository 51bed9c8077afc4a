//! Course records and their read projections.

use std::fmt;

use serde::Serialize;

use super::{CourseId, StudentId};

/// Validation errors raised while building [`CourseDetails`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    /// Course name was blank once trimmed.
    EmptyName,
    /// Instructor was blank once trimmed.
    EmptyInstructor,
    /// Credit weight must be positive.
    ZeroCreditPoints,
    /// Capacity must be positive.
    ZeroCapacity,
}

impl CourseValidationError {
    /// Field the error refers to, in camelCase wire naming.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyInstructor => "instructor",
            Self::ZeroCreditPoints => "creditPoints",
            Self::ZeroCapacity => "maxStudents",
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyInstructor => "empty_instructor",
            Self::ZeroCreditPoints => "zero_credit_points",
            Self::ZeroCapacity => "zero_capacity",
        }
    }
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "course name must not be empty"),
            Self::EmptyInstructor => write!(f, "instructor must not be empty"),
            Self::ZeroCreditPoints => write!(f, "credit points must be at least 1"),
            Self::ZeroCapacity => write!(f, "max students must be at least 1"),
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Editable attributes of a course.
///
/// ## Invariants
/// - `name` and `instructor` are trimmed and non-empty.
/// - `credit_points >= 1` and `max_students >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    name: String,
    instructor: String,
    credit_points: u32,
    max_students: u32,
}

impl CourseDetails {
    /// Validate raw inputs.
    pub fn try_new(
        name: &str,
        instructor: &str,
        credit_points: u32,
        max_students: u32,
    ) -> Result<Self, CourseValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        let instructor = instructor.trim();
        if instructor.is_empty() {
            return Err(CourseValidationError::EmptyInstructor);
        }
        if credit_points == 0 {
            return Err(CourseValidationError::ZeroCreditPoints);
        }
        if max_students == 0 {
            return Err(CourseValidationError::ZeroCapacity);
        }
        Ok(Self {
            name: name.to_owned(),
            instructor: instructor.to_owned(),
            credit_points,
            max_students,
        })
    }

    /// Course name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instructor name.
    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    /// Credit weight.
    pub fn credit_points(&self) -> u32 {
        self.credit_points
    }

    /// Capacity.
    pub fn max_students(&self) -> u32 {
        self.max_students
    }
}

/// A course offered for registration.
///
/// The roster (`enrolled_students`) is only changed by the registration
/// service; directory updates touch the descriptive fields.
///
/// ## Invariants
/// - `enrolled_students` has no duplicates and never exceeds `max_students`.
/// - every enrolled student lists this course among its registrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    name: String,
    instructor: String,
    credit_points: u32,
    max_students: u32,
    enrolled_students: Vec<StudentId>,
    #[serde(skip)]
    revision: u64,
}

impl Course {
    /// Build a freshly created course with an empty roster.
    pub fn new(id: CourseId, details: CourseDetails) -> Self {
        let CourseDetails {
            name,
            instructor,
            credit_points,
            max_students,
        } = details;
        Self {
            id,
            name,
            instructor,
            credit_points,
            max_students,
            enrolled_students: Vec::new(),
            revision: 1,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Course name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instructor name.
    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    /// Credit weight counted against a student's credit cap.
    pub fn credit_points(&self) -> u32 {
        self.credit_points
    }

    /// Capacity.
    pub fn max_students(&self) -> u32 {
        self.max_students
    }

    /// Roster in enrolment order.
    pub fn enrolled_students(&self) -> &[StudentId] {
        &self.enrolled_students
    }

    /// Number of enrolled students.
    pub fn enrolled_count(&self) -> u32 {
        u32::try_from(self.enrolled_students.len()).unwrap_or(u32::MAX)
    }

    /// Optimistic-concurrency revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `student` is on the roster.
    pub fn has_student(&self, student: StudentId) -> bool {
        self.enrolled_students.contains(&student)
    }

    /// Whether the roster has reached capacity.
    pub fn is_full(&self) -> bool {
        self.enrolled_count() >= self.max_students
    }

    /// Seats still available.
    pub fn seats_remaining(&self) -> u32 {
        self.max_students.saturating_sub(self.enrolled_count())
    }

    /// Replace the descriptive attributes.
    pub(crate) fn apply_details(&mut self, details: CourseDetails) {
        let CourseDetails {
            name,
            instructor,
            credit_points,
            max_students,
        } = details;
        self.name = name;
        self.instructor = instructor;
        self.credit_points = credit_points;
        self.max_students = max_students;
        self.revision += 1;
    }

    /// Add `student` to the roster. Adding an existing member is a no-op
    /// apart from the revision bump.
    pub(crate) fn admit(&mut self, student: StudentId) {
        if !self.has_student(student) {
            self.enrolled_students.push(student);
        }
        self.revision += 1;
    }

    /// Remove `student` from the roster.
    pub(crate) fn release(&mut self, student: StudentId) {
        self.enrolled_students.retain(|id| *id != student);
        self.revision += 1;
    }

    /// Student-facing projection.
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id: self.id,
            name: self.name.clone(),
            instructor: self.instructor.clone(),
            credit_points: self.credit_points,
        }
    }

    /// Faculty-facing roster projection.
    pub fn roster_status(&self) -> RosterStatus {
        RosterStatus {
            id: self.id,
            name: self.name.clone(),
            instructor: self.instructor.clone(),
            credit_points: self.credit_points,
            max_students: self.max_students,
            enrolled_count: self.enrolled_count(),
            seats_remaining: self.seats_remaining(),
            enrolled_students: self.enrolled_students.clone(),
        }
    }
}

/// Student-facing view of a course.
///
/// Capacity and roster are withheld: students see what they can register
/// for, not who else did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    /// Course identifier.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// Instructor name.
    pub instructor: String,
    /// Credit weight.
    pub credit_points: u32,
}

/// Faculty-facing registration status of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStatus {
    /// Course identifier.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// Instructor name.
    pub instructor: String,
    /// Credit weight.
    pub credit_points: u32,
    /// Capacity.
    pub max_students: u32,
    /// Current roster size.
    pub enrolled_count: u32,
    /// Capacity minus roster size.
    pub seats_remaining: u32,
    /// Roster in enrolment order.
    pub enrolled_students: Vec<StudentId>,
}
